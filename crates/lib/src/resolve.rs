//! Resolution of the `globals` and `rules` sections.
//!
//! Resolution runs in two phases, each taking the namespace produced by the
//! previous one:
//!
//! 1. [`resolve_globals`] evaluates every global in declaration order into a
//!    fresh [`Namespace`]. A global sees the globals declared before it.
//! 2. [`resolve_rules`] replays the `<rule>.<property>` assignments in file
//!    order. After each assignment the rule's current `ins`, derived outputs
//!    and `pat` are published as `<rule>.ins`, `<rule>.out` and `<rule>.pat`
//!    so that later assignments can refer to them.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::namespace::Namespace;
use crate::rule::{Rule, RuleProperty, Rules, split_words};
use crate::template::{TemplateError, substitute};

/// Errors that can occur while resolving globals and rules.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("failed to evaluate '{key}'")]
  Template {
    key: String,
    #[source]
    source: TemplateError,
  },

  #[error("bad rule key '{0}': expected <rule>.<ins|out|pat>")]
  MalformedRuleKey(String),

  #[error("bad rule {rule} (in {key})")]
  UnknownRule { rule: String, key: String },

  #[error("bad opt {opt} (in {key})")]
  UnknownProperty { opt: String, key: String },
}

impl ResolveError {
  fn template(key: &str) -> impl FnOnce(TemplateError) -> Self + '_ {
    move |source| ResolveError::Template {
      key: key.to_string(),
      source,
    }
  }
}

/// Rules and the namespace they were resolved against.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
  pub rules: Rules,

  /// Globals plus every `<rule>.<property>` key published during resolution.
  pub namespace: Namespace,
}

/// Evaluate globals in declaration order.
///
/// Each value is evaluated against the globals already resolved, so
/// references to later globals are left untouched.
pub fn resolve_globals(globals: &IndexMap<String, String>) -> Result<Namespace, ResolveError> {
  let mut defines = Namespace::new();

  for (key, raw) in globals {
    let value = substitute(raw, &defines).map_err(ResolveError::template(key))?;
    debug!(key = %key, value = %value, "resolved global");
    defines.define(key.as_str(), value);
  }

  info!(count = defines.len(), "resolved globals");
  Ok(defines)
}

/// Apply rule property assignments in order, starting from `namespace`.
///
/// `rulenames` fixes the set and order of rules. Every rule starts with no
/// inputs and no outputs; assigning a property again replaces its value.
///
/// # Errors
///
/// Fails on the first assignment that names an undeclared rule or an unknown
/// property, or whose template can not be evaluated.
pub fn resolve_rules(
  rulenames: &[String],
  assignments: &[(String, String)],
  namespace: Namespace,
) -> Result<Resolved, ResolveError> {
  let mut rules: Rules = rulenames.iter().map(|name| (name.clone(), Rule::new())).collect();
  let mut ns = namespace;

  for (key, raw) in assignments {
    let (name, opt) = split_rule_key(key)?;

    let rule = rules.get_mut(name).ok_or_else(|| ResolveError::UnknownRule {
      rule: name.to_string(),
      key: key.clone(),
    })?;
    let property: RuleProperty = opt.parse().map_err(|opt| ResolveError::UnknownProperty {
      opt,
      key: key.clone(),
    })?;

    match property {
      RuleProperty::Ins => {
        let value = substitute(raw, &ns).map_err(ResolveError::template(key))?;
        rule.ins = split_words(&value);
      }
      RuleProperty::Out => {
        let value = substitute(raw, &ns).map_err(ResolveError::template(key))?;
        rule.out = Some(split_words(&value));
      }
      RuleProperty::Pat => rule.pat = Some(raw.clone()),
    }
    debug!(rule = name, property = %property, "resolved rule property");

    publish(name, rule, &mut ns).map_err(ResolveError::template(key))?;
  }

  info!(rules = rules.len(), keys = ns.len(), "resolved rules");
  Ok(Resolved { rules, namespace: ns })
}

/// Publish the current state of `rule` under dotted keys.
fn publish(name: &str, rule: &Rule, ns: &mut Namespace) -> Result<(), TemplateError> {
  ns.define(format!("{name}.ins"), rule.ins.join(" "));

  if rule.has_outs() {
    let outs = rule.outs()?.unwrap_or_default();
    ns.define(format!("{name}.out"), outs.join(" "));
  }

  if let Some(pat) = &rule.pat {
    ns.define(format!("{name}.pat"), pat.as_str());
  }

  Ok(())
}

fn split_rule_key(key: &str) -> Result<(&str, &str), ResolveError> {
  match key.split_once('.') {
    Some((name, opt)) if !opt.contains('.') => Ok((name, opt)),
    _ => Err(ResolveError::MalformedRuleKey(key.to_string())),
  }
}
