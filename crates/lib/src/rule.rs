//! Rules declared in the build description.
//!
//! A rule names a ninja rule defined in one of the included files and
//! carries the inputs and outputs of its build edges. Outputs either come
//! from an explicit `out` list or from `pat`, a template evaluated once per
//! input with `${in}` bound to that input.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::namespace::Namespace;
use crate::template::{self, TemplateError};

/// A property assignable from the `rules` section as `<rule>.<property>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleProperty {
  Ins,
  Out,
  Pat,
}

impl RuleProperty {
  pub fn as_str(self) -> &'static str {
    match self {
      RuleProperty::Ins => "ins",
      RuleProperty::Out => "out",
      RuleProperty::Pat => "pat",
    }
  }
}

impl fmt::Display for RuleProperty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RuleProperty {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "ins" => Ok(RuleProperty::Ins),
      "out" => Ok(RuleProperty::Out),
      "pat" => Ok(RuleProperty::Pat),
      other => Err(other.to_string()),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
  pub ins: Vec<String>,
  pub pat: Option<String>,
  pub out: Option<Vec<String>>,
}

impl Rule {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn has_outs(&self) -> bool {
    self.pat.is_some() || self.out.is_some()
  }

  /// Compute the outputs of this rule.
  ///
  /// Returns `None` when neither `pat` nor `out` has been set. A pattern
  /// takes precedence over an explicit list and yields one output per input,
  /// in input order. The pattern only sees `${in}` and the function registry.
  ///
  /// Outputs are derived on every call.
  pub fn outs(&self) -> Result<Option<Vec<String>>, TemplateError> {
    let Some(pat) = &self.pat else {
      return Ok(self.out.clone());
    };

    let segments = template::parse(pat);
    let outs = self
      .ins
      .iter()
      .map(|input| template::substitute_segments(&segments, &Namespace::with_binding("in", input)))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(outs))
  }
}

/// Rules keyed by name, in the order they were declared in `meta.rulenames`.
pub type Rules = IndexMap<String, Rule>;

/// Split evaluated property text into a word list.
pub fn split_words(text: &str) -> Vec<String> {
  text.split_whitespace().map(str::to_string).collect()
}
