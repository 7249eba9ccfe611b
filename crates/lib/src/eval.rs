//! Build description evaluation.
//!
//! This module provides [`evaluate_config`], which takes a path to a
//! `build.cfg` file and returns the resulting [`Manifest`] along with the
//! final namespace.

use std::path::Path;

use tracing::info;

use crate::config::{BuildConfig, ConfigError};
use crate::manifest::Manifest;
use crate::namespace::Namespace;
use crate::resolve::{ResolveError, Resolved, resolve_globals, resolve_rules};

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  /// The build description could not be loaded.
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A global or rule assignment could not be resolved.
  #[error(transparent)]
  Resolve(#[from] ResolveError),
}

/// The result of evaluating a build description.
#[derive(Debug, Clone)]
pub struct Evaluation {
  pub manifest: Manifest,

  /// Globals followed by every key published by rules.
  pub namespace: Namespace,
}

/// Evaluate a build description file.
///
/// This function:
/// 1. Parses the file into its `meta`, `globals` and `rules` sections
/// 2. Resolves globals in declaration order
/// 3. Replays rule assignments against the globals
/// 4. Returns the manifest, ready to be rendered
///
/// Globs are expanded relative to the current working directory.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use ninjagen_lib::eval::evaluate_config;
///
/// let evaluation = evaluate_config(Path::new("build.cfg"))?;
/// print!("{}", evaluation.manifest.render()?);
/// ```
pub fn evaluate_config(path: &Path) -> Result<Evaluation, EvalError> {
  let config = BuildConfig::load(path)?;
  info!(path = %path.display(), rules = config.rulenames.len(), "evaluating build description");
  evaluate(&config)
}

/// Evaluate an already parsed build description.
pub fn evaluate(config: &BuildConfig) -> Result<Evaluation, EvalError> {
  let defines = resolve_globals(&config.globals)?;
  let Resolved { rules, namespace } = resolve_rules(&config.rulenames, &config.rules, defines.clone())?;

  Ok(Evaluation {
    manifest: Manifest {
      includes: config.includes.clone(),
      defines,
      rules,
    },
    namespace,
  })
}
