//! Implementation of the `ninjagen vars` command.
//!
//! Lists the namespace as the last rule assignment saw it: globals in
//! declaration order, then the `<rule>.ins`, `<rule>.out` and `<rule>.pat`
//! keys in the order they were first published.

use std::path::Path;

use anyhow::{Context, Result};

use ninjagen_lib::eval::evaluate_config;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_vars(config: &Path, format: OutputFormat) -> Result<()> {
  let evaluation =
    evaluate_config(config).with_context(|| format!("Failed to evaluate config: {}", config.display()))?;

  if format.is_json() {
    return print_json(&evaluation.namespace);
  }

  for (name, value) in evaluation.namespace.iter() {
    print_stat(name, value);
  }

  Ok(())
}
