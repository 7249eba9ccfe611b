//! Implementation of the `ninjagen show` command.

use std::path::Path;

use anyhow::{Context, Result};

use ninjagen_lib::eval::evaluate_config;

/// Print the manifest that `gen` would write.
pub fn cmd_show(config: &Path) -> Result<()> {
  let evaluation =
    evaluate_config(config).with_context(|| format!("Failed to evaluate config: {}", config.display()))?;
  let text = evaluation.manifest.render().context("Failed to render manifest")?;

  print!("{}", text);
  Ok(())
}
