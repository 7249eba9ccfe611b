//! Implementation of the `ninjagen gen` command.
//!
//! This command evaluates a build description and writes the resulting
//! manifest. Nothing is written unless every rule resolves.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use ninjagen_lib::eval::evaluate_config;
use ninjagen_lib::manifest::write_manifest;

use crate::output::print_success;

pub fn cmd_gen(config: &Path, output: &Path) -> Result<()> {
  let evaluation =
    evaluate_config(config).with_context(|| format!("Failed to evaluate config: {}", config.display()))?;
  let manifest = &evaluation.manifest;

  let edges = manifest.edges().context("Failed to compute build edges")?;
  let text = manifest.render_edges(&edges);
  debug!(edges = edges.len(), bytes = text.len(), "rendered manifest");

  write_manifest(output, &text).with_context(|| format!("Failed to write manifest: {}", output.display()))?;

  print_success(&format!(
    "Wrote {} ({} rule(s), {} build edge(s))",
    output.display(),
    manifest.rules.len(),
    edges.len()
  ));

  Ok(())
}
