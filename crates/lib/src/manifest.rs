//! The generated ninja manifest.
//!
//! A [`Manifest`] is fully resolved in memory and rendered in one piece, so
//! a rule whose outputs can not be computed fails the whole render before
//! anything is written. [`write_manifest`] then replaces the target file
//! atomically.

use std::fmt::{self, Write as _};
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use thiserror::Error;
use tracing::{debug, info};

use crate::namespace::Namespace;
use crate::rule::Rules;
use crate::template::TemplateError;

/// Errors that can occur while turning rules into build edges.
#[derive(Debug, Error)]
pub enum EmitError {
  #[error("can't compute outs of {0}")]
  OutputsUndefined(String),

  #[error("{rule} pairs inputs with outputs but has {ins} input(s) and {outs} output(s)")]
  LengthMismatch { rule: String, ins: usize, outs: usize },

  #[error("failed to compute outputs of {rule}")]
  Template {
    rule: String,
    #[source]
    source: TemplateError,
  },
}

/// One `build` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEdge {
  pub output: String,
  pub rule: String,
  pub inputs: Vec<String>,
}

impl fmt::Display for BuildEdge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "build {}: {}", self.output, self.rule)?;
    for input in &self.inputs {
      write!(f, " {input}")?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default)]
pub struct Manifest {
  pub includes: Vec<String>,
  pub defines: Namespace,
  pub rules: Rules,
}

impl Manifest {
  /// Compute the build edges of every rule, in rule order.
  ///
  /// A rule with a single output gets one edge taking all of its inputs.
  /// Otherwise inputs and outputs are paired by position and their counts
  /// must match.
  pub fn edges(&self) -> Result<Vec<BuildEdge>, EmitError> {
    let mut edges = Vec::new();

    for (name, rule) in &self.rules {
      let outs = rule
        .outs()
        .map_err(|source| EmitError::Template {
          rule: name.clone(),
          source,
        })?
        .ok_or_else(|| EmitError::OutputsUndefined(name.clone()))?;

      if let [output] = outs.as_slice() {
        edges.push(BuildEdge {
          output: output.clone(),
          rule: name.clone(),
          inputs: rule.ins.clone(),
        });
        continue;
      }

      if outs.len() != rule.ins.len() {
        return Err(EmitError::LengthMismatch {
          rule: name.clone(),
          ins: rule.ins.len(),
          outs: outs.len(),
        });
      }

      for (input, output) in rule.ins.iter().zip(outs) {
        edges.push(BuildEdge {
          output,
          rule: name.clone(),
          inputs: vec![input.clone()],
        });
      }
    }

    debug!(count = edges.len(), "computed build edges");
    Ok(edges)
  }

  /// Render the manifest text: includes, then defines, then build edges.
  pub fn render(&self) -> Result<String, EmitError> {
    let edges = self.edges()?;
    Ok(self.render_edges(&edges))
  }

  /// Render the manifest text around build edges that were already computed.
  pub fn render_edges(&self, edges: &[BuildEdge]) -> String {
    let mut text = String::new();
    // Writing into a String can not fail
    let _ = self.write_regions(&mut text, edges);
    text
  }

  fn write_regions(&self, text: &mut String, edges: &[BuildEdge]) -> fmt::Result {
    for include in &self.includes {
      writeln!(text, "include {include}")?;
    }
    writeln!(text)?;

    for (name, value) in self.defines.iter() {
      writeln!(text, "{name} = {}", escape_newlines(value))?;
    }
    writeln!(text)?;

    for edge in edges {
      writeln!(text, "{edge}")?;
    }
    writeln!(text)
  }
}

/// Turn embedded newlines into ninja line continuations.
fn escape_newlines(value: &str) -> String {
  value.replace('\n', " $\n")
}

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// The target is either left untouched or replaced as a whole. A replaced
/// target keeps its permissions; a new one gets the usual `0666 & !umask`.
pub fn write_manifest(path: &Path, contents: &str) -> std::io::Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut builder = Builder::new();
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(fs::Permissions::from_mode(0o666));
  }

  let mut file = builder.tempfile_in(dir)?;
  file.write_all(contents.as_bytes())?;
  if let Ok(existing) = fs::metadata(path) {
    file.as_file().set_permissions(existing.permissions())?;
  }
  file.persist(path).map_err(|e| e.error)?;

  info!(path = %path.display(), bytes = contents.len(), "wrote manifest");
  Ok(())
}
