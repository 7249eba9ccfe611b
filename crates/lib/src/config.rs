//! Loading of `build.cfg` build descriptions.
//!
//! The file is INI-style:
//!
//! ```ini
//! [meta]
//! includes = rules.ninja
//! rulenames = cc link
//!
//! [globals]
//! cflags = -O2 -Wall
//!
//! [rules]
//! cc.ins = ${glob:src/**/*.c}
//! cc.pat = build/${basename:in}.o
//! link.ins = ${cc.out}
//! link.out = app
//! ```
//!
//! - `key = value` or `key: value`; keys and values are trimmed and keys keep
//!   their case.
//! - Lines starting with `#` or `;` are comments.
//! - Indented lines continue the previous value and are joined with `\n`.
//!
//! Sections and keys keep file order, which is the order in which globals
//! and rule assignments are resolved.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a build description.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("line {line}: key outside of any section")]
  MissingSectionHeader { line: usize },

  #[error("line {line}: expected 'key = value', found '{text}'")]
  Syntax { line: usize, text: String },

  #[error("line {line}: duplicate section [{section}]")]
  DuplicateSection { line: usize, section: String },

  #[error("line {line}: duplicate key '{key}' in [{section}]")]
  DuplicateKey { line: usize, section: String, key: String },

  #[error("missing section [{0}]")]
  MissingSection(String),

  #[error("missing key '{key}' in [{section}]")]
  MissingKey { section: String, key: String },
}

/// Ordered key/value pairs of one section.
pub type Section = IndexMap<String, String>;

/// Every section of a file, in file order.
pub type Sections = IndexMap<String, Section>;

/// A parsed build description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
  /// Ninja files to `include`, from `meta.includes`.
  pub includes: Vec<String>,

  /// The declared rules, from `meta.rulenames`.
  pub rulenames: Vec<String>,

  /// Raw global templates.
  pub globals: IndexMap<String, String>,

  /// Raw `<rule>.<property>` assignments in file order.
  pub rules: Vec<(String, String)>,
}

impl BuildConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), "loaded build description");
    Self::parse(&text)
  }

  pub fn parse(text: &str) -> Result<Self, ConfigError> {
    let mut sections = parse_sections(text)?;

    let meta = sections
      .shift_remove("meta")
      .ok_or_else(|| ConfigError::MissingSection("meta".to_string()))?;
    let meta_words = |key: &str| -> Result<Vec<String>, ConfigError> {
      meta
        .get(key)
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .ok_or_else(|| ConfigError::MissingKey {
          section: "meta".to_string(),
          key: key.to_string(),
        })
    };

    Ok(Self {
      includes: meta_words("includes")?,
      rulenames: meta_words("rulenames")?,
      globals: sections.shift_remove("globals").unwrap_or_default(),
      rules: sections
        .shift_remove("rules")
        .unwrap_or_default()
        .into_iter()
        .collect(),
    })
  }
}

/// A key whose value may still receive continuation lines.
struct Pending {
  line: usize,
  key: String,
  value: String,
  blank_lines: usize,
}

/// Split INI text into sections of key/value pairs.
pub fn parse_sections(text: &str) -> Result<Sections, ConfigError> {
  let mut sections = Sections::new();
  let mut current: Option<String> = None;
  let mut pending: Option<Pending> = None;

  for (index, line) in text.lines().enumerate() {
    let line_no = index + 1;
    let trimmed = line.trim();

    if trimmed.starts_with('#') || trimmed.starts_with(';') {
      continue;
    }

    if trimmed.is_empty() {
      if let Some(entry) = pending.as_mut() {
        entry.blank_lines += 1;
      }
      continue;
    }

    if line.starts_with(char::is_whitespace)
      && let Some(entry) = pending.as_mut()
    {
      for _ in 0..=entry.blank_lines {
        entry.value.push('\n');
      }
      entry.value.push_str(trimmed);
      entry.blank_lines = 0;
      continue;
    }

    if let (Some(section), Some(entry)) = (current.as_ref(), pending.take()) {
      insert_key(&mut sections, section, entry)?;
    }

    if let Some(header) = trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
      let name = header.trim().to_string();
      if sections.contains_key(&name) {
        return Err(ConfigError::DuplicateSection {
          line: line_no,
          section: name,
        });
      }
      sections.insert(name.clone(), Section::new());
      current = Some(name);
      continue;
    }

    if current.is_none() {
      return Err(ConfigError::MissingSectionHeader { line: line_no });
    }

    let split = trimmed.find(['=', ':']).ok_or_else(|| ConfigError::Syntax {
      line: line_no,
      text: trimmed.to_string(),
    })?;
    let key = trimmed[..split].trim();
    if key.is_empty() {
      return Err(ConfigError::Syntax {
        line: line_no,
        text: trimmed.to_string(),
      });
    }

    pending = Some(Pending {
      line: line_no,
      key: key.to_string(),
      value: trimmed[split + 1..].trim().to_string(),
      blank_lines: 0,
    });
  }

  if let (Some(section), Some(entry)) = (current.as_ref(), pending.take()) {
    insert_key(&mut sections, section, entry)?;
  }

  Ok(sections)
}

fn insert_key(sections: &mut Sections, section: &str, entry: Pending) -> Result<(), ConfigError> {
  let Some(keys) = sections.get_mut(section) else {
    return Ok(());
  };

  match keys.entry(entry.key) {
    Entry::Occupied(occupied) => Err(ConfigError::DuplicateKey {
      line: entry.line,
      section: section.to_string(),
      key: occupied.key().clone(),
    }),
    Entry::Vacant(vacant) => {
      vacant.insert(entry.value);
      Ok(())
    }
  }
}
