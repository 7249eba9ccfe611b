//! Extension functions callable from templates as `${name:argument}`.
//!
//! The registry is a closed set. Functions are only reachable through the
//! argument form of a placeholder and never live in a [`Namespace`], so a
//! name can not be both a value and a function at the same tier.
//!
//! | Function   | Result                                                  |
//! |------------|---------------------------------------------------------|
//! | `glob`     | files matching the pattern, `**` recurses               |
//! | `basename` | each word without its suffix (`src/a.c` → `src/a`)      |
//! | `notdir`   | each word without its directory (`src/a.c` → `a.c`)     |
//! | `dir`      | directory part of each word (`src/a.c` → `src/`)        |
//! | `suffix`   | suffix of each word (`src/a.c` → `.c`)                  |
//!
//! Every function takes a reference: `${basename:in}` operates on the value
//! of `in`, and `${glob:gen.out}` expands the patterns an earlier rule
//! published. When the argument is not a bound name it is evaluated as a
//! template and used as literal text, so `${notdir:build/app}` gives `app`.
//! `glob` treats each whitespace-separated word as its own pattern.

use glob::MatchOptions;
use tracing::{debug, warn};

use crate::namespace::Namespace;
use crate::template::{TemplateError, substitute};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
  Glob,
  Basename,
  Notdir,
  Dir,
  Suffix,
}

impl Function {
  pub const ALL: [Function; 5] = [
    Function::Glob,
    Function::Basename,
    Function::Notdir,
    Function::Dir,
    Function::Suffix,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Function::Glob => "glob",
      Function::Basename => "basename",
      Function::Notdir => "notdir",
      Function::Dir => "dir",
      Function::Suffix => "suffix",
    }
  }

  pub fn lookup(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|f| f.name() == name)
  }

  /// Call the function with the raw argument text of a placeholder.
  pub fn invoke(self, argument: &str, ns: &Namespace) -> Result<String, TemplateError> {
    match self {
      Function::Glob => expand_glob(argument, ns),
      Function::Basename => map_words(argument, ns, |w| split_suffix(w).0),
      Function::Notdir => map_words(argument, ns, |w| split_dir(w).1),
      Function::Dir => map_words(argument, ns, |w| match split_dir(w).0 {
        "" => "./",
        dir => dir,
      }),
      Function::Suffix => map_words(argument, ns, |w| split_suffix(w).1),
    }
  }
}

/// List every path matching the whitespace-separated patterns of the referenced text.
///
/// Matches are concatenated in pattern order.
fn expand_glob(argument: &str, ns: &Namespace) -> Result<String, TemplateError> {
  let patterns = operand(argument, ns)?;

  let options = MatchOptions {
    require_literal_leading_dot: true,
    ..MatchOptions::new()
  };

  let mut matches = Vec::new();
  for pattern in patterns.split_whitespace() {
    let paths = glob::glob_with(pattern, options).map_err(|e| TemplateError::Glob {
      pattern: pattern.to_string(),
      message: e.to_string(),
    })?;

    let before = matches.len();
    for entry in paths {
      match entry {
        Ok(path) => matches.push(path.to_string_lossy().into_owned()),
        Err(e) => warn!(path = ?e.path(), error = %e.error(), "skipping unreadable path"),
      }
    }
    debug!(pattern, count = matches.len() - before, "expanded glob");
  }

  Ok(matches.join(" "))
}

/// The text a function operates on: the value of a bound name, or the
/// argument evaluated as a template.
fn operand(argument: &str, ns: &Namespace) -> Result<String, TemplateError> {
  match ns.get(argument.trim()) {
    Some(value) => Ok(value.to_string()),
    None => substitute(argument, ns),
  }
}

/// Apply `f` to each whitespace-separated word of the referenced text.
///
/// Words mapped to an empty string are dropped.
fn map_words(argument: &str, ns: &Namespace, f: impl Fn(&str) -> &str) -> Result<String, TemplateError> {
  let operand = operand(argument, ns)?;
  let words: Vec<&str> = operand.split_whitespace().map(f).filter(|w| !w.is_empty()).collect();
  Ok(words.join(" "))
}

/// Split a path into everything before the final `.` of its last component and the suffix.
fn split_suffix(word: &str) -> (&str, &str) {
  let file_start = word.rfind('/').map_or(0, |i| i + 1);
  match word[file_start..].rfind('.') {
    Some(dot) => word.split_at(file_start + dot),
    None => (word, ""),
  }
}

/// Split a path after its last `/`.
fn split_dir(word: &str) -> (&str, &str) {
  match word.rfind('/') {
    Some(i) => word.split_at(i + 1),
    None => ("", word),
  }
}
