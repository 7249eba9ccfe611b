//! Placeholder parsing and substitution for build description templates.
//!
//! Every value in the `globals` and `rules` sections is a template: plain text
//! with `${...}` placeholders that are replaced during resolution.
//!
//! # Placeholder Formats
//!
//! - `${name}` - the value bound to `name` in the namespace
//! - `${name:argument}` - the result of calling extension function `name`
//!   with the raw `argument` text
//!
//! Names match `[a-zA-Z_][a-zA-Z0-9_.]*`, so dotted keys published by earlier
//! rules (`${objects.out}`) are ordinary names. Whitespace is allowed after
//! the name and after the colon. The argument runs up to the first `}`;
//! nested braces are not supported.
//!
//! # Lookup
//!
//! A placeholder is looked up in the namespace first and in the
//! [`Function`] registry second. An undefined `${name}` is left in the output
//! untouched, which lets ninja's own `$in`/`$out` style text and foreign
//! `${...}` pass through, including names that happen to be functions. An
//! undefined `${name:argument}` is an error.
//!
//! Text that does not form a placeholder (`${1x}`, an unclosed `${name`) is
//! copied literally. Substituted values are never re-scanned.
//!
//! # Example
//!
//! ```
//! use ninjagen_lib::namespace::Namespace;
//! use ninjagen_lib::template::substitute;
//!
//! let ns = Namespace::with_binding("cc", "clang");
//! let result = substitute("${cc} -c ${cflags}", &ns).unwrap();
//! assert_eq!(result, "clang -c ${cflags}");
//! ```

use thiserror::Error;

use crate::functions::Function;
use crate::namespace::Namespace;

/// A parsed `${...}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
  pub name: String,

  /// Argument text for function calls, `None` for plain references.
  pub arg: Option<String>,

  /// The placeholder exactly as written, emitted when a reference is unresolved.
  pub raw: String,
}

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// A placeholder to be resolved
  Placeholder(Placeholder),
}

/// Errors that can occur while substituting placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  #[error("no such function: '{0}'")]
  UndefinedFunction(String),

  #[error("'{0}' is not callable")]
  NotCallable(String),

  #[error("invalid glob pattern '{pattern}': {message}")]
  Glob { pattern: String, message: String },
}

/// Parse a template into literal and placeholder segments.
///
/// Parsing never fails: anything that is not a well-formed placeholder is
/// kept as literal text.
pub fn parse(input: &str) -> Vec<Segment> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut rest = input;

  while let Some(pos) = rest.find("${") {
    literal.push_str(&rest[..pos]);

    match match_placeholder(&rest[pos..]) {
      Some((placeholder, len)) => {
        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Placeholder(placeholder));
        rest = &rest[pos + len..];
      }
      None => {
        // Not a placeholder, keep the `$` and rescan from the brace
        literal.push('$');
        rest = &rest[pos + 1..];
      }
    }
  }

  literal.push_str(rest);
  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  segments
}

/// Try to read one placeholder at the start of `text`, which begins with `${`.
///
/// Returns the placeholder and the number of bytes it spans.
fn match_placeholder(text: &str) -> Option<(Placeholder, usize)> {
  let body = text.strip_prefix("${")?;

  let name_len = body
    .char_indices()
    .find(|&(i, c)| !(c == '_' || c.is_ascii_alphabetic() || (i > 0 && (c.is_ascii_digit() || c == '.'))))
    .map_or(body.len(), |(i, _)| i);
  if name_len == 0 {
    return None;
  }
  let name = &body[..name_len];

  let rest = body[name_len..].trim_start();
  let (arg, tail) = match rest.strip_prefix(':') {
    Some(after_colon) => {
      let arg_text = after_colon.trim_start();
      let close = arg_text.find('}')?;
      (Some(&arg_text[..close]), &arg_text[close + 1..])
    }
    None => (None, rest.strip_prefix('}')?),
  };

  let len = text.len() - tail.len();
  let placeholder = Placeholder {
    name: name.to_string(),
    // `${name:}` is a plain reference
    arg: arg.filter(|a| !a.is_empty()).map(str::to_string),
    raw: text[..len].to_string(),
  };

  Some((placeholder, len))
}

/// Substitute all placeholders in a template using the given namespace.
///
/// This is a convenience function that parses and substitutes in one step.
///
/// # Errors
///
/// Returns an error if a function call names an unknown function, names a
/// plain value, or if the function itself fails.
pub fn substitute(input: &str, ns: &Namespace) -> Result<String, TemplateError> {
  let segments = parse(input);
  substitute_segments(&segments, ns)
}

/// Substitute placeholders in pre-parsed segments.
///
/// Use this when the same template is evaluated against many namespaces,
/// such as a rule pattern applied to each input.
pub fn substitute_segments(segments: &[Segment], ns: &Namespace) -> Result<String, TemplateError> {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder(p) => match &p.arg {
        Some(arg) => {
          if ns.contains(&p.name) {
            return Err(TemplateError::NotCallable(p.name.clone()));
          }
          let function = Function::lookup(&p.name).ok_or_else(|| TemplateError::UndefinedFunction(p.name.clone()))?;
          result.push_str(&function.invoke(arg, ns)?);
        }
        // Functions are not values: an unbound `${dir}` is ninja's business
        None => result.push_str(ns.get(&p.name).unwrap_or(&p.raw)),
      },
    }
  }

  Ok(result)
}
