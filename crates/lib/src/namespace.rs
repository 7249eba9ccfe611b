//! Ordered string-valued namespace consulted during template evaluation.
//!
//! A [`Namespace`] holds the local tier of template lookup: global defines
//! while the globals section is resolved, then those defines extended with
//! the `<rule>.ins` / `<rule>.out` / `<rule>.pat` keys published while rules
//! are resolved. The function tier lives in [`crate::functions`].
//!
//! Entries are kept in insertion order and never removed. Redefining a key
//! replaces its value in place.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Namespace {
  values: IndexMap<String, String>,
}

impl Namespace {
  pub fn new() -> Self {
    Self::default()
  }

  /// Namespace holding a single binding, used for per-input pattern scopes.
  pub fn with_binding(name: &str, value: &str) -> Self {
    let mut ns = Self::new();
    ns.define(name, value);
    ns
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.values.get(name).map(String::as_str)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }

  /// Bind `name` to `value`, replacing any earlier value but keeping its position.
  pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.values.insert(name.into(), value.into());
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Namespace {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut ns = Self::new();
    for (k, v) in iter {
      ns.define(k, v);
    }
    ns
  }
}
