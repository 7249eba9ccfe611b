//! ninjagen-lib: build description evaluation for ninjagen
//!
//! This crate turns a `build.cfg` build description into a ninja manifest:
//! - `config`: parsing of the INI-style description
//! - `template`: `${name}` / `${name:arg}` placeholder substitution
//! - `functions`: extension functions such as `glob`
//! - `resolve`: globals and rule assignments, in file order
//! - `manifest`: build edges and the rendered `build.ninja`

pub mod config;
pub mod eval;
pub mod functions;
pub mod manifest;
pub mod namespace;
pub mod resolve;
pub mod rule;
pub mod template;
