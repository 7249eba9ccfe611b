//! CLI integration tests for ninjagen.

mod common;
mod errors_tests;
mod gen_tests;
mod vars_tests;
