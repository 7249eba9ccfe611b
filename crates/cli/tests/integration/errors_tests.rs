//! Failure integration tests: every fatal error exits non-zero and leaves no manifest behind.

use predicates::prelude::*;

use super::common::TestEnv;

fn assert_gen_fails(fixture: &str, message: &str) -> TestEnv {
  let env = TestEnv::from_fixture(fixture);

  env
    .ninjagen_cmd()
    .arg("gen")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains(message));

  assert!(!env.exists("build.ninja"), "{fixture} left a manifest behind");
  env
}

#[test]
fn unknown_rule_fails() {
  assert_gen_fails("unknown_rule.cfg", "bad rule ld (in ld.ins)");
}

#[test]
fn unknown_property_fails() {
  assert_gen_fails("bad_opt.cfg", "bad opt deps (in cc.deps)");
}

#[test]
fn rule_without_outputs_fails() {
  assert_gen_fails("no_outputs.cfg", "can't compute outs of lonely");
}

#[test]
fn mismatched_outputs_fail() {
  assert_gen_fails("mismatch.cfg", "3 input(s) and 2 output(s)");
}

#[test]
fn undefined_function_fails() {
  let env = assert_gen_fails("undefined_function.cfg", "failed to evaluate 'srcs'");

  env
    .ninjagen_cmd()
    .arg("show")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no such function: 'wildcard'"));
}

#[test]
fn failed_gen_keeps_previous_manifest() {
  let env = TestEnv::from_fixture("no_outputs.cfg");
  env.write_file("build.ninja", "include previous.ninja\n");

  env.ninjagen_cmd().arg("gen").assert().failure();

  assert_eq!(env.read_file("build.ninja"), "include previous.ninja\n");
}

#[test]
fn malformed_config_reports_line() {
  let env = TestEnv::from_fixture("bad_opt.cfg");
  env.write_file("build.cfg", "[meta]\nincludes = rules.ninja\nrulenames\n");

  env
    .ninjagen_cmd()
    .arg("gen")
    .assert()
    .failure()
    .stderr(predicate::str::contains("line 3"));
}
