//! Vars command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn vars_lists_globals_and_published_keys() {
  let env = TestEnv::from_fixture("gaem.cfg");
  env.write_file("src/main.cc", "");

  env
    .ninjagen_cmd()
    .arg("vars")
    .assert()
    .success()
    .stdout(predicate::str::contains("builddir = build"))
    .stdout(predicate::str::contains("cxx.ins = src/main.cc"))
    .stdout(predicate::str::contains("cxx.out = build/src/main.o"))
    .stdout(predicate::str::contains("cxx.pat = build/${basename:in}.o"))
    .stdout(predicate::str::contains("link.out = build/gaem"));
}

#[test]
fn vars_json_is_ordered_object() {
  let env = TestEnv::from_fixture("gaem.cfg");
  env.write_file("src/main.cc", "");

  let output = env
    .ninjagen_cmd()
    .args(["vars", "--output-format", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(value["ldflags"], "-Lbuild");
  assert_eq!(value["link.ins"], "build/src/main.o");

  let text = String::from_utf8(output).unwrap();
  let builddir = text.find("\"builddir\"").unwrap();
  let link_out = text.find("\"link.out\"").unwrap();
  assert!(builddir < link_out);
}
