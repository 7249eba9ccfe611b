//! Gen and show command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const SOURCES: &[&str] = &[
  "src/main.cc",
  "src/gaem/resource.cc",
  "src/gaem/util/fs.cc",
  "src/gaem/util/log.cc",
];

fn gaem_project() -> TestEnv {
  let env = TestEnv::from_fixture("gaem.cfg");
  for source in SOURCES {
    env.write_file(source, "");
  }
  env.write_file("src/gaem/util/log.h", "");
  env
}

#[test]
fn gen_writes_full_manifest() {
  let env = gaem_project();

  env
    .ninjagen_cmd()
    .arg("gen")
    .assert()
    .success()
    .stdout(predicate::str::contains("2 rule(s), 5 build edge(s)"));

  let manifest = env.read_file("build.ninja");
  assert!(manifest.starts_with(
    "include rules.ninja\n\nbuilddir = build\ncxxflags = -std=c++20 $\n-Wall\nldflags = -Lbuild\nsrcs = "
  ));

  for source in SOURCES {
    let object = format!("build/{}.o", source.trim_end_matches(".cc"));
    assert!(
      manifest.contains(&format!("build {object}: cxx {source}\n")),
      "missing edge for {source} in:\n{manifest}"
    );
  }
  assert!(!manifest.contains("log.h"));

  let link = manifest
    .lines()
    .find(|line| line.starts_with("build build/gaem: link "))
    .expect("missing link edge");
  let mut objects: Vec<&str> = link.trim_start_matches("build build/gaem: link ").split(' ').collect();
  objects.sort();
  assert_eq!(
    objects,
    vec![
      "build/src/gaem/resource.o",
      "build/src/gaem/util/fs.o",
      "build/src/gaem/util/log.o",
      "build/src/main.o",
    ]
  );
  assert!(manifest.ends_with("\n\n"));
}

#[test]
fn gen_honors_output_flag() {
  let env = gaem_project();

  env
    .ninjagen_cmd()
    .args(["gen", "--output", "out/gaem.ninja"])
    .assert()
    .failure();

  std::fs::create_dir_all(env.temp.path().join("out")).unwrap();
  env
    .ninjagen_cmd()
    .args(["gen", "--output", "out/gaem.ninja"])
    .assert()
    .success()
    .stdout(predicate::str::contains("out/gaem.ninja"));

  assert!(env.exists("out/gaem.ninja"));
  assert!(!env.exists("build.ninja"));
}

#[test]
fn gen_honors_config_flag() {
  let env = gaem_project();
  std::fs::rename(&env.config_path, env.temp.path().join("project.cfg")).unwrap();

  env
    .ninjagen_cmd()
    .args(["--config", "project.cfg", "gen"])
    .assert()
    .success();

  assert!(env.exists("build.ninja"));
}

#[test]
fn gen_without_sources_links_nothing() {
  let env = TestEnv::from_fixture("gaem.cfg");

  env.ninjagen_cmd().arg("gen").assert().success();

  let manifest = env.read_file("build.ninja");
  assert!(manifest.contains("srcs = \n"));
  assert!(!manifest.contains(": cxx"));
  assert!(manifest.contains("build build/gaem: link\n"));
}

#[test]
fn show_prints_manifest_without_writing() {
  let env = gaem_project();

  env
    .ninjagen_cmd()
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::starts_with("include rules.ninja\n"))
    .stdout(predicate::str::contains("build build/src/main.o: cxx src/main.cc"));

  assert!(!env.exists("build.ninja"));
}

#[test]
fn show_matches_gen() {
  let env = gaem_project();

  let shown = env.ninjagen_cmd().arg("show").assert().success().get_output().stdout.clone();
  env.ninjagen_cmd().arg("gen").assert().success();

  assert_eq!(String::from_utf8(shown).unwrap(), env.read_file("build.ninja"));
}
