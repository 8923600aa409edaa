use predicates::prelude::*;
use test_support::{cmd_with_corpus, fixture_path};

#[test]
fn errors_when_no_run_mode() {
  let out = cmd_with_corpus("corpus.json").output().unwrap();
  assert_eq!(out.status.code(), Some(2));
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("Provide one of --issue <id> or --percentage <1..=100>"));
}

#[test]
fn issue_and_percentage_conflict() {
  cmd_with_corpus("corpus.json")
    .args(["--issue", "SHOP-5", "--percentage", "10", "--project", "SHOP"])
    .assert()
    .code(2);
}

#[test]
fn percentage_out_of_range_is_rejected() {
  cmd_with_corpus("corpus.json")
    .args(["--percentage", "0", "--project", "SHOP"])
    .assert()
    .code(2);
  cmd_with_corpus("corpus.json")
    .args(["--percentage", "101", "--project", "SHOP"])
    .assert()
    .code(2);
}

#[test]
fn unknown_issue_is_a_usage_failure() {
  cmd_with_corpus("corpus.json")
    .args(["--issue", "SHOP-404"])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("issue not found: SHOP-404"));
}

#[test]
fn unknown_project_is_a_usage_failure() {
  cmd_with_corpus("corpus.json")
    .args(["--percentage", "50", "--project", "NOPE"])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("project not found: NOPE"));
}

#[test]
fn invalid_config_fails_before_loading_corpus() {
  let mut cmd = test_support::cmd_bin();
  cmd
    .args(["--corpus", "/does/not/exist.json", "--issue", "SHOP-5", "--config"])
    .arg(fixture_path("invalid_config.json"))
    .assert()
    .code(1)
    .stderr(predicate::str::contains("summary_weight"));
}

#[test]
fn missing_corpus_file_is_an_io_failure() {
  test_support::cmd_bin()
    .args(["--corpus", "/does/not/exist.json", "--issue", "SHOP-5"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("exist.json"));
}

#[test]
fn writes_report_to_out_file() {
  let td = test_support::tempdir();
  let target = td.path().join("reports").join("shop-5.json");
  cmd_with_corpus("corpus.json")
    .args(["--issue", "SHOP-5", "--out"])
    .arg(&target)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
  let v: serde_json::Value = serde_json::from_slice(&std::fs::read(&target).unwrap()).unwrap();
  assert_eq!(v["issue_id"], "SHOP-5");
}

#[test]
fn zero_top_k_in_config_is_rejected() {
  let (_td, config) = test_support::write_json("config.json", &serde_json::json!({ "top_k": 0 }));
  cmd_with_corpus("corpus.json")
    .args(["--issue", "SHOP-5", "--config"])
    .arg(&config)
    .assert()
    .code(1)
    .stderr(predicate::str::contains("top_k"));
}
