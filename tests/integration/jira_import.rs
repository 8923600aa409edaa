use issue_resolve_predictor::{Corpus, Engine, EngineConfig, IssueRepository};
use test_support::{cmd_with_corpus, fixture_path};

#[test]
fn loads_export_and_skips_entries_without_key() {
  test_support::init_tracing();
  let raw: serde_json::Value = test_support::read_fixture_json("jira_export.json");
  let corpus = Corpus::load(&fixture_path("jira_export.json")).unwrap();
  assert_eq!(raw["issues"].as_array().unwrap().len(), 5);
  assert_eq!(corpus.issues().len(), 4);
  assert_eq!(corpus.projects().into_iter().collect::<Vec<_>>(), vec!["CORE"]);

  let names: Vec<&str> = corpus.assignees().map(|a| a.name.as_str()).collect();
  assert_eq!(names, vec!["Adam Smith", "Jane Doe"]);

  let login = corpus.issue("CORE-1").unwrap();
  assert_eq!(login.assignee.as_deref(), Some("jdoe"));
  assert_eq!(login.resolve_days(), Some(2.0));
  assert_eq!(login.comments.len(), 1);
}

#[test]
fn predicts_from_jira_history_with_default_config() {
  let corpus = Corpus::load(&fixture_path("jira_export.json")).unwrap();
  let engine = Engine::new(&corpus, &EngineConfig::default()).unwrap();
  let report = engine.run_single("CORE-1").unwrap();

  let ids: Vec<&str> = report.predictions.iter().map(|r| r.prediction.assignee.id.as_str()).collect();
  assert_eq!(ids, vec!["asmith", "jdoe"]);
  let jdoe = report.real_assignee_prediction().unwrap();
  assert_eq!(jdoe.predicted_days, 4.0);
  assert_eq!(jdoe.compared_issues, 1);
  assert!(jdoe.similarity_mass > 0.0);
}

#[test]
fn cli_accepts_jira_export() {
  let out = cmd_with_corpus("jira_export.json").args(["--issue", "CORE-3"]).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["project"], "CORE");
  assert_eq!(v["real_assignee"], "asmith");
  assert!((v["real_days"].as_f64().unwrap() - 6.0).abs() < 1e-9);
}
