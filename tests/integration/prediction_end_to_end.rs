use test_support::{cmd_with_corpus, fixture_path};

fn run_json(args: &[&str]) -> serde_json::Value {
  let out = cmd_with_corpus("corpus.json")
    .arg("--config")
    .arg(fixture_path("config.json"))
    .args(args)
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  serde_json::from_slice(&out.stdout).unwrap()
}

fn close(a: &serde_json::Value, b: f64) -> bool {
  (a.as_f64().unwrap() - b).abs() < 1e-9
}

#[test]
fn single_issue_weighted_and_fallback_predictions() {
  let v = run_json(&["--issue", "SHOP-5"]);
  assert_eq!(v["mode"], "single");
  assert_eq!(v["real_assignee"], "alice");
  assert!(close(&v["real_days"], 4.0));

  let rows = v["predictions"].as_array().unwrap();
  assert_eq!(rows.len(), 2, "carol has no resolved history and is filtered out");

  // alice: (1·2 + ⅓·8) / (1 + ⅓) = 3.5
  assert_eq!(rows[0]["assignee"]["id"], "alice");
  assert_eq!(rows[0]["assignee"]["name"], "Alice Liddell");
  assert!(close(&rows[0]["predicted_days"], 3.5));
  assert_eq!(rows[0]["compared_issues"], 2);
  assert_eq!(rows[0]["weighted"], true);
  assert!(close(&rows[0]["squared_error"], 0.25));

  // bob: no lexical overlap at all → unweighted mean of 5 and 7
  assert_eq!(rows[1]["assignee"]["id"], "bob");
  assert!(close(&rows[1]["predicted_days"], 6.0));
  assert_eq!(rows[1]["weighted"], false);
  assert!(close(&rows[1]["squared_error"], 4.0));

  let stats = &v["statistics"];
  assert_eq!(stats["count"], 2);
  assert!(close(&stats["mean_squared_error"], 2.125));
  assert!(close(&stats["root_mean_squared_error"], 2.125f64.sqrt()));
  assert!(stats["coefficient_of_determination"].is_null());
}

#[test]
fn cosine_metric_changes_the_weights() {
  // cos("alpha beta", "alpha gamma") over L1-normalized vectors = 0.5 → (2 + 0.5·8) / 1.5 = 4
  let v = run_json(&["--issue", "SHOP-5", "--metric", "cosine"]);
  let alice = &v["predictions"][0];
  assert!((alice["predicted_days"].as_f64().unwrap() - 4.0).abs() < 1e-6);
  assert!((alice["similarity_mass"].as_f64().unwrap() - 1.5).abs() < 1e-6);
}

#[test]
fn top_k_keeps_the_most_similar_issue() {
  let v = run_json(&["--issue", "SHOP-5", "--top-k", "1"]);
  let rows = v["predictions"].as_array().unwrap();
  assert!(close(&rows[0]["predicted_days"], 2.0));
  assert_eq!(rows[0]["compared_issues"], 1);
  // all-zero ties keep corpus order: SHOP-3 (5 days) wins for bob
  assert!(close(&rows[1]["predicted_days"], 5.0));
}

#[test]
fn unresolved_target_gets_predictions_without_errors() {
  let v = run_json(&["--issue", "SHOP-6"]);
  assert_eq!(v["real_assignee"], "carol");
  assert!(v["real_days"].is_null());
  assert!(v["statistics"].is_null());
  let rows = v["predictions"].as_array().unwrap();
  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| r["squared_error"].is_null()));
}

#[test]
fn batch_covers_every_resolved_issue_in_sample_order() {
  let v = run_json(&["--percentage", "100", "--jobs", "2"]);
  assert_eq!(v["mode"], "batch");
  assert_eq!(v["project"], "SHOP");
  assert_eq!(v["seed"], 11);
  assert_eq!(v["sampled"], 5);
  assert_eq!(v["evaluated"], 5);
  assert!(v["skipped"].as_array().unwrap().is_empty());

  let ids: Vec<&str> = v["targets"].as_array().unwrap().iter().map(|t| t["issue_id"].as_str().unwrap()).collect();
  assert_eq!(ids, vec!["SHOP-1", "SHOP-2", "SHOP-3", "SHOP-4", "SHOP-5"]);
  assert_eq!(v["statistics"]["count"], 5);
}

#[test]
fn batch_sample_is_seeded_and_independent_of_jobs() {
  let a = run_json(&["--percentage", "40", "--seed", "3", "--jobs", "1"]);
  let b = run_json(&["--percentage", "40", "--seed", "3", "--jobs", "4"]);
  assert_eq!(a, b);
  // ceil(5 · 40 / 100) = 2
  assert_eq!(a["sampled"], 2);
  assert_eq!(a["seed"], 3);
}
