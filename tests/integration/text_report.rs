use test_support::{cmd_with_corpus, fixture_path};

fn text(args: &[&str]) -> String {
  let out = cmd_with_corpus("corpus.json")
    .arg("--config")
    .arg(fixture_path("config.json"))
    .args(["--format", "text"])
    .args(args)
    .output()
    .unwrap();
  assert!(out.status.success());
  String::from_utf8(out.stdout).unwrap()
}

#[test]
fn single_text_report() {
  let t = text(&["--issue", "SHOP-5"]);
  insta::assert_snapshot!(t.trim_end(), @r"
  ######## New prediction ########
  Issue: SHOP-5 (SHOP)
  Alice Liddell: 3.500 days (similarity 1.3333, 2 issues), squared error 0.2500
  Bob Marley: 6.000 days (similarity 0.0000, 2 issues, unweighted), squared error 4.0000
  Real assignee: alice
  Real time: 4.000 days
  Root mean squared error: 1.4577
  Coefficient of determination: n/a
  ######## End prediction ########
  ");
}

#[test]
fn batch_text_report_has_one_block_per_target() {
  let t = text(&["--percentage", "100"]);
  assert_eq!(t.matches("######## New prediction ########").count(), 5);
  assert_eq!(t.matches("######## End prediction ########").count(), 5);
  assert!(t.contains("######## Batch summary ########"));
  assert!(t.contains("Sampled: 5 (100%, seed 11)"));
  assert!(t.contains("Skipped: 0"));
}
