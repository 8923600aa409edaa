use test_support;

#[test]
fn gen_man_outputs_troff() {
  test_support::init_tracing();
  let mut cmd = test_support::cmd_bin();
  let out = cmd.args(["--gen-man"]).output().unwrap();
  assert!(out.status.success());
  let text = String::from_utf8_lossy(&out.stdout);
  // clap_mangen opens with string definitions; the .TH title line follows them
  assert!(text.contains(".TH"), "expected troff title line");
  assert!(text.contains("issue-resolve-predictor"));
  assert!(text.contains("percentage"));
}
