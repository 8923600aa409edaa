use jsonschema::validator_for;
use test_support::{cmd_with_corpus, fixture_path};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

fn report(args: &[&str]) -> serde_json::Value {
  let out = cmd_with_corpus("corpus.json")
    .arg("--config")
    .arg(fixture_path("config.json"))
    .args(args)
    .output()
    .unwrap();
  assert!(out.status.success());
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn single_report_conforms_to_schema() {
  let compiled = compile_schema("issue-resolve-predictor.report.schema.json");
  for issue in ["SHOP-5", "SHOP-6"] {
    let v = report(&["--issue", issue]);
    compiled.validate(&v).expect("schema validation failed for single report");
  }
}

#[test]
fn batch_report_conforms_to_schema() {
  let compiled = compile_schema("issue-resolve-predictor.report.schema.json");
  let v = report(&["--percentage", "60"]);
  compiled.validate(&v).expect("schema validation failed for batch report");
}

#[test]
fn schema_rejects_a_malformed_report() {
  let compiled = compile_schema("issue-resolve-predictor.report.schema.json");
  let mut v = report(&["--issue", "SHOP-5"]);
  v["predictions"][0]["predicted_days"] = serde_json::json!("soon");
  assert!(compiled.validate(&v).is_err());
}
