mod common;

use common::TestEnv;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn contracts_check() {
    let env = TestEnv::new();

    let rec = env.run_json(&["record", "--ward", "3", "--aqi", "245"]);
    assert_eq!(rec["ok"], true);
    validate("aqi-report.schema.json", &rec["data"]);

    let wards = env.run_json(&["rank", "wards", "--top", "3"]);
    assert_eq!(wards["ok"], true);
    validate("ward-ranking.schema.json", &wards["data"]);

    let zones = env.run_json(&["rank", "zones", "--order", "asc"]);
    assert_eq!(zones["ok"], true);
    validate("zone-ranking.schema.json", &zones["data"]);

    let dash = env.run_json(&["dashboard"]);
    assert_eq!(dash["ok"], true);
    validate("dashboard.schema.json", &dash["data"]);

    let err = env.run_json_failure(&["fetch", "--ward", "1"]);
    validate("error.schema.json", &err);
}
