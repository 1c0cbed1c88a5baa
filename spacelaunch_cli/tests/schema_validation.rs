use serde_json::Value;
use spacelaunch_lib::types::{GraphQlResponse, LaunchListData};
use spacelaunch_lib::ToListRow;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn fixture_text(name: &str) -> String {
    let path = workspace_root()
        .join("spacelaunch_api/tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e))
}

fn load_fixture(name: &str) -> Value {
    serde_json::from_str(&fixture_text(name)).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn extract_launches(fixture: &Value) -> Value {
    fixture["data"]["launches"]["launches"].clone()
}

fn rows_json(name: &str) -> Value {
    let resp: GraphQlResponse<LaunchListData> =
        serde_json::from_str(&fixture_text(name)).expect("fixture deserializes");
    let rows: Vec<_> = resp
        .data
        .expect("fixture has data")
        .launches
        .into_launches()
        .iter()
        .map(ToListRow::to_list_row)
        .collect();
    serde_json::to_value(rows).unwrap()
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures and CLI output conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn test_launch_fixtures_conform_to_schema() {
    let schema = load_schema("launch.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("launch schema compiles");

    for name in [
        "launches_page1.json",
        "launches_last.json",
        "launches_partial.json",
    ] {
        let data = extract_launches(&load_fixture(name));
        if let Err(e) = validator.validate(&data) {
            panic!("{} failed validation: {e}", name);
        }
    }
}

#[test]
fn test_json_rows_conform_to_schema() {
    let schema = load_schema("list_row.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("row schema compiles");

    for name in ["launches_page1.json", "launches_last.json"] {
        let rows = rows_json(name);
        if let Err(e) = validator.validate(&rows) {
            panic!("rows from {} failed validation: {e}", name);
        }
    }
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_launch_schema_rejects_missing_id() {
    let mut data = extract_launches(&load_fixture("launches_page1.json"));
    data[0].as_object_mut().unwrap().remove("id");

    let schema = load_schema("launch.schema.json");
    let validator = jsonschema::draft202012::new(&schema).unwrap();
    assert!(!validator.is_valid(&data));
}

#[test]
fn test_row_schema_rejects_non_http_thumbnail() {
    let mut rows = rows_json("launches_page1.json");
    rows[0]["thumbnail_url"] = Value::String("file:///tmp/patch.png".to_string());

    let schema = load_schema("list_row.schema.json");
    let validator = jsonschema::draft202012::new(&schema).unwrap();
    assert!(!validator.is_valid(&rows));
}
