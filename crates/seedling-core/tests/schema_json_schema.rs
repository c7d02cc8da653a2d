use std::fs;
use std::path::Path;

use jsonschema::JSONSchema;
use seedling_core::schema_json_schema;
use serde_json::Value;

fn load_json(path: &Path) -> Value {
    let contents =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("missing json at {}", path.display()));
    serde_json::from_str(&contents).expect("parse json")
}

fn generated_schema() -> Value {
    serde_json::to_value(schema_json_schema()).expect("serialize json schema")
}

#[test]
fn json_schema_rejects_additional_properties() {
    let generated = generated_schema();

    assert_eq!(generated["additionalProperties"], Value::Bool(false));
    for definition in ["Table", "Column", "ForeignKey", "Metadata", "Index"] {
        assert_eq!(
            generated["definitions"][definition]["additionalProperties"],
            Value::Bool(false),
            "{definition} should reject unknown fields"
        );
    }
}

#[test]
fn fintech_fixture_matches_json_schema() {
    let generated = generated_schema();
    let compiled = JSONSchema::compile(&generated).expect("compile json schema");
    let fixture =
        load_json(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fintech.schema.json"));

    assert!(compiled.is_valid(&fixture), "fixture should match json schema");
}

#[test]
fn json_schema_flags_unknown_fields() {
    let generated = generated_schema();
    let compiled = JSONSchema::compile(&generated).expect("compile json schema");
    let document = serde_json::json!({
        "name": "x",
        "database_type": ["mysql"],
        "tables": [],
        "generation_order": [],
        "seed": 42
    });

    assert!(!compiled.is_valid(&document));
}

fn valid_document() -> Value {
    serde_json::json!({
        "name": "shop",
        "database_type": ["mysql"],
        "tables": [{
            "name": "users",
            "record_count": 10,
            "columns": [{ "name": "id", "type": "int", "primary_key": true }]
        }],
        "generation_order": ["users"]
    })
}

#[test]
fn json_schema_marks_required_fields() {
    let generated = generated_schema();

    let required = |node: &Value| -> Vec<String> {
        node["required"]
            .as_array()
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    };

    let root = required(&generated);
    for field in ["name", "database_type", "tables", "generation_order"] {
        assert!(root.contains(&field.to_string()), "root should require {field}");
    }
    let table = required(&generated["definitions"]["Table"]);
    for field in ["name", "record_count", "columns"] {
        assert!(table.contains(&field.to_string()), "Table should require {field}");
    }
    let column = required(&generated["definitions"]["Column"]);
    for field in ["name", "type"] {
        assert!(column.contains(&field.to_string()), "Column should require {field}");
    }
}

#[test]
fn json_schema_agrees_with_parser_on_rejections() {
    let generated = generated_schema();
    let compiled = JSONSchema::compile(&generated).expect("compile json schema");

    let accepted = valid_document();
    assert!(compiled.is_valid(&accepted));
    assert!(seedling_core::parse_schema_str(&accepted.to_string()).is_ok());

    let mut unknown_engine = valid_document();
    unknown_engine["database_type"] = serde_json::json!(["oracle"]);
    let mut no_engine = valid_document();
    no_engine["database_type"] = serde_json::json!([]);
    let mut negative_records = valid_document();
    negative_records["tables"][0]["record_count"] = serde_json::json!(-3);
    let mut untyped_column = valid_document();
    untyped_column["tables"][0]["columns"][0]
        .as_object_mut()
        .expect("column object")
        .remove("type");

    for (label, document) in [
        ("empty document", serde_json::json!({})),
        ("unknown engine", unknown_engine),
        ("no engine", no_engine),
        ("negative record_count", negative_records),
        ("column without type", untyped_column),
    ] {
        assert!(!compiled.is_valid(&document), "{label} should fail the json schema");
        assert!(
            seedling_core::parse_schema_str(&document.to_string()).is_err(),
            "{label} should fail parsing"
        );
    }
}
