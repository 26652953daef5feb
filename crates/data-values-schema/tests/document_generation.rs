//! Document generation tests for data-values-schema.
// crates/data-values-schema/tests/document_generation.rs
// =============================================================================
// Module: Document Generation Tests
// Description: End-to-end conversion of type models into schema documents.
// Purpose: Pin exact output text for representative models.
// =============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]

use data_values_schema::JsonSchemaDocument;
use data_values_schema::ScalarKind;
use data_values_schema::TypeNode;
use data_values_schema::document::DEFAULT_DESCRIPTION;
use data_values_schema::document::DEFAULT_SCHEMA_ID;
use serde_json::Value;
use serde_json::json;

mod common;

/// Envelope prefix emitted by the default assembler.
const ENVELOPE: &str = concat!(
    r#"{"$schema":"https://json-schema.org/draft/2020-12/schema","#,
    r#""$id":"https://example.biz/schema/ytt/data-values.json","#,
    r#""description":"Schema for data values, generated by ytt","#
);

fn generate_text(node: &TypeNode) -> String {
    let document = JsonSchemaDocument::new().generate(node).unwrap();
    serde_json::to_string(&document).unwrap()
}

#[test]
fn string_field_document() {
    let node = TypeNode::document(TypeNode::map([(
        "name",
        TypeNode::scalar(ScalarKind::String, Some(json!(""))),
    )]));
    assert_eq!(
        generate_text(&node),
        format!(
            "{ENVELOPE}{}",
            r#""type":"object","additionalProperties":false,"properties":{"name":{"type":"string","default":""}}}"#
        )
    );
}

#[test]
fn number_array_document() {
    let node = TypeNode::document(TypeNode::array(
        TypeNode::scalar(ScalarKind::Number, None),
        Some(json!([])),
    ));
    assert_eq!(
        generate_text(&node),
        format!("{ENVELOPE}{}", r#""type":"array","items":{"type":"number"},"default":[]}"#)
    );
}

#[test]
fn nullable_integer_document() {
    let node = TypeNode::document(TypeNode::nullable(TypeNode::scalar(
        ScalarKind::Integer,
        Some(json!(0)),
    )));
    assert_eq!(
        generate_text(&node),
        format!("{ENVELOPE}{}", r#""type":["integer","null"],"default":0}"#)
    );
}

#[test]
fn any_with_null_default_document() {
    let node = TypeNode::document(TypeNode::any(Some(Value::Null)));
    assert_eq!(
        generate_text(&node),
        format!(
            "{ENVELOPE}{}",
            r#""type":["null","string","number","object","array","boolean"],"default":null}"#
        )
    );
}

#[test]
fn sample_model_matches_golden_text() {
    let expected = [
        ENVELOPE,
        r#""type":"object","additionalProperties":false,"properties":{"#,
        r#""replicas":{"type":"integer","description":"pod count","default":1,"minimum":1,"maximum":10},"#,
        r#""log_level":{"type":"string","default":"info","enum":["debug","info","warn"]},"#,
        r#""hosts":{"type":"array","items":{"type":"string","default":"","minLength":1},"default":[],"maxItems":8},"#,
        r#""proxy":{"type":["object","null"],"additionalProperties":false,"properties":{"#,
        r#""url":{"type":"string","default":""},"port":{"type":"integer","default":3128}}},"#,
        r#""labels":{"title":"Labels","type":["null","string","number","object","array","boolean"],"#,
        r#""x-example-description":"team label","examples":[{"team":"core"}],"default":{}},"#,
        r#""legacy":{"type":"boolean","deprecated":true,"default":false}}}"#,
    ]
    .concat();
    assert_eq!(generate_text(&common::sample_model()), expected);
}

#[test]
fn generation_is_deterministic_across_calls_and_clones() {
    let model = common::sample_model();
    let first = generate_text(&model);
    let second = generate_text(&model.clone());
    assert_eq!(first, second);
}

#[test]
fn envelope_keys_come_first_for_every_root_kind() {
    let roots = [
        TypeNode::document(TypeNode::map([("a", TypeNode::any(None))])),
        TypeNode::map(Vec::<(String, TypeNode)>::new()),
        TypeNode::array(TypeNode::any(None), None),
        TypeNode::scalar(ScalarKind::Boolean, None),
        TypeNode::nullable(TypeNode::scalar(ScalarKind::Float, None)),
        TypeNode::any(None),
    ];
    for root in &roots {
        let document = JsonSchemaDocument::new().generate(root).unwrap();
        let keys = common::keys_of(&document);
        assert_eq!(keys[.. 3], ["$schema", "$id", "description"]);
        assert_eq!(document["$id"], json!(DEFAULT_SCHEMA_ID));
        assert_eq!(document["description"], json!(DEFAULT_DESCRIPTION));
    }
}

#[test]
fn models_loaded_from_json_generate_the_same_document() {
    let source = json!({
        "kind": "document",
        "value": {
            "kind": "map",
            "items": [
                { "kind": "map_item", "key": "name",
                  "value": { "kind": "scalar", "type": "string", "default": "" } }
            ]
        }
    });
    let loaded: TypeNode = serde_json::from_value(source).unwrap();
    let built = TypeNode::document(TypeNode::map([(
        "name",
        TypeNode::scalar(ScalarKind::String, Some(json!(""))),
    )]));
    assert_eq!(generate_text(&loaded), generate_text(&built));
}

#[test]
fn misplaced_variant_in_loaded_model_yields_no_document() {
    let source = json!({
        "kind": "map",
        "items": [
            { "kind": "map_item", "key": "inner",
              "value": { "kind": "array_item", "value": { "kind": "any" } } }
        ]
    });
    let loaded: TypeNode = serde_json::from_value(source).unwrap();
    let err = JsonSchemaDocument::new().generate(&loaded).unwrap_err();
    assert!(err.to_string().contains("array_item"), "error should name the variant: {err}");
}
