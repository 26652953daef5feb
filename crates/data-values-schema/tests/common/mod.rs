// crates/data-values-schema/tests/common/mod.rs
// =============================================================================
// Module: Schema Test Helpers
// Description: Shared fixtures for schema generation integration tests.
// Purpose: Reduce duplication across integration tests for data-values-schema.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use data_values_schema::Deprecation;
use data_values_schema::Documentation;
use data_values_schema::Example;
use data_values_schema::MapItemType;
use data_values_schema::MapType;
use data_values_schema::ScalarKind;
use data_values_schema::TypeNode;
use data_values_schema::Validation;
use data_values_schema::ValidationRule;
use serde_json::Value;
use serde_json::json;

/// Returns a documentation block with only a description.
pub fn described(text: &str) -> Documentation {
    Documentation {
        description: Some(text.to_string()),
        ..Documentation::default()
    }
}

/// Returns a realistic data values model exercising every value variant.
pub fn sample_model() -> TypeNode {
    let replicas = MapItemType::new(
        "replicas",
        TypeNode::scalar(ScalarKind::Integer, Some(json!(1)))
            .with_documentation(described("pod count")),
    )
    .with_validation(Validation::new(vec![
        ValidationRule::Min {
            value: 1.into(),
        },
        ValidationRule::Max {
            value: 10.into(),
        },
    ]));
    let log_level = MapItemType::new(
        "log_level",
        TypeNode::scalar(ScalarKind::String, Some(json!("info"))).with_validation(
            Validation::new(vec![ValidationRule::OneOf {
                values: vec![json!("debug"), json!("info"), json!("warn")],
            }]),
        ),
    );
    let hosts = MapItemType::new(
        "hosts",
        TypeNode::array(
            TypeNode::scalar(ScalarKind::String, Some(json!(""))).with_validation(
                Validation::new(vec![ValidationRule::MinLength {
                    value: 1,
                }]),
            ),
            Some(json!([])),
        ),
    )
    .with_validation(Validation::new(vec![ValidationRule::MaxLength {
        value: 8,
    }]));
    let proxy = MapItemType::new(
        "proxy",
        TypeNode::nullable(TypeNode::map([
            ("url", TypeNode::scalar(ScalarKind::String, Some(json!("")))),
            ("port", TypeNode::scalar(ScalarKind::Integer, Some(json!(3128)))),
        ])),
    );
    let labels = MapItemType::new(
        "labels",
        TypeNode::any(Some(json!({}))).with_documentation(Documentation {
            title: Some("Labels".to_string()),
            examples: vec![Example {
                description: Some("team label".to_string()),
                value: json!({ "team": "core" }),
            }],
            ..Documentation::default()
        }),
    );
    let legacy = MapItemType::new(
        "legacy",
        TypeNode::scalar(ScalarKind::Boolean, Some(json!(false))).with_documentation(
            Documentation {
                deprecated: Some(Deprecation {
                    notice: Some("removed next release".to_string()),
                }),
                ..Documentation::default()
            },
        ),
    );
    TypeNode::document(TypeNode::Map(MapType {
        items: vec![replicas, log_level, hosts, proxy, labels, legacy],
        ..MapType::default()
    }))
}

/// Returns the key list of a JSON object, or an empty list.
pub fn keys_of(value: &Value) -> Vec<String> {
    value.as_object().map(|object| object.keys().cloned().collect()).unwrap_or_default()
}

/// Collects every schema object in a generated tree, root first.
///
/// Descends through `properties` values and `items`; the `properties` map
/// itself is not a schema object.
pub fn schema_objects(schema: &Value) -> Vec<&Value> {
    let mut found = vec![schema];
    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for property in properties.values() {
            found.extend(schema_objects(property));
        }
    }
    if let Some(items) = schema.get("items").filter(|items| items.is_object()) {
        found.extend(schema_objects(items));
    }
    found
}
