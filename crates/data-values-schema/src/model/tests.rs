// crates/data-values-schema/src/model/tests.rs
// ============================================================================
// Module: Type Model Unit Tests
// Description: Serde form and helper coverage for the type model.
// Purpose: Keep the model file format and wrapper lookups stable.
// Dependencies: data-values-schema, serde_json, serde_yaml
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]

use serde_json::Value;
use serde_json::json;

use super::ScalarKind;
use super::TypeNode;
use super::Validation;
use super::ValidationRule;

#[test]
fn explicit_null_default_is_kept_distinct_from_absent() {
    let explicit: TypeNode =
        serde_json::from_value(json!({ "kind": "any", "default": null })).unwrap();
    let absent: TypeNode = serde_json::from_value(json!({ "kind": "any" })).unwrap();
    match (explicit, absent) {
        (TypeNode::Any(explicit), TypeNode::Any(absent)) => {
            assert_eq!(explicit.default, Some(Value::Null));
            assert_eq!(absent.default, None);
        }
        _ => panic!("expected any nodes"),
    }
}

#[test]
fn map_fields_keep_declaration_order() {
    let node: TypeNode = serde_json::from_value(json!({
        "kind": "map",
        "items": [
            { "kind": "map_item", "key": "zeta", "value": { "kind": "scalar", "type": "string" } },
            { "kind": "map_item", "key": "alpha", "value": { "kind": "scalar", "type": "integer" } }
        ]
    }))
    .unwrap();
    let TypeNode::Map(map) = node else {
        panic!("expected map");
    };
    let keys: Vec<&str> = map.items.iter().map(|item| item.key.as_str()).collect();
    assert_eq!(keys, ["zeta", "alpha"]);
}

#[test]
fn yaml_models_parse_with_validation_rules() {
    let source = r"
kind: scalar
type: integer
default: 3
validation:
  rules:
    - rule: min
      value: 1
    - rule: one_of
      values: [1, 2, 3]
    - rule: not_null
";
    let node: TypeNode = serde_yaml::from_str(source).unwrap();
    let TypeNode::Scalar(scalar) = node else {
        panic!("expected scalar");
    };
    assert_eq!(scalar.kind, ScalarKind::Integer);
    assert_eq!(scalar.default, Some(json!(3)));
    let validation = scalar.validation.unwrap();
    assert!(validation.is_unconditional());
    assert_eq!(validation.rules.len(), 3);
    assert_eq!(validation.rules[2], ValidationRule::NotNull);
}

#[test]
fn effective_value_looks_through_wrappers() {
    let node = TypeNode::document(TypeNode::nullable(TypeNode::array(
        TypeNode::scalar(ScalarKind::String, None),
        None,
    )));
    assert_eq!(node.as_node_ref().effective_value().kind_name(), "array");
}

#[test]
fn with_validation_skips_array_items() {
    let item = TypeNode::ArrayItem(super::ArrayItemType {
        value: Box::new(TypeNode::any(None)),
    });
    let unchanged = item.clone().with_validation(Validation::new(vec![ValidationRule::NotNull]));
    assert_eq!(unchanged, item);
    assert!(unchanged.as_node_ref().validation().is_none());
}

#[test]
fn value_slot_classification_matches_variants() {
    let value_types = [
        TypeNode::map(Vec::<(String, TypeNode)>::new()),
        TypeNode::array(TypeNode::any(None), None),
        TypeNode::scalar(ScalarKind::Boolean, None),
        TypeNode::nullable(TypeNode::any(None)),
        TypeNode::any(None),
    ];
    assert!(value_types.iter().all(TypeNode::is_value_type));
    assert!(!TypeNode::document(TypeNode::any(None)).is_value_type());
}

#[test]
fn misspelled_fields_fail_parsing() {
    let typo = serde_json::from_value::<TypeNode>(json!({
        "kind": "scalar", "type": "integer", "defualt": 0
    }));
    assert!(typo.unwrap_err().to_string().contains("defualt"));

    let nested = serde_json::from_value::<TypeNode>(json!({
        "kind": "any",
        "documentation": { "descripton": "typo" }
    }));
    assert!(nested.is_err());

    let rule = serde_json::from_value::<TypeNode>(json!({
        "kind": "any",
        "validation": { "rules": [{ "rule": "min", "value": 1, "inclusive": true }] }
    }));
    assert!(rule.is_err());
}

#[test]
fn items_accept_their_own_kind_tag_only() {
    let tagged: TypeNode = serde_json::from_value(json!({
        "kind": "array",
        "item": { "kind": "array_item", "value": { "kind": "any" } }
    }))
    .unwrap();
    let untagged: TypeNode = serde_json::from_value(json!({
        "kind": "array",
        "item": { "value": { "kind": "any" } }
    }))
    .unwrap();
    assert_eq!(tagged, untagged);

    let mislabeled = serde_json::from_value::<TypeNode>(json!({
        "kind": "map",
        "items": [{ "kind": "array_item", "key": "a", "value": { "kind": "any" } }]
    }));
    assert!(mislabeled.unwrap_err().to_string().contains("expected kind `map_item`"));

    let unknown = serde_json::from_value::<TypeNode>(json!({
        "kind": "map",
        "items": [{ "key": "a", "value": { "kind": "any" }, "optional": true }]
    }));
    assert!(unknown.is_err());
}

#[test]
fn standalone_map_item_parses_through_its_tag() {
    let node: TypeNode = serde_json::from_value(json!({
        "kind": "map_item", "key": "a", "value": { "kind": "any" }
    }))
    .unwrap();
    assert_eq!(node, TypeNode::MapItem(super::MapItemType::new("a", TypeNode::any(None))));
}
