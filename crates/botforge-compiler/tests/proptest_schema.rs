//! Property tests for schema inference.
//!
//! Arbitrary JSON documents are generated with simple lowercase keys so
//! that every catalogue path is unambiguous.

use botforge_compiler::ir::{ApiField, FieldNode, FieldType};
use botforge_compiler::schema::path::parent_path;
use botforge_compiler::schema::{infer, organize_hierarchy, selectable, value_by_path};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_filter("reserved root path", |k| k != "root")
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..5).prop_map(|entries| {
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k, v);
                }
                Value::Object(map)
            }),
        ]
    })
}

fn count(nodes: &[FieldNode]) -> usize {
    nodes.iter().map(FieldNode::subtree_size).sum()
}

fn paths(nodes: &[FieldNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.path.as_str()).collect()
}

/// Catalogue paths one segment below `parent`, or single-segment paths
/// when `parent` is `None`.
fn extensions<'a>(fields: &'a [ApiField], parent: Option<&str>) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|f| parent_path(&f.path) == parent)
        .map(|f| f.path.as_str())
        .collect()
}

fn check_children(node: &FieldNode, fields: &[ApiField]) -> Result<(), TestCaseError> {
    let children = node.children.as_deref().unwrap_or_default();
    prop_assert_eq!(paths(children), extensions(fields, Some(node.path.as_str())), "children of {}", node.path);
    for child in children {
        check_children(child, fields)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn inference_is_deterministic(json in json_value()) {
        prop_assert_eq!(infer(&json), infer(&json));
    }

    #[test]
    fn every_path_resolves_to_its_sample(json in json_value()) {
        for field in infer(&json) {
            let resolved = value_by_path(&json, &field.path);
            prop_assert_eq!(resolved, field.sample_value.as_ref(), "path {}", field.path);
        }
    }

    #[test]
    fn selectable_keeps_exactly_the_leaf_types(json in json_value()) {
        let fields = infer(&json);
        let expected: Vec<ApiField> = fields
            .iter()
            .filter(|f| matches!(
                f.field_type,
                FieldType::String | FieldType::Number | FieldType::Boolean | FieldType::Null
            ))
            .cloned()
            .collect();
        prop_assert_eq!(selectable(&fields), expected);
    }

    #[test]
    fn hierarchy_children_are_one_segment_extensions(json in json_value()) {
        let fields = infer(&json);
        let tree = organize_hierarchy(&fields);
        prop_assert_eq!(paths(&tree), extensions(&fields, None));
        for root in &tree {
            check_children(root, &fields)?;
        }
    }

    #[test]
    fn hierarchy_contains_every_field_once(json in json_value()) {
        let fields = infer(&json);
        let tree = organize_hierarchy(&fields);
        prop_assert_eq!(count(&tree), fields.len());
    }
}
