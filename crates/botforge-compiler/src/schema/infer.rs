//! Field catalogue inference.

use serde_json::Value;

use crate::ir::{ApiField, FieldType};
use super::path::ROOT_PATH;

/// Nesting depth past which containers are recorded but not descended into.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Walks a JSON document and records every reachable address.
#[derive(Debug, Clone, Copy)]
pub struct SchemaInference {
    max_depth: usize,
}

impl Default for SchemaInference {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SchemaInference {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Infers the field catalogue of `json` in pre-order.
    pub fn infer(&self, json: &Value) -> Vec<ApiField> {
        self.infer_document(Some(json))
    }

    /// Like [`infer`](Self::infer), but `None` stands for an absent
    /// (`undefined`) document.
    pub fn infer_document(&self, json: Option<&Value>) -> Vec<ApiField> {
        let mut fields = Vec::new();
        self.traverse(json, "", 0, &mut fields);
        tracing::debug!(fields = fields.len(), "inferred field catalogue");
        fields
    }

    fn traverse(&self, value: Option<&Value>, path: &str, depth: usize, fields: &mut Vec<ApiField>) {
        let recorded = if path.is_empty() { ROOT_PATH } else { path };

        let Some(value) = value else {
            fields.push(ApiField {
                path: recorded.to_string(),
                field_type: FieldType::Undefined,
                sample_value: None,
            });
            return;
        };

        let field_type = match value {
            Value::Null => FieldType::Null,
            Value::Bool(_) => FieldType::Boolean,
            Value::Number(_) => FieldType::Number,
            Value::String(_) => FieldType::String,
            Value::Array(_) => FieldType::Array,
            Value::Object(_) => FieldType::Object,
        };
        fields.push(ApiField {
            path: recorded.to_string(),
            field_type,
            sample_value: Some(value.clone()),
        });

        if depth >= self.max_depth {
            if field_type.is_container() {
                tracing::warn!(path = recorded, depth, "maximum nesting depth reached, not descending");
            }
            return;
        }

        match value {
            // Only the first element is inspected: arrays are assumed homogeneous.
            Value::Array(items) => {
                if let Some(first) = items.first() {
                    self.traverse(Some(first), &format!("{}[0]", path), depth + 1, fields);
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    self.traverse(Some(child), &child_path, depth + 1, fields);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }
}

/// Infers the field catalogue of `json` with the default depth limit.
pub fn infer(json: &Value) -> Vec<ApiField> {
    SchemaInference::default().infer(json)
}

/// Leaves eligible for user selection: string, number, boolean and null.
pub fn selectable(fields: &[ApiField]) -> Vec<ApiField> {
    fields
        .iter()
        .filter(|f| f.field_type.is_selectable())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(fields: &[ApiField]) -> Vec<(&str, FieldType)> {
        fields.iter().map(|f| (f.path.as_str(), f.field_type)).collect()
    }

    #[test]
    fn weather_response_in_preorder() {
        let doc = json!({
            "weather": [{"id": 800, "description": "clear sky"}, {"id": 500}],
            "main": {"temp": 21.5, "humidity": 40},
            "name": "Tokyo",
            "rain": null,
            "daylight": true
        });

        assert_eq!(
            paths(&infer(&doc)),
            vec![
                ("root", FieldType::Object),
                ("weather", FieldType::Array),
                ("weather[0]", FieldType::Object),
                ("weather[0].id", FieldType::Number),
                ("weather[0].description", FieldType::String),
                ("main", FieldType::Object),
                ("main.temp", FieldType::Number),
                ("main.humidity", FieldType::Number),
                ("name", FieldType::String),
                ("rain", FieldType::Null),
                ("daylight", FieldType::Boolean),
            ]
        );
    }

    #[test]
    fn only_first_array_element_is_traversed() {
        let doc = json!({"items": [{"a": 1}, {"b": 2}, {"c": 3}]});
        let fields = infer(&doc);
        assert!(fields.iter().any(|f| f.path == "items[0].a"));
        assert!(!fields.iter().any(|f| f.path.contains("[1]") || f.path.ends_with(".b")));
    }

    #[test]
    fn primitive_root_is_recorded_at_root() {
        let fields = infer(&json!("hello"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path, "root");
        assert_eq!(fields[0].field_type, FieldType::String);
        assert_eq!(fields[0].sample_value, Some(json!("hello")));
    }

    #[test]
    fn root_array_elements_use_bare_index() {
        let fields = infer(&json!([{"name": "a"}]));
        assert_eq!(
            paths(&fields),
            vec![
                ("root", FieldType::Array),
                ("[0]", FieldType::Object),
                ("[0].name", FieldType::String),
            ]
        );
    }

    #[test]
    fn missing_document_is_undefined() {
        let fields = SchemaInference::default().infer_document(None);
        assert_eq!(fields[0].field_type, FieldType::Undefined);
        assert_eq!(fields[0].sample_value, None);
    }

    #[test]
    fn empty_array_has_no_children() {
        assert_eq!(paths(&infer(&json!({"tags": []}))), vec![
            ("root", FieldType::Object),
            ("tags", FieldType::Array),
        ]);
    }

    #[test]
    fn depth_limit_stops_descent() {
        let doc = json!({"a": {"b": {"c": {"d": 1}}}});
        let fields = SchemaInference::new(2).infer(&doc);
        assert_eq!(
            paths(&fields),
            vec![
                ("root", FieldType::Object),
                ("a", FieldType::Object),
                ("a.b", FieldType::Object),
            ]
        );
    }

    #[test]
    fn selectable_keeps_primitive_leaves_and_null() {
        let doc = json!({"s": "x", "n": 1, "b": false, "z": null, "o": {}, "a": []});
        let kept: Vec<_> = selectable(&infer(&doc)).into_iter().map(|f| f.path).collect();
        assert_eq!(kept, vec!["s", "n", "b", "z"]);
    }
}
