//! Field catalogue types produced by schema inference.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON type of a catalogued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Object,
    Array,
}

impl FieldType {
    /// Leaves that may be shown to the user for selection.
    pub fn is_selectable(self) -> bool {
        matches!(
            self,
            FieldType::String | FieldType::Number | FieldType::Boolean | FieldType::Null
        )
    }

    /// Primitive types that carry data worth formatting by default.
    pub fn is_formattable(self) -> bool {
        matches!(self, FieldType::String | FieldType::Number | FieldType::Boolean)
    }

    /// Object and array fields, which own children in the tree.
    pub fn is_container(self) -> bool {
        matches!(self, FieldType::Object | FieldType::Array)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Null => "null",
            FieldType::Undefined => "undefined",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One addressable value in a sample API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiField {
    /// Dotted/bracket-indexed address, e.g. `weather[0].description`.
    pub path: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// The value found at `path`; `None` for `undefined`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_value: Option<Value>,
}

/// Tree form of [`ApiField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNode {
    pub path: String,
    /// Final path segment (`"0"` for an array element).
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_value: Option<Value>,
    /// Present only for object and array nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FieldNode>>,
    pub is_leaf: bool,
}

impl FieldNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(FieldNode::subtree_size)
            .sum::<usize>()
    }
}
