//! Schema inference over sample API responses.
//!
//! A "try this endpoint" collaborator hands the compiler an already-fetched
//! JSON body. This module turns it into a field catalogue, a browsable tree,
//! and default field mappings for the snippet engine.

mod hierarchy;
mod infer;
mod mapping;
pub mod path;

pub use hierarchy::organize_hierarchy;
pub use infer::{infer, selectable, SchemaInference, DEFAULT_MAX_DEPTH};
pub use mapping::{default_format, default_label, default_mappings};
pub use path::value_by_path;

use serde_json::Value;

use crate::diagnostic::CompilerError;

/// Parses a raw response body for inference.
pub fn parse_response(body: &str) -> Result<Value, CompilerError> {
    serde_json::from_str(body).map_err(|e| CompilerError::InvalidResponseJson {
        message: e.to_string(),
    })
}
