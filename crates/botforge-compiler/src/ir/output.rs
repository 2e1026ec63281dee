//! Generation output types.

use serde::{Deserialize, Serialize};

/// A complete generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Relative posix path: no leading slash, no `..` segments.
    pub path: String,
    pub content: String,
}

/// One row of the deployment variable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVariable {
    pub key: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub files: Vec<GeneratedFile>,
    pub env_variables: Vec<EnvVariable>,
    pub setup_instructions: String,
}

impl GenerationResult {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}
