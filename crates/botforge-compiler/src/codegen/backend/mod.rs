//! Deployment backends.
//!
//! Each backend turns a [`ProjectSpec`] into the complete file set for one
//! runtime model. Both share the command modules from
//! [`crate::codegen::commands`] and differ in entry points, scaffolding and
//! the variable table.

mod gateway;
mod interactions;

pub use gateway::GatewayBackend;
pub use interactions::InteractionsBackend;

use std::collections::HashMap;

use rand::RngCore;

use crate::config::CodegenOptions;
use crate::ir::{DeploymentType, GeneratedFile, GenerationResult, ProjectSpec};

/// A code generator for one deployment model.
///
/// Generation is total: malformed input degrades individual handlers
/// instead of failing.
pub trait ProjectBackend {
    /// The deployment model this backend targets.
    fn deployment(&self) -> DeploymentType;

    /// Produces the project files, variable table and setup instructions.
    fn generate(&self, spec: &ProjectSpec) -> GenerationResult;
}

/// Creates the backend for `deployment`.
///
/// `rng` is only drawn from for the interactions target, which needs a
/// fresh registration secret.
pub fn create_backend(
    deployment: DeploymentType,
    rng: &mut dyn RngCore,
    options: CodegenOptions,
) -> Box<dyn ProjectBackend> {
    match deployment {
        DeploymentType::InteractionsEndpoint => Box::new(InteractionsBackend::new(rng, options)),
        DeploymentType::Gateway => Box::new(GatewayBackend::new(options)),
    }
}

/// Ordered file list, unique by path.
#[derive(Debug, Default)]
pub(crate) struct FileSet {
    files: Vec<GeneratedFile>,
    index: HashMap<String, usize>,
}

impl FileSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a file. A later file with the same path replaces the earlier
    /// content but keeps its position.
    pub(crate) fn add(&mut self, path: &str, content: impl Into<String>) {
        debug_assert!(
            !path.starts_with('/') && !path.split('/').any(|s| s == ".."),
            "generated path must be relative: {}",
            path
        );
        let content = content.into();
        match self.index.get(path) {
            Some(&i) => {
                tracing::warn!(path, "duplicate generated file replaced");
                self.files[i].content = content;
            }
            None => {
                self.index.insert(path.to_string(), self.files.len());
                self.files.push(GeneratedFile {
                    path: path.to_string(),
                    content,
                });
            }
        }
    }

    pub(crate) fn into_files(self) -> Vec<GeneratedFile> {
        self.files
    }
}
