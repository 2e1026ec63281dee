//! JavaScript project generation from a bot specification.
//!
//! The generators only build strings; nothing here touches the
//! filesystem. [`generate`] is the entry point used by
//! [`crate::Compiler`].

pub mod auth;
pub mod backend;
pub mod commands;
pub mod env;
pub mod js;
pub mod messages;
pub mod naming;
pub mod project;
pub mod snippet;
pub mod templating;

use rand::RngCore;

use crate::config::CodegenOptions;
use crate::ir::{DeploymentType, GenerationResult, ProjectSpec};

pub use backend::{create_backend, ProjectBackend};
pub use snippet::SnippetStyle;

/// Generates the project for `deployment`.
pub fn generate(
    spec: &ProjectSpec,
    deployment: DeploymentType,
    rng: &mut dyn RngCore,
    options: CodegenOptions,
) -> GenerationResult {
    create_backend(deployment, rng, options).generate(spec)
}
