//! # BotForge Compiler
//!
//! Compiles a declarative Discord bot specification (bot identity, external
//! API profiles, slash commands) into a runnable Node.js project. Two
//! deployment models are supported: a stateless interactions endpoint and a
//! persistent gateway process.
//!
//! ## Architecture
//!
//! ```text
//! Sample API response (JSON)
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Schema    │  Field catalogue, tree, default mappings
//! │ (JSON → IR)  │
//! └──────┬───────┘
//!        │ FieldMapping[]
//!        ▼
//! ┌──────────────┐
//! │      IR      │  ProjectSpec: bot, API profiles, commands
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Discord limits, degraded-output warnings
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Backend per deployment: files + env table
//! │  (IR → JS)   │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use botforge_compiler::{config::load_spec, Compiler, CompilerConfig};
//!
//! let spec = load_spec("bot.json".as_ref())?;
//! let compiler = Compiler::new(CompilerConfig {
//!     out_dir: "my-bot".into(),
//!     ..CompilerConfig::default()
//! });
//! let result = compiler.compile(&spec, &mut rand::thread_rng())?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod ir;
pub mod presets;
pub mod schema;
pub mod validate;

use rand::RngCore;

pub use config::{CodegenOptions, CompilerConfig, Locale};
pub use diagnostic::CompilerError;
pub use validate::ValidationWarning;

use ir::{ApiField, DeploymentType, GenerationResult, ProjectSpec};

/// The main compiler struct that orchestrates validation, generation and
/// output.
pub struct Compiler {
    config: CompilerConfig,
}

/// Summary of a [`Compiler::compile`] run.
#[derive(Debug)]
pub struct CompileResult {
    pub deployment: DeploymentType,
    pub commands: usize,
    pub warnings: Vec<ValidationWarning>,
    pub generation: GenerationResult,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// The configured deployment override, else the one in the spec.
    pub fn deployment_for(&self, spec: &ProjectSpec) -> DeploymentType {
        self.config.deployment.unwrap_or(spec.bot.deployment_type)
    }

    /// Validates without generating.
    pub fn check(&self, spec: &ProjectSpec) -> Result<Vec<ValidationWarning>, CompilerError> {
        validate::validate_spec(spec)
    }

    /// Generates the project in memory. Never fails.
    pub fn generate(&self, spec: &ProjectSpec, rng: &mut dyn RngCore) -> GenerationResult {
        codegen::generate(spec, self.deployment_for(spec), rng, self.config.codegen)
    }

    /// Runs the full pipeline:
    /// 1. Validate (unless `skip_validation`)
    /// 2. Generate files for the selected deployment
    /// 3. Write them below `out_dir`
    pub fn compile(&self, spec: &ProjectSpec, rng: &mut dyn RngCore) -> Result<CompileResult, CompilerError> {
        let warnings = if self.config.skip_validation {
            Vec::new()
        } else {
            validate::validate_spec(spec)?
        };

        let deployment = self.deployment_for(spec);
        tracing::debug!(deployment = deployment.label(), "generating project");
        let generation = self.generate(spec, rng);

        self.write_output(&generation)?;
        tracing::info!(
            files = generation.files.len(),
            out_dir = %self.config.out_dir.display(),
            "project written"
        );

        Ok(CompileResult {
            deployment,
            commands: spec.commands.len(),
            warnings,
            generation,
        })
    }

    /// Infers the field catalogue of a raw response body, honouring the
    /// configured depth limit.
    pub fn infer(&self, body: &str) -> Result<Vec<ApiField>, CompilerError> {
        let json = schema::parse_response(body)?;
        Ok(schema::SchemaInference::new(self.config.max_inference_depth).infer(&json))
    }

    /// Writes generated files to the output directory.
    fn write_output(&self, generation: &GenerationResult) -> Result<(), CompilerError> {
        std::fs::create_dir_all(&self.config.out_dir)
            .map_err(|e| CompilerError::io(&self.config.out_dir, e.to_string()))?;

        for file in &generation.files {
            let path = self.config.out_dir.join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| CompilerError::io(parent, e.to_string()))?;
            }
            std::fs::write(&path, &file.content).map_err(|e| CompilerError::io(&path, e.to_string()))?;
        }

        Ok(())
    }
}
