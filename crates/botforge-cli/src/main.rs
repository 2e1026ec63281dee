//! BotForge CLI.
//!
//! Turns a bot specification into a deployable Discord bot project.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;

use botforge_compiler::codegen::env::render_dotenv;
use botforge_compiler::codegen::snippet::{self, SnippetStyle};
use botforge_compiler::config::{load_spec, save_spec};
use botforge_compiler::ir::{DeploymentType, FieldNode, ResponseTemplate, ResponseType};
use botforge_compiler::schema::{self, SchemaInference, DEFAULT_MAX_DEPTH};
use botforge_compiler::{presets, CodegenOptions, Compiler, CompilerConfig, Locale};

mod logging;
mod ui;

#[derive(Parser)]
#[command(name = "botforge")]
#[command(version, about = "BotForge - compiles bot specifications to Discord bot projects")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter bot.json from a preset
    Init {
        /// Directory to create bot.json in
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Preset id (simple-greeting, fun-games, dog-images, joke-bot)
        #[arg(short, long, default_value = "simple-greeting")]
        preset: String,

        /// Deployment target (interactions or gateway)
        #[arg(short, long, default_value = "interactions")]
        target: DeploymentType,

        /// Overwrite an existing bot.json
        #[arg(long)]
        force: bool,
    },

    /// Validate a specification without generating code
    Check {
        /// Specification file (.json or .toml)
        #[arg(short, long, default_value = "bot.json")]
        spec: PathBuf,
    },

    /// Generate the bot project
    Compile {
        /// Specification file (.json or .toml)
        #[arg(short, long, default_value = "bot.json")]
        spec: PathBuf,

        /// Output directory for the generated project
        #[arg(short, long, default_value = "bot")]
        output: PathBuf,

        /// Override the deployment target from the specification
        #[arg(short, long)]
        target: Option<DeploymentType>,

        /// Template for commands that do not choose one
        #[arg(long, default_value = "simple_text")]
        template: ResponseTemplate,

        /// Language of messages in the generated bot (ja or en)
        #[arg(short, long, default_value = "ja")]
        locale: Locale,

        /// Skip validation
        #[arg(long)]
        skip_validation: bool,
    },

    /// Infer fields from a sample API response
    Infer {
        /// File containing the raw JSON response body
        response: PathBuf,

        /// Show the field hierarchy instead of the flat catalogue
        #[arg(long)]
        tree: bool,

        /// Show default field mappings
        #[arg(long)]
        mappings: bool,

        /// Preview the response snippet for the default mappings
        #[arg(long)]
        template: Option<ResponseTemplate>,

        /// Language of default labels (ja or en)
        #[arg(short, long, default_value = "ja")]
        locale: Locale,

        /// Maximum nesting depth to inspect
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Print the deployment variables as dotenv text
    Env {
        /// Specification file (.json or .toml)
        #[arg(short, long, default_value = "bot.json")]
        spec: PathBuf,

        /// Override the deployment target from the specification
        #[arg(short, long)]
        target: Option<DeploymentType>,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Init {
            path,
            preset,
            target,
            force,
        } => init_project(&path, &preset, target, force),
        Commands::Check { spec } => check_spec(&spec),
        Commands::Compile {
            spec,
            output,
            target,
            template,
            locale,
            skip_validation,
        } => {
            let config = CompilerConfig {
                out_dir: output,
                deployment: target,
                skip_validation,
                codegen: CodegenOptions {
                    default_template: template,
                    locale,
                },
                ..CompilerConfig::default()
            };
            compile_project(&spec, config)
        }
        Commands::Infer {
            response,
            tree,
            mappings,
            template,
            locale,
            max_depth,
        } => infer_fields(&response, tree, mappings, template, locale, max_depth),
        Commands::Env { spec, target } => print_env(&spec, target),
    }
}

fn init_project(path: &Path, preset_id: &str, target: DeploymentType, force: bool) -> miette::Result<()> {
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));

    let preset = presets::find(preset_id).ok_or_else(|| {
        let known: Vec<&str> = presets::PRESETS.iter().map(|p| p.id).collect();
        miette::miette!("Unknown preset '{}'. Available: {}", preset_id, known.join(", "))
    })?;

    let spec_path = path.join("bot.json");
    if spec_path.exists() && !force {
        return Err(miette::miette!(
            help = "Pass --force to overwrite it",
            "{} already exists",
            spec_path.display()
        ));
    }

    save_spec(&preset.spec(target), &spec_path)?;

    ui::success(&format!("Created {} from '{}'", spec_path.display(), preset.name));
    ui::dim(preset.description);
    println!();
    ui::box_header(&format!("{} What's Next", ui::symbols::ARROW));
    ui::box_line("");
    ui::box_line(&format!("   Edit {}", spec_path.display()));
    ui::box_line(&format!("   botforge compile --spec {}", spec_path.display()));
    ui::box_line("");
    ui::box_footer();
    println!();
    Ok(())
}

fn check_spec(spec_path: &Path) -> miette::Result<()> {
    let start = Instant::now();
    let spec = load_spec(spec_path)?;
    let compiler = Compiler::new(CompilerConfig::default());
    tracing::debug!(spec = %spec_path.display(), commands = spec.commands.len(), "checking specification");

    match compiler.check(&spec) {
        Ok(warnings) => {
            for warning in &warnings {
                ui::warning(&warning.to_string());
            }
            ui::looking_good();
            ui::timing("Checked", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            ui::nope_header();
            Err(e.into())
        }
    }
}

fn compile_project(spec_path: &Path, config: CompilerConfig) -> miette::Result<()> {
    let start = Instant::now();
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));

    let spec = load_spec(spec_path)?;
    let output = config.out_dir.clone();
    tracing::info!(spec = %spec_path.display(), out_dir = %output.display(), "compiling bot specification");
    let compiler = Compiler::new(config);

    let spinner = ui::spinner("Generating bot project...");
    let result = compiler.compile(&spec, &mut rand::thread_rng());
    spinner.finish_and_clear();
    let result = result?;
    tracing::info!(
        files = result.generation.files.len(),
        warnings = result.warnings.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "compilation finished"
    );

    for warning in &result.warnings {
        ui::warning(&warning.to_string());
    }
    ui::success(&format!(
        "Generated {} files for {} ({})",
        result.generation.files.len(),
        spec.bot.name,
        result.deployment.label()
    ));
    println!();

    ui::box_header("COMMANDS");
    ui::box_line("");
    for command in &spec.commands {
        let kind = match command.response_type {
            ResponseType::StaticText => "static",
            ResponseType::ApiCall => "api",
        };
        ui::command_line(&command.name, kind, command.options.len());
    }
    ui::box_line("");
    ui::box_footer();
    println!();

    ui::box_header("ENVIRONMENT");
    ui::box_line("");
    for var in &result.generation.env_variables {
        ui::box_line(&format!(" {}", var.key));
    }
    ui::box_line("");
    ui::box_footer();
    println!();

    ui::timing("Done", start.elapsed().as_millis());
    println!();

    let next = match result.deployment {
        DeploymentType::InteractionsEndpoint => "npm install && npm run deploy",
        DeploymentType::Gateway => "npm install && npm start",
    };
    ui::box_header(&format!("{} What's Next", ui::symbols::ARROW));
    ui::box_line("");
    ui::box_line(&format!("   cd {} && {}", output.display(), next));
    ui::box_line("   See README.md for the remaining setup steps");
    ui::box_line("");
    ui::box_footer();
    println!();

    Ok(())
}

fn infer_fields(
    response: &Path,
    tree: bool,
    mappings: bool,
    template: Option<ResponseTemplate>,
    locale: Locale,
    max_depth: usize,
) -> miette::Result<()> {
    let body = std::fs::read_to_string(response).into_diagnostic()?;
    let json = schema::parse_response(&body)?;
    let fields = SchemaInference::new(max_depth).infer(&json);
    tracing::debug!(response = %response.display(), fields = fields.len(), max_depth, "inferred fields");

    if tree {
        let roots = schema::organize_hierarchy(&fields);
        print_tree(&roots, 0);
    } else {
        for field in &fields {
            let sample = field
                .sample_value
                .as_ref()
                .filter(|_| field.field_type.is_selectable())
                .map(|v| ui::truncate(&v.to_string(), 40))
                .unwrap_or_default();
            println!("  {:40} {:9} {}", field.path, field.field_type.as_str(), sample);
        }
    }

    let defaults = schema::default_mappings(&fields, locale);
    if mappings {
        println!();
        ui::info(&format!("{} default mapping(s)", defaults.len()));
        let pretty = serde_json::to_string_pretty(&defaults).into_diagnostic()?;
        println!("{}", pretty);
    }

    if let Some(template) = template {
        println!();
        ui::info(&format!("Snippet preview ({})", template.as_str()));
        println!(
            "{}",
            snippet::generate_with(&defaults, template, SnippetStyle::Plain, locale)
        );
    }
    Ok(())
}

fn print_tree(nodes: &[FieldNode], depth: usize) {
    for (i, node) in nodes.iter().enumerate() {
        ui::tree_item(depth, &node.name, Some(node.field_type.as_str()), i + 1 == nodes.len());
        if let Some(children) = &node.children {
            print_tree(children, depth + 1);
        }
    }
}

fn print_env(spec_path: &Path, target: Option<DeploymentType>) -> miette::Result<()> {
    let spec = load_spec(spec_path)?;
    let compiler = Compiler::new(CompilerConfig {
        deployment: target,
        ..CompilerConfig::default()
    });
    let result = compiler.generate(&spec, &mut rand::thread_rng());
    print!("{}", render_dotenv(&result.env_variables));
    Ok(())
}
