//! Persistent target: a long-running discord.js process.

use super::{FileSet, ProjectBackend};
use crate::codegen::commands::{
    generate_commands_module, generate_definitions_module, COMMANDS_PATH, DEFINITIONS_PATH,
};
use crate::codegen::env::{build_env_table, render_env_example};
use crate::codegen::js;
use crate::codegen::messages::Messages;
use crate::codegen::project;
use crate::config::CodegenOptions;
use crate::ir::{DeploymentType, GenerationResult, ProjectSpec};

pub struct GatewayBackend {
    options: CodegenOptions,
}

impl GatewayBackend {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }
}

impl ProjectBackend for GatewayBackend {
    fn deployment(&self) -> DeploymentType {
        DeploymentType::Gateway
    }

    fn generate(&self, spec: &ProjectSpec) -> GenerationResult {
        let deployment = self.deployment();
        tracing::debug!(commands = spec.commands.len(), "generating gateway project");

        let env_variables = build_env_table(&spec.bot, deployment, &spec.api_profiles, None);
        let messages = Messages::for_locale(self.options.locale);

        let mut files = FileSet::new();
        files.add("index.js", generate_entry_point(messages.request_failed));
        files.add(COMMANDS_PATH, generate_commands_module(spec, &self.options));
        files.add(DEFINITIONS_PATH, generate_definitions_module(spec));
        files.add("package.json", project::generate_package_json(spec, deployment));
        files.add(".env.example", render_env_example(&spec.bot, deployment, &spec.api_profiles));
        files.add(".gitignore", project::generate_gitignore(deployment));
        files.add("README.md", project::generate_readme(spec, deployment, &env_variables));

        GenerationResult {
            files: files.into_files(),
            setup_instructions: project::generate_setup_instructions(deployment, &env_variables),
            env_variables,
        }
    }
}

fn generate_entry_point(failure_message: &str) -> String {
    format!(
        r#"import 'dotenv/config';
import {{ Client, Events, GatewayIntentBits, REST, Routes }} from 'discord.js';
import {{ dispatchCommand }} from './src/commands.js';
import {{ commandDefinitions }} from './src/definitions.js';

const token = process.env.DISCORD_BOT_TOKEN;
const applicationId = process.env.DISCORD_APPLICATION_ID;

if (!token || !applicationId) {{
  console.error('DISCORD_BOT_TOKEN and DISCORD_APPLICATION_ID must be set.');
  process.exit(1);
}}

const client = new Client({{ intents: [GatewayIntentBits.Guilds] }});

client.once(Events.ClientReady, async (readyClient) => {{
  console.log(`Logged in as ${{readyClient.user.tag}}`);
  try {{
    const rest = new REST({{ version: '10' }}).setToken(token);
    await rest.put(Routes.applicationCommands(applicationId), {{ body: commandDefinitions }});
    console.log(`Registered ${{commandDefinitions.length}} command(s).`);
  }} catch (error) {{
    console.error('Failed to register commands:', error);
  }}
}});

client.on(Events.InteractionCreate, async (interaction) => {{
  if (!interaction.isChatInputCommand()) return;

  // Any rejection here must stay inside the listener: an unhandled one
  // terminates the process.
  try {{
    await interaction.deferReply();
    const options = Object.fromEntries(
      interaction.options.data.map((option) => [option.name, option.value]),
    );
    const payload = await dispatchCommand(interaction.commandName, options, process.env);
    await interaction.editReply(payload);
  }} catch (error) {{
    console.error(`Error handling /${{interaction.commandName}}:`, error);
    await interaction.editReply({{ content: {failure} }}).catch(console.error);
  }}
}});

client.login(token).catch((error) => {{
  console.error('Failed to log in:', error);
  process.exit(1);
}});
"#,
        failure = js::string_literal(failure_message)
    )
}
