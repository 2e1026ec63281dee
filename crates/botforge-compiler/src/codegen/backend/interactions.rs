//! Stateless target: a signature-verified HTTP interactions endpoint.
//!
//! Discord POSTs every interaction to `api/interactions`. Commands are
//! registered out of band through the secret-gated `api/register` route,
//! since there is no long-lived process to do it on startup.

use rand::RngCore;

use super::{FileSet, ProjectBackend};
use crate::codegen::commands::{
    generate_commands_module, generate_definitions_module, COMMANDS_PATH, DEFINITIONS_PATH,
};
use crate::codegen::env::{build_env_table, render_env_example, RegistrationSecret};
use crate::codegen::js;
use crate::codegen::messages::Messages;
use crate::codegen::project;
use crate::config::CodegenOptions;
use crate::ir::{DeploymentType, GenerationResult, ProjectSpec};

pub struct InteractionsBackend {
    secret: RegistrationSecret,
    options: CodegenOptions,
}

impl InteractionsBackend {
    /// Draws a fresh registration secret from `rng`.
    pub fn new(rng: &mut dyn RngCore, options: CodegenOptions) -> Self {
        Self {
            secret: RegistrationSecret::generate(rng),
            options,
        }
    }

    pub fn secret(&self) -> &RegistrationSecret {
        &self.secret
    }
}

impl ProjectBackend for InteractionsBackend {
    fn deployment(&self) -> DeploymentType {
        DeploymentType::InteractionsEndpoint
    }

    fn generate(&self, spec: &ProjectSpec) -> GenerationResult {
        let deployment = self.deployment();
        tracing::debug!(commands = spec.commands.len(), "generating interactions endpoint project");

        let env_variables = build_env_table(&spec.bot, deployment, &spec.api_profiles, Some(&self.secret));
        let messages = Messages::for_locale(self.options.locale);

        let mut files = FileSet::new();
        files.add("api/interactions.js", generate_interactions_handler(messages.request_failed));
        files.add("api/register.js", REGISTER_ROUTE);
        files.add(COMMANDS_PATH, generate_commands_module(spec, &self.options));
        files.add(DEFINITIONS_PATH, generate_definitions_module(spec));
        files.add("package.json", project::generate_package_json(spec, deployment));
        files.add("vercel.json", project::generate_vercel_json());
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

fn generate_interactions_handler(failure_message: &str) -> String {
    format!(
        r#"import {{ InteractionResponseType, InteractionType, verifyKey }} from 'discord-interactions';
import {{ dispatchCommand }} from '../src/commands.js';

// The signature is computed over the exact request bytes.
export const config = {{ api: {{ bodyParser: false }} }};

async function readRawBody(req) {{
  const chunks = [];
  for await (const chunk of req) {{
    chunks.push(typeof chunk === 'string' ? Buffer.from(chunk) : chunk);
  }}
  return Buffer.concat(chunks).toString('utf8');
}}

function collectOptions(interaction) {{
  return Object.fromEntries(
    (interaction.data?.options ?? []).map((option) => [option.name, option.value]),
  );
}}

export default async function handler(req, res) {{
  if (req.method !== 'POST') {{
    res.status(405).json({{ error: 'Method not allowed' }});
    return;
  }}

  const signature = req.headers['x-signature-ed25519'];
  const timestamp = req.headers['x-signature-timestamp'];
  const rawBody = await readRawBody(req);

  const valid =
    signature &&
    timestamp &&
    (await verifyKey(rawBody, signature, timestamp, process.env.DISCORD_PUBLIC_KEY));
  if (!valid) {{
    res.status(401).send('Invalid request signature');
    return;
  }}

  const interaction = JSON.parse(rawBody);

  if (interaction.type === InteractionType.PING) {{
    res.status(200).json({{ type: InteractionResponseType.PONG }});
    return;
  }}

  if (interaction.type === InteractionType.APPLICATION_COMMAND) {{
    let data;
    try {{
      data = await dispatchCommand(interaction.data.name, collectOptions(interaction), process.env);
    }} catch (error) {{
      console.error(`Error handling /${{interaction.data.name}}:`, error);
      data = {{ content: {failure} }};
    }}
    res.status(200).json({{
      type: InteractionResponseType.CHANNEL_MESSAGE_WITH_SOURCE,
      data,
    }});
    return;
  }}

  res.status(400).json({{ error: 'Unknown interaction type' }});
}}
"#,
        failure = js::string_literal(failure_message)
    )
}

const REGISTER_ROUTE: &str = r#"import { commandDefinitions } from '../src/definitions.js';

// Registers the slash commands. Call once after each deployment that
// changes commands, passing REGISTER_SECRET as the x-register-secret
// header or the ?secret= query parameter.
export default async function handler(req, res) {
  const expected = process.env.REGISTER_SECRET;
  const provided = req.headers['x-register-secret'] ?? req.query?.secret;
  if (!expected || provided !== expected) {
    res.status(401).json({ error: 'Unauthorized' });
    return;
  }

  const response = await fetch(
    `https://discord.com/api/v10/applications/${process.env.DISCORD_APPLICATION_ID}/commands`,
    {
      method: 'PUT',
      headers: {
        'Content-Type': 'application/json',
        Authorization: `Bot ${process.env.DISCORD_BOT_TOKEN}`,
      },
      body: JSON.stringify(commandDefinitions),
    },
  );

  if (!response.ok) {
    const detail = await response.text();
    console.error('Failed to register commands:', detail);
    res.status(502).json({ error: 'Failed to register commands', detail });
    return;
  }

  const registered = await response.json();
  res.status(200).json({ registered: registered.length });
}
"#;
