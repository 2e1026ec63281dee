//! Project scaffolding shared by both targets.

use serde_json::{json, Value};

use super::naming::slugify;
use crate::ir::{DeploymentType, EnvVariable, ProjectSpec};

const DEFAULT_DESCRIPTION: &str = "Discord bot generated by BotForge";

/// `package.json`, pretty-printed.
pub fn generate_package_json(spec: &ProjectSpec, deployment: DeploymentType) -> String {
    let description = Some(spec.bot.description.trim())
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION);

    let mut package = json!({
        "name": slugify(&spec.bot.name),
        "version": "1.0.0",
        "private": true,
        "description": description,
        "type": "module",
    });

    let target = match deployment {
        DeploymentType::InteractionsEndpoint => json!({
            "scripts": {
                "dev": "vercel dev",
                "deploy": "vercel deploy --prod"
            },
            "dependencies": {
                "discord-interactions": "^4.1.0"
            },
        }),
        DeploymentType::Gateway => json!({
            "main": "index.js",
            "scripts": {
                "start": "node index.js"
            },
            "dependencies": {
                "discord.js": "^14.16.3",
                "dotenv": "^16.4.5"
            },
        }),
    };
    merge(&mut package, target);
    merge(&mut package, json!({ "engines": { "node": ">=18" } }));

    let mut out = serde_json::to_string_pretty(&package).unwrap_or_default();
    out.push('\n');
    out
}

fn merge(into: &mut Value, from: Value) {
    if let (Value::Object(into), Value::Object(from)) = (into, from) {
        into.extend(from);
    }
}

/// `vercel.json` for the serverless target.
pub fn generate_vercel_json() -> &'static str {
    r#"{
  "functions": {
    "api/*.js": {
      "maxDuration": 10
    }
  }
}
"#
}

pub fn generate_gitignore(deployment: DeploymentType) -> &'static str {
    match deployment {
        DeploymentType::InteractionsEndpoint => {
            "node_modules/\n.vercel/\n.env\n.env.local\n*.log\n"
        }
        DeploymentType::Gateway => "node_modules/\n.env\n*.log\n",
    }
}

fn env_list(vars: &[EnvVariable]) -> String {
    vars.iter()
        .map(|v| format!("- `{}`: {}\n", v.key, v.description))
        .collect()
}

fn command_list(spec: &ProjectSpec) -> String {
    if spec.commands.is_empty() {
        return "_No commands defined._\n".to_string();
    }
    spec.commands
        .iter()
        .map(|c| format!("- `/{}`: {}\n", c.name, c.description))
        .collect()
}

/// Deployment steps, shared by the README and the setup instructions.
fn deploy_steps(deployment: DeploymentType) -> &'static str {
    match deployment {
        DeploymentType::InteractionsEndpoint => {
            r#"1. Deploy with `npm run deploy` (or import the repository in the Vercel dashboard).
2. Add the environment variables above in the Vercel project settings and redeploy.
3. In the Discord Developer Portal, set **Interactions Endpoint URL** to
   `https://<your-deployment>/api/interactions`.
4. Register the slash commands once:

   ```bash
   curl -X POST -H "x-register-secret: $REGISTER_SECRET" https://<your-deployment>/api/register
   ```

The bot is shown as offline in Discord. It still answers commands, because
Discord delivers every interaction to the endpoint over HTTP.
"#
        }
        DeploymentType::Gateway => {
            r#"1. Copy `.env.example` to `.env` and fill in the values.
2. Start the bot with `npm start`. Commands are registered automatically
   when the bot connects.
3. Keep the process running (a VPS, a container, or any always-on host).
"#
        }
    }
}

/// `README.md` for the generated project.
pub fn generate_readme(spec: &ProjectSpec, deployment: DeploymentType, vars: &[EnvVariable]) -> String {
    let description = Some(spec.bot.description.trim())
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION);

    format!(
        r#"# {name}

{description}

Deployment: {target}

## Commands

{commands}
## Setup

Install dependencies:

```bash
npm install
```

### Environment variables

{env}
### Deploy

{steps}
---

Generated by BotForge.
"#,
        name = spec.bot.name,
        description = description,
        target = deployment.label(),
        commands = command_list(spec),
        env = env_list(vars),
        steps = deploy_steps(deployment),
    )
}

/// Human setup instructions returned alongside the files.
pub fn generate_setup_instructions(deployment: DeploymentType, vars: &[EnvVariable]) -> String {
    let values: String = vars
        .iter()
        .map(|v| format!("### {}\n{}\nValue: `{}`\n\n", v.key, v.description, v.value))
        .collect();

    format!(
        r#"# Discord bot setup ({target})

## 1. Install dependencies

```bash
npm install
```

## 2. Configure environment variables

{values}## 3. Deploy

{steps}"#,
        target = deployment.label(),
        values = values,
        steps = deploy_steps(deployment),
    )
}
