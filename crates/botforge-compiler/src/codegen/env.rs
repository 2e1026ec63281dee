//! Environment variable registry.
//!
//! Profile variable names are allocated once, when a profile is created,
//! and stored on the profile. Generation only reads them back, so
//! regenerating a project never renames an existing variable.

use std::collections::HashSet;
use std::fmt;

use rand::RngCore;

use crate::ir::{ApiProfile, BotConfig, DeploymentType, EnvVariable};

pub const API_KEY_PREFIX: &str = "BOT_API_KEY";
pub const BASE_URL_PREFIX: &str = "BOT_BASE_URL";

pub const APPLICATION_ID: &str = "DISCORD_APPLICATION_ID";
pub const PUBLIC_KEY: &str = "DISCORD_PUBLIC_KEY";
pub const BOT_TOKEN: &str = "DISCORD_BOT_TOKEN";
pub const REGISTER_SECRET: &str = "REGISTER_SECRET";

/// `<prefix>_<NN>` with at least two digits.
pub fn env_var_name(prefix: &str, number: usize) -> String {
    format!("{}_{:02}", prefix, number)
}

/// Variable names for one new API profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileVars {
    pub key: String,
    pub url: String,
}

/// Sequential allocator for profile variable names.
#[derive(Debug, Clone)]
pub struct EnvVarAllocator {
    next: usize,
}

impl Default for EnvVarAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvVarAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Continues after the highest number any existing profile uses, so
    /// deleting a profile never causes a later one's names to be reused.
    pub fn resume(profiles: &[ApiProfile]) -> Self {
        let highest = profiles
            .iter()
            .flat_map(|p| {
                [
                    suffix_number(&p.env_var_key, API_KEY_PREFIX),
                    suffix_number(&p.env_var_url, BASE_URL_PREFIX),
                ]
            })
            .flatten()
            .max()
            .unwrap_or(0);
        Self { next: highest + 1 }
    }

    pub fn allocate(&mut self) -> ProfileVars {
        let vars = ProfileVars {
            key: env_var_name(API_KEY_PREFIX, self.next),
            url: env_var_name(BASE_URL_PREFIX, self.next),
        };
        self.next += 1;
        vars
    }
}

fn suffix_number(name: &str, prefix: &str) -> Option<usize> {
    name.strip_prefix(prefix)?.strip_prefix('_')?.parse().ok()
}

/// Random secret gating the Target-A command registration route.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationSecret(String);

impl RegistrationSecret {
    /// 32 random bytes, hex encoded.
    pub fn generate(rng: &mut dyn RngCore) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RegistrationSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RegistrationSecret(..)")
    }
}

struct Entry {
    var: EnvVariable,
    secret: bool,
}

fn entry(key: &str, value: Option<&str>, placeholder: &str, description: String, secret: bool) -> Entry {
    Entry {
        var: EnvVariable {
            key: key.to_string(),
            value: value.unwrap_or(placeholder).to_string(),
            description,
        },
        secret,
    }
}

fn entries(
    bot: &BotConfig,
    deployment: DeploymentType,
    profiles: &[ApiProfile],
    secret: Option<&RegistrationSecret>,
) -> Vec<Entry> {
    let app_id = || {
        entry(
            APPLICATION_ID,
            bot.application_id_value(),
            "your_discord_application_id",
            "Discord application ID".into(),
            false,
        )
    };
    let token = || {
        entry(
            BOT_TOKEN,
            bot.bot_token_value(),
            "your_discord_bot_token",
            "Discord bot token".into(),
            true,
        )
    };

    let mut out = match deployment {
        DeploymentType::InteractionsEndpoint => vec![
            app_id(),
            entry(
                PUBLIC_KEY,
                bot.public_key_value(),
                "your_discord_public_key",
                "Discord public key used to verify interaction signatures".into(),
                false,
            ),
            token(),
            entry(
                REGISTER_SECRET,
                secret.map(RegistrationSecret::as_str),
                "your_register_secret",
                "Secret required to call /api/register".into(),
                true,
            ),
        ],
        DeploymentType::Gateway => vec![token(), app_id()],
    };

    for profile in profiles {
        if profile.auth_type.requires_secret() && !profile.env_var_key.trim().is_empty() {
            out.push(entry(
                &profile.env_var_key,
                profile.api_key_value(),
                "your_api_key",
                format!("API key for {}", profile.name),
                true,
            ));
        }
        if let Some(url_var) = profile.env_var_url_value() {
            let base_url = Some(profile.base_url.as_str()).filter(|u| !u.trim().is_empty());
            out.push(entry(
                url_var,
                base_url,
                "https://api.example.com",
                format!("Base URL for {}", profile.name),
                false,
            ));
        }
    }

    let mut seen = HashSet::new();
    out.retain(|e| {
        let fresh = seen.insert(e.var.key.clone());
        if !fresh {
            tracing::debug!(key = %e.var.key, "duplicate environment variable dropped");
        }
        fresh
    });
    out
}

/// The variable table for a deployment: bot credentials first, then
/// per-profile secrets and base URLs. Keys are unique, first wins.
pub fn build_env_table(
    bot: &BotConfig,
    deployment: DeploymentType,
    profiles: &[ApiProfile],
    secret: Option<&RegistrationSecret>,
) -> Vec<EnvVariable> {
    entries(bot, deployment, profiles, secret)
        .into_iter()
        .map(|e| e.var)
        .collect()
}

/// `KEY=value` lines.
pub fn render_dotenv(vars: &[EnvVariable]) -> String {
    vars.iter()
        .map(|v| format!("{}={}\n", v.key, dotenv_value(&v.value)))
        .collect()
}

/// `.env.example` contents: every variable with its description, secrets
/// left blank.
pub fn render_env_example(bot: &BotConfig, deployment: DeploymentType, profiles: &[ApiProfile]) -> String {
    entries(bot, deployment, profiles, None)
        .into_iter()
        .map(|e| {
            let value = if e.secret { "" } else { e.var.value.as_str() };
            format!("# {}\n{}={}\n", e.var.description, e.var.key, dotenv_value(value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn dotenv_value(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '#' || c == '"') {
        format!(
            "\"{}\"",
            value
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
        )
    } else {
        value.to_string()
    }
}
