//! Bot identity and deployment target.

use serde::{Deserialize, Serialize};

use super::non_empty;

/// Which runtime model the generated project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentType {
    /// Stateless, signature-verified HTTP handler (serverless).
    #[default]
    InteractionsEndpoint,
    /// Long-running process holding a gateway connection.
    Gateway,
}

impl DeploymentType {
    pub fn label(self) -> &'static str {
        match self {
            DeploymentType::InteractionsEndpoint => "Interactions Endpoint (serverless)",
            DeploymentType::Gateway => "Gateway (discord.js)",
        }
    }
}

impl std::str::FromStr for DeploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "interactions" | "interactions_endpoint" | "serverless" => {
                Ok(DeploymentType::InteractionsEndpoint)
            }
            "gateway" | "persistent" => Ok(DeploymentType::Gateway),
            other => Err(format!(
                "unknown deployment target '{}' (expected interactions or gateway)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub deployment_type: DeploymentType,
}

impl BotConfig {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            application_id: None,
            public_key: None,
            bot_token: None,
            deployment_type: DeploymentType::default(),
        }
    }

    pub fn application_id_value(&self) -> Option<&str> {
        non_empty(&self.application_id)
    }

    pub fn public_key_value(&self) -> Option<&str> {
        non_empty(&self.public_key)
    }

    pub fn bot_token_value(&self) -> Option<&str> {
        non_empty(&self.bot_token)
    }
}
