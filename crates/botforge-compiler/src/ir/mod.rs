//! Bot specification data model.
//!
//! These types are the contract shared with the UI and the visual editors:
//! they (de)serialize with camelCase keys so a `ProjectSpec` produced by any
//! front-end round-trips through the compiler without loss.

mod api;
mod bot;
mod command;
mod field;
mod output;

pub use api::{ApiProfile, AuthType};
pub use bot::{BotConfig, DeploymentType};
pub use command::{
    CommandOption, FieldMapping, OptionType, ResponseTemplate, ResponseType, SlashCommand,
};
pub use field::{ApiField, FieldNode, FieldType};
pub use output::{EnvVariable, GeneratedFile, GenerationResult};

use serde::{Deserialize, Serialize};

/// The complete compiler input: bot identity, API profiles and commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    pub bot: BotConfig,
    #[serde(default)]
    pub api_profiles: Vec<ApiProfile>,
    #[serde(default)]
    pub commands: Vec<SlashCommand>,
}

impl ProjectSpec {
    /// Looks up an API profile by id.
    pub fn profile(&self, id: &str) -> Option<&ApiProfile> {
        self.api_profiles.iter().find(|p| p.id == id)
    }
}

/// Treats empty or whitespace-only strings as absent.
///
/// The block editor writes `""` for fields that do not apply to a command.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
