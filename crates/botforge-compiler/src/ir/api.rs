//! External API profiles.

use serde::{Deserialize, Serialize};

use super::non_empty;

/// How a profile's secret is attached to outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    #[default]
    None,
    ApiKeyHeader,
    ApiKeyQuery,
    BearerToken,
}

impl AuthType {
    /// Whether the profile needs a secret variable at all.
    pub fn requires_secret(self) -> bool {
        !matches!(self, AuthType::None)
    }
}

/// Connection settings for one external API.
///
/// `env_var_key` and `env_var_url` are allocated once when the profile is
/// created (see [`crate::codegen::env::EnvVarAllocator`]) and never renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProfile {
    pub id: String,
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub auth_type: AuthType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_name: Option<String>,
    pub env_var_key: String,
    #[serde(default)]
    pub env_var_url: String,
}

impl ApiProfile {
    pub fn api_key_value(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn api_key_name_value(&self) -> Option<&str> {
        non_empty(&self.api_key_name)
    }

    /// The base-URL variable, if one was declared.
    pub fn env_var_url_value(&self) -> Option<&str> {
        Some(self.env_var_url.as_str()).filter(|s| !s.trim().is_empty())
    }
}
