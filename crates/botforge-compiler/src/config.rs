//! Compiler configuration and specification loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::CompilerError;
use crate::ir::{DeploymentType, ProjectSpec, ResponseTemplate};
use crate::schema::DEFAULT_MAX_DEPTH;

/// Language of default field labels and of the messages generated bots send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "jp" | "japanese" => Ok(Locale::Ja),
            "en" | "english" => Ok(Locale::En),
            other => Err(format!("unknown locale '{}' (expected ja or en)", other)),
        }
    }
}

/// Options consumed by the code generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodegenOptions {
    /// Template for commands that do not choose one.
    pub default_template: ResponseTemplate,
    pub locale: Locale,
}

/// Configuration for the BotForge compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Directory the generated project is written to.
    pub out_dir: PathBuf,

    /// Overrides `BotConfig::deployment_type` when set.
    pub deployment: Option<DeploymentType>,

    /// Skip caller-side validation (for testing degraded output).
    pub skip_validation: bool,

    /// Maximum JSON nesting depth inspected by schema inference.
    pub max_inference_depth: usize,

    pub codegen: CodegenOptions,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("bot"),
            deployment: None,
            skip_validation: false,
            max_inference_depth: DEFAULT_MAX_DEPTH,
            codegen: CodegenOptions::default(),
        }
    }
}

/// Loads a project specification from a `.json` or `.toml` file.
pub fn load_spec(path: &Path) -> Result<ProjectSpec, CompilerError> {
    let content = std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse_failed = |message: String| CompilerError::SpecParseFailed {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_deref() {
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_failed(e.to_string())),
        Some("toml") => toml::from_str(&content).map_err(|e| parse_failed(e.to_string())),
        _ => Err(CompilerError::UnsupportedSpecFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Writes a specification as pretty JSON.
pub fn save_spec(spec: &ProjectSpec, path: &Path) -> Result<(), CompilerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CompilerError::io(parent, e.to_string()))?;
    }
    let content = serde_json::to_string_pretty(spec).map_err(|e| CompilerError::SpecParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, content + "\n").map_err(|e| CompilerError::io(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ResponseType, OptionType};
    use tempfile::TempDir;

    #[test]
    fn loads_camel_case_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bot.json");
        std::fs::write(
            &path,
            r#"{
                "bot": {"name": "Weather Bot", "description": "Weather", "deploymentType": "GATEWAY"},
                "apiProfiles": [{
                    "id": "p1", "name": "OpenWeather", "baseUrl": "https://api.openweathermap.org/data/2.5",
                    "authType": "API_KEY_QUERY", "apiKeyName": "appid",
                    "envVarKey": "BOT_API_KEY_01", "envVarUrl": "BOT_BASE_URL_01"
                }],
                "commands": [{
                    "id": "c1", "name": "weather", "description": "Weather by ZIP",
                    "responseType": "API_CALL", "apiProfileId": "p1", "apiEndpoint": "weather?zip={zipcode}",
                    "options": [{"name": "zipcode", "description": "ZIP", "type": "string", "required": true}]
                }]
            }"#,
        )
        .unwrap();

        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.bot.deployment_type, DeploymentType::Gateway);
        assert_eq!(spec.commands[0].response_type, ResponseType::ApiCall);
        assert_eq!(spec.commands[0].options[0].option_type, OptionType::String);
        assert_eq!(spec.api_profiles[0].env_var_key, "BOT_API_KEY_01");
    }

    #[test]
    fn loads_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bot.toml");
        std::fs::write(
            &path,
            r#"
[bot]
name = "Greeter"
description = "Says hello"

[[commands]]
id = "1"
name = "hello"
description = "Say hello"
responseType = "STATIC_TEXT"
staticText = "Hello!"
"#,
        )
        .unwrap();

        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.bot.deployment_type, DeploymentType::InteractionsEndpoint);
        assert_eq!(spec.commands[0].static_text_value(), Some("Hello!"));
        assert!(spec.api_profiles.is_empty());
    }

    #[test]
    fn rejects_unknown_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bot.yaml");
        std::fs::write(&path, "bot: {}").unwrap();
        assert!(matches!(load_spec(&path), Err(CompilerError::UnsupportedSpecFormat { .. })));
    }

    #[test]
    fn reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bot.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_spec(&path), Err(CompilerError::SpecParseFailed { .. })));
    }
}
