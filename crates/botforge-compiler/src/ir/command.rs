//! Slash command definitions.

use serde::{Deserialize, Serialize};

use super::non_empty;

/// Option value types supported by slash commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    /// Any type string this compiler does not know. Registered as a string.
    #[serde(other)]
    Unknown,
}

impl OptionType {
    /// Discord's numeric application-command option type.
    pub fn type_code(self) -> u8 {
        match self {
            OptionType::String => 3,
            OptionType::Integer => 4,
            OptionType::Boolean => 5,
            OptionType::User => 6,
            OptionType::Channel => 7,
            OptionType::Role => 8,
            OptionType::Unknown => 3,
        }
    }
}

/// A single declared option of a command. Declaration order matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    StaticText,
    ApiCall,
}

/// The output shape used when turning field mappings into response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTemplate {
    #[default]
    SimpleText,
    MultiLine,
    Embed,
    JsonFormatted,
}

impl ResponseTemplate {
    pub const ALL: [ResponseTemplate; 4] = [
        ResponseTemplate::SimpleText,
        ResponseTemplate::MultiLine,
        ResponseTemplate::Embed,
        ResponseTemplate::JsonFormatted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseTemplate::SimpleText => "simple_text",
            ResponseTemplate::MultiLine => "multi_line",
            ResponseTemplate::Embed => "embed",
            ResponseTemplate::JsonFormatted => "json_formatted",
        }
    }
}

impl std::str::FromStr for ResponseTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ResponseTemplate::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown template '{}' (expected simple_text, multi_line, embed or json_formatted)",
                    s
                )
            })
    }
}

/// Pairs a leaf field with a human label and a `{value}` format string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub field_path: String,
    pub display_label: String,
    #[serde(default = "default_format")]
    pub format_string: String,
}

fn default_format() -> String {
    "{value}".to_string()
}

impl FieldMapping {
    pub fn new(
        field_path: impl Into<String>,
        display_label: impl Into<String>,
        format_string: impl Into<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            display_label: display_label.into(),
            format_string: format_string.into(),
        }
    }
}

/// A slash command and how it responds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashCommand {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    pub response_type: ResponseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    /// User-authored response code; wins over `field_mappings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_mappings: Option<Vec<FieldMapping>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_template: Option<ResponseTemplate>,
}

impl SlashCommand {
    /// A command that always answers with `text`.
    pub fn static_text(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            response_type: ResponseType::StaticText,
            static_text: Some(text.into()),
            api_profile_id: None,
            api_endpoint: None,
            code_snippet: None,
            field_mappings: None,
            response_template: None,
        }
    }

    /// A command backed by `GET <profile base URL>/<endpoint>`.
    pub fn api_call(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        profile_id: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            response_type: ResponseType::ApiCall,
            static_text: None,
            api_profile_id: Some(profile_id.into()),
            api_endpoint: Some(endpoint.into()),
            code_snippet: None,
            field_mappings: None,
            response_template: None,
        }
    }

    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_mappings(mut self, mappings: Vec<FieldMapping>) -> Self {
        self.field_mappings = Some(mappings);
        self
    }

    pub fn with_template(mut self, template: ResponseTemplate) -> Self {
        self.response_template = Some(template);
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.code_snippet = Some(snippet.into());
        self
    }

    pub fn static_text_value(&self) -> Option<&str> {
        non_empty(&self.static_text)
    }

    pub fn api_profile_id_value(&self) -> Option<&str> {
        non_empty(&self.api_profile_id)
    }

    pub fn api_endpoint_value(&self) -> Option<&str> {
        non_empty(&self.api_endpoint)
    }

    pub fn code_snippet_value(&self) -> Option<&str> {
        non_empty(&self.code_snippet)
    }

    /// Field mappings, or an empty slice when none were chosen.
    pub fn mappings(&self) -> &[FieldMapping] {
        self.field_mappings.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_codes() {
        assert_eq!(OptionType::String.type_code(), 3);
        assert_eq!(OptionType::Integer.type_code(), 4);
        assert_eq!(OptionType::Boolean.type_code(), 5);
        assert_eq!(OptionType::User.type_code(), 6);
        assert_eq!(OptionType::Channel.type_code(), 7);
        assert_eq!(OptionType::Role.type_code(), 8);
    }

    #[test]
    fn unknown_option_type_registers_as_string() {
        let option: CommandOption = serde_json::from_str(
            r#"{"name":"when","description":"Date","type":"datetime","required":false}"#,
        )
        .unwrap();
        assert_eq!(option.option_type, OptionType::Unknown);
        assert_eq!(option.option_type.type_code(), 3);
    }

    #[test]
    fn block_editor_empty_strings_are_absent() {
        let cmd: SlashCommand = serde_json::from_str(
            r#"{
                "id": "1", "name": "ping", "description": "Ping",
                "responseType": "STATIC_TEXT", "staticText": "pong",
                "apiProfileId": "", "apiEndpoint": "", "codeSnippet": "",
                "options": []
            }"#,
        )
        .unwrap();
        assert_eq!(cmd.static_text_value(), Some("pong"));
        assert_eq!(cmd.api_profile_id_value(), None);
        assert_eq!(cmd.api_endpoint_value(), None);
        assert_eq!(cmd.code_snippet_value(), None);
    }

    #[test]
    fn command_json_round_trips() {
        let cmd = SlashCommand::api_call("7", "weather", "Current weather", "p1", "weather?zip={zipcode}")
            .with_option(CommandOption {
                name: "zipcode".into(),
                description: "ZIP code".into(),
                option_type: OptionType::String,
                required: true,
            })
            .with_mappings(vec![FieldMapping::new("main.temp", "気温", "{value}°C")])
            .with_template(ResponseTemplate::Embed);

        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"responseType\":\"API_CALL\""));
        assert!(json.contains("\"fieldMappings\""));
        let back: SlashCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn template_parses_kebab_and_snake() {
        assert_eq!("multi-line".parse::<ResponseTemplate>(), Ok(ResponseTemplate::MultiLine));
        assert_eq!("JSON_FORMATTED".parse::<ResponseTemplate>(), Ok(ResponseTemplate::JsonFormatted));
        assert!("table".parse::<ResponseTemplate>().is_err());
    }
}
