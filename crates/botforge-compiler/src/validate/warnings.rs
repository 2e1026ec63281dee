//! Findings that degrade the generated bot without breaking it.

use std::collections::HashMap;
use std::fmt;

use crate::codegen::naming::handler_name;
use crate::ir::{ProjectSpec, ResponseType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Two command names map to the same handler function.
    HandlerCollision {
        first: String,
        second: String,
        handler: String,
    },
    /// The command's profile does not exist; it will answer "not configured".
    MissingProfile { command: String, profile: String },
    /// The endpoint has a `{placeholder}` no option fills.
    UnresolvedPlaceholder { command: String, placeholder: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::HandlerCollision { first, second, handler } => write!(
                f,
                "commands '{}' and '{}' both generate {}; rename one of them",
                first, second, handler
            ),
            ValidationWarning::MissingProfile { command, profile } => write!(
                f,
                "command '{}' uses unknown API profile '{}'; it will reply \"not configured\"",
                command, profile
            ),
            ValidationWarning::UnresolvedPlaceholder { command, placeholder } => write!(
                f,
                "endpoint of '{}' contains {{{}}} but no option has that name",
                command, placeholder
            ),
        }
    }
}

pub fn collect_warnings(spec: &ProjectSpec) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut handlers: HashMap<String, &str> = HashMap::new();

    for command in &spec.commands {
        let handler = handler_name(&command.name);
        match handlers.get(&handler) {
            Some(first) if *first != command.name => {
                warnings.push(ValidationWarning::HandlerCollision {
                    first: first.to_string(),
                    second: command.name.clone(),
                    handler,
                });
            }
            Some(_) => {}
            None => {
                handlers.insert(handler, &command.name);
            }
        }

        if command.response_type != ResponseType::ApiCall {
            continue;
        }
        if let Some(id) = command.api_profile_id_value() {
            if spec.profile(id).is_none() {
                warnings.push(ValidationWarning::MissingProfile {
                    command: command.name.clone(),
                    profile: id.to_string(),
                });
            }
        }
        if let Some(endpoint) = command.api_endpoint_value() {
            for placeholder in placeholders(endpoint) {
                if !command.options.iter().any(|o| o.name == placeholder) {
                    warnings.push(ValidationWarning::UnresolvedPlaceholder {
                        command: command.name.clone(),
                        placeholder: placeholder.to_string(),
                    });
                }
            }
        }
    }
    warnings
}

/// Names inside `{...}` in document order.
fn placeholders(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                if !name.is_empty() && !name.contains('{') {
                    out.push(name);
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BotConfig, CommandOption, OptionType, SlashCommand};

    fn spec(commands: Vec<SlashCommand>) -> ProjectSpec {
        ProjectSpec {
            bot: BotConfig::new("Bot", ""),
            api_profiles: Vec::new(),
            commands,
        }
    }

    #[test]
    fn handler_collisions_are_reported() {
        let warnings = collect_warnings(&spec(vec![
            SlashCommand::static_text("1", "get-user", "d", "x"),
            SlashCommand::static_text("2", "get_user", "d", "x"),
        ]));
        assert_eq!(
            warnings,
            vec![ValidationWarning::HandlerCollision {
                first: "get-user".into(),
                second: "get_user".into(),
                handler: "handleGetUser".into(),
            }]
        );
    }

    #[test]
    fn missing_profile_and_placeholders() {
        let command = SlashCommand::api_call("1", "weather", "d", "nope", "/w?q={city}&u={units}").with_option(
            CommandOption {
                name: "city".into(),
                description: "City".into(),
                option_type: OptionType::String,
                required: true,
            },
        );
        let warnings = collect_warnings(&spec(vec![command]));
        assert_eq!(warnings.len(), 2);
        assert!(matches!(&warnings[0], ValidationWarning::MissingProfile { profile, .. } if profile == "nope"));
        assert!(matches!(
            &warnings[1],
            ValidationWarning::UnresolvedPlaceholder { placeholder, .. } if placeholder == "units"
        ));
    }

    #[test]
    fn placeholder_scan() {
        assert_eq!(placeholders("/a/{b}/c?d={e}"), vec!["b", "e"]);
        assert_eq!(placeholders("no braces"), Vec::<&str>::new());
        assert_eq!(placeholders("{unterminated"), Vec::<&str>::new());
    }
}
