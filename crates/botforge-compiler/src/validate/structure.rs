//! Structural checks mirroring Discord's application command limits.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::CompilerError;
use crate::ir::{CommandOption, ProjectSpec, ResponseType, SlashCommand};

/// Maximum options per command.
pub const MAX_OPTIONS: usize = 25;
/// Maximum description length, in characters.
pub const MAX_DESCRIPTION: usize = 100;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_\p{L}\p{N}]{1,32}$").expect("name regex is valid"));

/// Whether `name` is a valid command or option name.
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name) && name.to_lowercase() == name
}

pub fn validate_structure(spec: &ProjectSpec) -> Result<(), CompilerError> {
    if spec.bot.name.trim().is_empty() {
        return Err(CompilerError::MissingBotName);
    }
    if spec.commands.is_empty() {
        return Err(CompilerError::NoCommands);
    }

    let mut seen = HashSet::new();
    for (index, command) in spec.commands.iter().enumerate() {
        validate_command(index, command)?;
        if !seen.insert(command.name.as_str()) {
            return Err(CompilerError::DuplicateCommand {
                command: command.name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_command(index: usize, command: &SlashCommand) -> Result<(), CompilerError> {
    if command.name.trim().is_empty() {
        return Err(CompilerError::EmptyCommandName { index: index + 1 });
    }
    if !is_valid_name(&command.name) {
        return Err(CompilerError::InvalidCommandName {
            command: command.name.clone(),
        });
    }
    if command.description.trim().is_empty() {
        return Err(CompilerError::EmptyDescription {
            command: command.name.clone(),
        });
    }
    let length = command.description.chars().count();
    if length > MAX_DESCRIPTION {
        return Err(CompilerError::DescriptionTooLong {
            command: command.name.clone(),
            length,
        });
    }
    if command.options.len() > MAX_OPTIONS {
        return Err(CompilerError::TooManyOptions {
            command: command.name.clone(),
            count: command.options.len(),
            max: MAX_OPTIONS,
        });
    }

    validate_options(command)?;

    match command.response_type {
        ResponseType::StaticText if command.static_text_value().is_none() => {
            Err(CompilerError::MissingStaticText {
                command: command.name.clone(),
            })
        }
        ResponseType::ApiCall if command.api_profile_id_value().is_none() => {
            Err(CompilerError::MissingApiBinding {
                command: command.name.clone(),
                field: "apiProfileId",
            })
        }
        ResponseType::ApiCall if command.api_endpoint_value().is_none() => {
            Err(CompilerError::MissingApiBinding {
                command: command.name.clone(),
                field: "apiEndpoint",
            })
        }
        _ => Ok(()),
    }
}

fn validate_options(command: &SlashCommand) -> Result<(), CompilerError> {
    let invalid = |option: &CommandOption, reason: &str| CompilerError::InvalidOption {
        command: command.name.clone(),
        option: option.name.clone(),
        reason: reason.to_string(),
    };

    let mut seen = HashSet::new();
    let mut optional_seen = false;
    for option in &command.options {
        if !is_valid_name(&option.name) {
            return Err(invalid(option, "names are 1-32 lowercase letters, digits, '-' or '_'"));
        }
        if !seen.insert(option.name.as_str()) {
            return Err(invalid(option, "declared more than once"));
        }
        if option.description.trim().is_empty() {
            return Err(invalid(option, "description is empty"));
        }
        if option.description.chars().count() > MAX_DESCRIPTION {
            return Err(invalid(option, "description is longer than 100 characters"));
        }
        if option.required && optional_seen {
            return Err(invalid(option, "required options must come before optional ones"));
        }
        optional_seen |= !option.required;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BotConfig, OptionType};

    fn spec(commands: Vec<SlashCommand>) -> ProjectSpec {
        ProjectSpec {
            bot: BotConfig::new("Bot", ""),
            api_profiles: Vec::new(),
            commands,
        }
    }

    fn option(name: &str, required: bool) -> CommandOption {
        CommandOption {
            name: name.into(),
            description: "An option".into(),
            option_type: OptionType::String,
            required,
        }
    }

    fn hello() -> SlashCommand {
        SlashCommand::static_text("c1", "hello", "Say hi", "Hi")
    }

    #[test]
    fn accepts_a_minimal_spec() {
        assert!(validate_structure(&spec(vec![hello()])).is_ok());
    }

    #[test]
    fn names() {
        assert!(is_valid_name("weather"));
        assert!(is_valid_name("get-user_2"));
        assert!(is_valid_name("天気"));
        assert!(!is_valid_name("Weather"));
        assert!(!is_valid_name("has space"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(&"a".repeat(33)));
    }

    #[test]
    fn rejects_missing_bot_name_and_commands() {
        let mut s = spec(vec![hello()]);
        s.bot.name = "  ".into();
        assert!(matches!(validate_structure(&s), Err(CompilerError::MissingBotName)));
        assert!(matches!(validate_structure(&spec(vec![])), Err(CompilerError::NoCommands)));
    }

    #[test]
    fn rejects_duplicates() {
        let err = validate_structure(&spec(vec![hello(), hello()])).unwrap_err();
        assert!(matches!(err, CompilerError::DuplicateCommand { command } if command == "hello"));
    }

    #[test]
    fn rejects_empty_static_text() {
        let command = SlashCommand::static_text("c1", "hello", "Say hi", "");
        assert!(matches!(
            validate_structure(&spec(vec![command])),
            Err(CompilerError::MissingStaticText { .. })
        ));
    }

    #[test]
    fn rejects_api_call_without_endpoint() {
        let command = SlashCommand::api_call("c1", "weather", "Weather", "p1", "");
        assert!(matches!(
            validate_structure(&spec(vec![command])),
            Err(CompilerError::MissingApiBinding { field: "apiEndpoint", .. })
        ));
    }

    #[test]
    fn rejects_required_after_optional() {
        let command = hello().with_option(option("a", false)).with_option(option("b", true));
        assert!(matches!(
            validate_structure(&spec(vec![command])),
            Err(CompilerError::InvalidOption { option, .. }) if option == "b"
        ));
    }

    #[test]
    fn rejects_too_many_options() {
        let mut command = hello();
        for i in 0..=MAX_OPTIONS {
            command = command.with_option(option(&format!("o{}", i), false));
        }
        assert!(matches!(
            validate_structure(&spec(vec![command])),
            Err(CompilerError::TooManyOptions { count: 26, .. })
        ));
    }

    #[test]
    fn rejects_long_descriptions() {
        let command = SlashCommand::static_text("c1", "hello", "x".repeat(101), "Hi");
        assert!(matches!(
            validate_structure(&spec(vec![command])),
            Err(CompilerError::DescriptionTooLong { length: 101, .. })
        ));
    }
}
