//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised around generation: loading specs, validating them, and
/// writing output. Generation itself is total and never produces one.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(botforge::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Spec Loading Errors
    // =========================================================================
    #[error("Failed to parse bot specification '{}': {message}", path.display())]
    #[diagnostic(
        code(botforge::spec::parse_failed),
        help("The specification must contain `bot`, `apiProfiles` and `commands` keys")
    )]
    SpecParseFailed {
        path: PathBuf,
        message: String,
    },

    #[error("Unsupported specification format: {}", path.display())]
    #[diagnostic(
        code(botforge::spec::unsupported_format),
        help("Use a .json or .toml file")
    )]
    UnsupportedSpecFormat {
        path: PathBuf,
    },

    #[error("Response sample is not valid JSON: {message}")]
    #[diagnostic(
        code(botforge::schema::invalid_json),
        help("Save the raw body returned by the API, without headers")
    )]
    InvalidResponseJson {
        message: String,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("The bot has no name")]
    #[diagnostic(code(botforge::validate::missing_bot_name))]
    MissingBotName,

    #[error("No commands defined")]
    #[diagnostic(
        code(botforge::validate::no_commands),
        help("Add at least one entry to `commands`")
    )]
    NoCommands,

    #[error("Command #{index} has an empty name")]
    #[diagnostic(code(botforge::validate::empty_command_name))]
    EmptyCommandName {
        index: usize,
    },

    #[error("Command '{command}' has an empty description")]
    #[diagnostic(code(botforge::validate::empty_description))]
    EmptyDescription {
        command: String,
    },

    #[error("Description of '{command}' is {length} characters (maximum is 100)")]
    #[diagnostic(code(botforge::validate::description_too_long))]
    DescriptionTooLong {
        command: String,
        length: usize,
    },

    #[error("Invalid command name '{command}'")]
    #[diagnostic(
        code(botforge::validate::invalid_command_name),
        help("Command names are 1-32 characters: lowercase letters, digits, '-' or '_'")
    )]
    InvalidCommandName {
        command: String,
    },

    #[error("Duplicate command name: {command}")]
    #[diagnostic(code(botforge::validate::duplicate_command))]
    DuplicateCommand {
        command: String,
    },

    #[error("Option '{option}' of command '{command}' is invalid: {reason}")]
    #[diagnostic(code(botforge::validate::invalid_option))]
    InvalidOption {
        command: String,
        option: String,
        reason: String,
    },

    #[error("Command '{command}' declares {count} options (maximum is {max})")]
    #[diagnostic(code(botforge::validate::too_many_options))]
    TooManyOptions {
        command: String,
        count: usize,
        max: usize,
    },

    #[error("Command '{command}' responds with static text but has none")]
    #[diagnostic(
        code(botforge::validate::missing_static_text),
        help("Set `staticText`, or switch `responseType` to API_CALL")
    )]
    MissingStaticText {
        command: String,
    },

    #[error("Command '{command}' calls an API but is missing `{field}`")]
    #[diagnostic(
        code(botforge::validate::missing_api_binding),
        help("API_CALL commands need both `apiProfileId` and `apiEndpoint`")
    )]
    MissingApiBinding {
        command: String,
        field: &'static str,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}
