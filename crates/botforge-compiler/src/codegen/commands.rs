//! Generation of the target-independent command modules.
//!
//! `src/commands.js` holds one handler per command plus `dispatchCommand`;
//! `src/definitions.js` holds the registration payload. Both targets import
//! them unchanged. A handler takes `(options, env)`, where `options` maps
//! option names to raw values, and resolves to a Discord message payload.

use serde_json::{json, Value};

use super::auth::{auth_statement, AuthStatement};
use super::js::{self, CodeBuilder};
use super::messages::Messages;
use super::naming::{handler_name, BindingAllocator};
use super::snippet::{self, SnippetStyle, RAW_JSON_FALLBACK};
use super::templating::{bind_options, endpoint_replacements, static_text_expression, BoundOption};
use crate::config::CodegenOptions;
use crate::ir::{ApiProfile, ProjectSpec, ResponseType, SlashCommand};

pub const COMMANDS_PATH: &str = "src/commands.js";
pub const DEFINITIONS_PATH: &str = "src/definitions.js";

/// Discord's CHAT_INPUT application command type.
const CHAT_INPUT: u8 = 1;

/// Message content limit; longer replies are truncated by the dispatcher.
const MAX_CONTENT_LENGTH: usize = 2000;

/// Source of `src/commands.js`.
pub fn generate_commands_module(spec: &ProjectSpec, options: &CodegenOptions) -> String {
    let messages = Messages::for_locale(options.locale);
    let mut b = CodeBuilder::new();
    b.line(format!("// Command handlers for {}.", js::comment_text(&spec.bot.name)));
    b.line("// Generated by BotForge. Edit the bot specification and regenerate instead.");
    b.blank();

    if spec
        .commands
        .iter()
        .any(|c| c.response_type == ResponseType::ApiCall)
    {
        write_build_url(&mut b);
        b.blank();
    }

    for command in &spec.commands {
        let name = handler_name(&command.name);
        match command.response_type {
            ResponseType::StaticText => write_static_handler(&mut b, &name, command),
            ResponseType::ApiCall => {
                match command.api_profile_id_value().and_then(|id| spec.profile(id)) {
                    Some(profile) => write_api_handler(&mut b, &name, command, profile, options),
                    None => {
                        tracing::debug!(
                            command = %command.name,
                            profile = command.api_profile_id_value().unwrap_or(""),
                            "API profile not found, generating a not-configured handler"
                        );
                        write_unconfigured_handler(&mut b, &name, messages.not_configured);
                    }
                }
            }
        }
        b.blank();
    }

    b.block("const handlers = {", "};", |b| {
        for command in &spec.commands {
            b.line(format!(
                "{}: {},",
                js::string_literal(&command.name),
                handler_name(&command.name)
            ));
        }
    });
    b.blank();
    b.line(format!("const MAX_CONTENT_LENGTH = {};", MAX_CONTENT_LENGTH));
    b.blank();
    b.line("/** Runs the handler registered for `name`. */");
    b.block("export async function dispatchCommand(name, options, env) {", "}", |b| {
        b.block("if (!Object.hasOwn(handlers, name)) {", "}", |b| {
            b.line(format!(
                "return {{ content: {} }};",
                js::string_literal(messages.unknown_command)
            ));
        });
        b.line("const payload = await handlers[name](options ?? {}, env);");
        b.block(
            "if (typeof payload?.content === 'string' && payload.content.length > MAX_CONTENT_LENGTH) {",
            "}",
            |b| {
                b.line("payload.content = payload.content.slice(0, MAX_CONTENT_LENGTH - 3) + '...';");
            },
        );
        b.line("return payload;");
    });
    b.finish()
}

fn write_build_url(b: &mut CodeBuilder) {
    b.block("function buildUrl(baseUrl, endpoint) {", "}", |b| {
        b.line(r"const base = (baseUrl ?? '').replace(/\/+$/, '');");
        b.block("if (endpoint.startsWith('?') || endpoint.startsWith('#')) {", "}", |b| {
            b.line("return new URL(base + endpoint);");
        });
        b.line(r"return new URL(base + '/' + endpoint.replace(/^\/+/, ''));");
    });
}

/// Reads every declared option into its own local.
fn write_option_reads(b: &mut CodeBuilder, options: &[BoundOption]) {
    for option in options {
        b.line(format!(
            "const {} = {};",
            option.binding,
            js::member("options", &option.name)
        ));
    }
}

fn write_static_handler(b: &mut CodeBuilder, name: &str, command: &SlashCommand) {
    let mut bindings = BindingAllocator::new();
    let options = bind_options(&command.options, &mut bindings);
    let fallback = format!("Hello from {}", command.name);
    let text = command.static_text_value().unwrap_or(&fallback);

    b.block(format!("async function {}(options, env) {{", name), "}", |b| {
        let referenced: Vec<BoundOption> = options
            .iter()
            .filter(|o| text.contains(&format!("{{{}}}", o.name)))
            .cloned()
            .collect();
        write_option_reads(b, &referenced);
        b.line(format!(
            "return {{ content: {} }};",
            static_text_expression(text, &referenced)
        ));
    });
}

fn write_unconfigured_handler(b: &mut CodeBuilder, name: &str, message: &str) {
    b.block(format!("async function {}(options, env) {{", name), "}", |b| {
        b.line(format!("return {{ content: {} }};", js::string_literal(message)));
    });
}

fn write_api_handler(
    b: &mut CodeBuilder,
    name: &str,
    command: &SlashCommand,
    profile: &ApiProfile,
    codegen: &CodegenOptions,
) {
    let messages = Messages::for_locale(codegen.locale);
    let mut bindings = BindingAllocator::new();
    let options = bind_options(&command.options, &mut bindings);
    let endpoint = command.api_endpoint_value().unwrap_or("");
    let base_url = match profile.env_var_url_value() {
        Some(var) => format!(
            "{} ?? {}",
            js::member("env", var),
            js::string_literal(&profile.base_url)
        ),
        None => js::string_literal(&profile.base_url),
    };
    let auth = auth_statement(profile);

    b.block(format!("async function {}(options, env) {{", name), "}", |b| {
        write_option_reads(b, &options);
        b.block("try {", "} catch (error) {", |b| {
            b.line(format!("let endpoint = {};", js::string_literal(endpoint)));
            for statement in endpoint_replacements(&options) {
                b.line(statement);
            }
            b.line(format!("const url = buildUrl({}, endpoint);", base_url));
            if let Some(AuthStatement::Query(statement)) = &auth {
                b.line(statement);
            }
            b.blank();
            b.line("const headers = new Headers();");
            b.line("headers.set('Content-Type', 'application/json');");
            if let Some(AuthStatement::Header(statement)) = &auth {
                b.line(statement);
            }
            b.blank();
            b.line("const apiResponse = await fetch(url, { method: 'GET', headers });");
            b.block("if (!apiResponse.ok) {", "}", |b| {
                b.line("throw new Error(`API request failed: ${apiResponse.status}`);");
            });
            b.blank();
            b.block("return await (async () => {", "})();", |b| {
                write_response_body(b, command, codegen);
            });
        });
        b.indented(|b| {
            b.line(format!(
                "console.error({}, error);",
                js::string_literal(&format!("Error in {}:", name))
            ));
            b.line(format!(
                "return {{ content: {} }};",
                js::string_literal(messages.request_failed)
            ));
        });
        b.line("}");
    });
}

/// User snippet, else a guarded snippet from the mappings, else raw JSON.
fn write_response_body(b: &mut CodeBuilder, command: &SlashCommand, codegen: &CodegenOptions) {
    if let Some(code) = command.code_snippet_value() {
        b.raw(code);
        return;
    }
    let mappings = command.mappings();
    if mappings.is_empty() {
        b.line(RAW_JSON_FALLBACK);
        return;
    }
    let template = command.response_template.unwrap_or(codegen.default_template);
    b.line(snippet::generate_with(
        mappings,
        template,
        SnippetStyle::Guarded,
        codegen.locale,
    ));
}

/// Registration payload for every command, in declaration order.
pub fn command_definitions(spec: &ProjectSpec) -> Value {
    Value::Array(
        spec.commands
            .iter()
            .map(|command| {
                let options: Vec<Value> = command
                    .options
                    .iter()
                    .map(|option| {
                        json!({
                            "name": option.name,
                            "description": option.description,
                            "type": option.option_type.type_code(),
                            "required": option.required,
                        })
                    })
                    .collect();
                json!({
                    "name": command.name,
                    "description": command.description,
                    "type": CHAT_INPUT,
                    "options": options,
                })
            })
            .collect(),
    )
}

/// Source of `src/definitions.js`.
pub fn generate_definitions_module(spec: &ProjectSpec) -> String {
    let payload = serde_json::to_string_pretty(&command_definitions(spec))
        .unwrap_or_else(|_| "[]".to_string());
    format!(
        "// Slash command definitions registered with Discord.\n\
         // Generated by BotForge.\n\n\
         export const commandDefinitions = {};\n",
        payload
    )
}
