//! Response snippet synthesis from field mappings.
//!
//! A snippet is the body of an async function that receives `apiResponse`
//! (a fetch `Response`) and returns a Discord message payload. Two styles
//! exist:
//!
//! - [`SnippetStyle::Plain`] is the form shown to users as a preview: direct
//!   property access, `{value}` replaced once, every line always emitted.
//! - [`SnippetStyle::Guarded`] is what generated projects embed: optional
//!   chaining, every `{value}` and `{<mapped path>}` substituted, and lines
//!   whose values are `null`/`undefined` skipped.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::js::{self, CodeBuilder};
use super::messages::Messages;
use super::naming::{field_binding_base, BindingAllocator};
use crate::config::Locale;
use crate::ir::{FieldMapping, ResponseTemplate};

/// Snippet used when no fields are mapped: the whole response as JSON.
pub const RAW_JSON_FALLBACK: &str = "// API応答を処理してDiscord応答を返す
const data = await apiResponse.json();
return {
  content: JSON.stringify(data, null, 2)
};";

/// Embed title and accent colour.
const EMBED_TITLE: &str = "API Response";
const EMBED_COLOR: &str = "0x5865F2";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnippetStyle {
    #[default]
    Plain,
    Guarded,
}

/// Plain-style snippet for `mappings` rendered with `template`.
pub fn generate(mappings: &[FieldMapping], template: ResponseTemplate) -> String {
    generate_with(mappings, template, SnippetStyle::Plain, Locale::default())
}

/// Snippet in the given style. `locale` selects the guarded style's
/// no-data reply.
pub fn generate_with(
    mappings: &[FieldMapping],
    template: ResponseTemplate,
    style: SnippetStyle,
    locale: Locale,
) -> String {
    if mappings.is_empty() {
        return RAW_JSON_FALLBACK.to_string();
    }

    let bound = Bindings::new(mappings, style);
    let mut b = CodeBuilder::new();
    b.line("const data = await apiResponse.json();");
    for (binding, accessor) in &bound.declarations {
        b.line(format!("const {} = {};", binding, accessor));
    }

    let no_data = Messages::for_locale(locale).no_data;
    match (style, template) {
        (SnippetStyle::Plain, ResponseTemplate::SimpleText) => plain_text(&mut b, &bound, ", ", |label| {
            format!("{}: ", js::template_text(label))
        }),
        (SnippetStyle::Plain, ResponseTemplate::MultiLine) => plain_text(&mut b, &bound, "\\n", |label| {
            format!("**{}**: ", js::template_text(label))
        }),
        (SnippetStyle::Plain, ResponseTemplate::Embed) => plain_embed(&mut b, &bound),
        (SnippetStyle::Plain, ResponseTemplate::JsonFormatted) => plain_json(&mut b, &bound),
        (SnippetStyle::Guarded, ResponseTemplate::SimpleText) => {
            guarded_text(&mut b, &bound, "', '", no_data, |label| format!("{}: ", js::template_text(label)))
        }
        (SnippetStyle::Guarded, ResponseTemplate::MultiLine) => {
            guarded_text(&mut b, &bound, "'\\n'", no_data, |label| {
                format!("**{}**: ", js::template_text(label))
            })
        }
        (SnippetStyle::Guarded, ResponseTemplate::Embed) => guarded_embed(&mut b, &bound),
        (SnippetStyle::Guarded, ResponseTemplate::JsonFormatted) => guarded_json(&mut b, &bound),
    }

    b.finish().trim_end().to_string()
}

/// One mapping with its resolved binding.
struct Bound<'a> {
    mapping: &'a FieldMapping,
    binding: String,
}

struct Bindings<'a> {
    items: Vec<Bound<'a>>,
    /// `(binding, accessor)` in first-use order, one per distinct path.
    declarations: Vec<(String, String)>,
    by_path: HashMap<&'a str, String>,
    style: SnippetStyle,
}

impl<'a> Bindings<'a> {
    fn new(mappings: &'a [FieldMapping], style: SnippetStyle) -> Self {
        let optional = style == SnippetStyle::Guarded;
        let mut allocator = BindingAllocator::new();
        let mut by_path: HashMap<&'a str, String> = HashMap::new();
        let mut declarations = Vec::new();
        let mut items = Vec::with_capacity(mappings.len());

        for mapping in mappings {
            let binding = match by_path.get(mapping.field_path.as_str()) {
                Some(existing) => existing.clone(),
                None => {
                    let binding = allocator.allocate(&field_binding_base(&mapping.field_path));
                    declarations.push((
                        binding.clone(),
                        js::path_accessor("data", &mapping.field_path, optional),
                    ));
                    by_path.insert(mapping.field_path.as_str(), binding.clone());
                    binding
                }
            };
            items.push(Bound { mapping, binding });
        }

        Self {
            items,
            declarations,
            by_path,
            style,
        }
    }

    /// Renders a mapping's format string as template-literal text.
    fn format(&self, item: &Bound<'_>) -> Formatted {
        let format = if item.mapping.format_string.is_empty() {
            "{value}"
        } else {
            item.mapping.format_string.as_str()
        };
        match self.style {
            SnippetStyle::Plain => format_first_value(format, &item.binding),
            SnippetStyle::Guarded => self.format_placeholders(format, &item.binding),
        }
    }

    /// Single left-to-right pass; substituted text is never rescanned.
    fn format_placeholders(&self, format: &str, own: &str) -> Formatted {
        let mut text = String::new();
        let mut refs: Vec<String> = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(format) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let binding = match inner.as_str() {
                "value" => Some(own),
                path => self.by_path.get(path).map(String::as_str),
            };
            if let Some(binding) = binding {
                text.push_str(&js::template_text(&format[last..whole.start()]));
                text.push_str(&format!("${{{}}}", binding));
                if !refs.iter().any(|r| r == binding) {
                    refs.push(binding.to_string());
                }
                last = whole.end();
            }
        }
        text.push_str(&js::template_text(&format[last..]));
        Formatted { text, refs }
    }
}

struct Formatted {
    /// Escaped template-literal body.
    text: String,
    /// Bindings the text interpolates.
    refs: Vec<String>,
}

impl Formatted {
    /// `a != null && b != null`, or `None` when nothing is referenced.
    fn guard(&self) -> Option<String> {
        if self.refs.is_empty() {
            return None;
        }
        Some(
            self.refs
                .iter()
                .map(|r| format!("{} != null", r))
                .collect::<Vec<_>>()
                .join(" && "),
        )
    }
}

fn format_first_value(format: &str, binding: &str) -> Formatted {
    match format.find("{value}") {
        Some(at) => Formatted {
            text: format!(
                "{}${{{}}}{}",
                js::template_text(&format[..at]),
                binding,
                js::template_text(&format[at + "{value}".len()..])
            ),
            refs: vec![binding.to_string()],
        },
        None => Formatted {
            text: js::template_text(format),
            refs: Vec::new(),
        },
    }
}

/// Double-quoted literal for labels, matching the preview's JSON look.
fn label_literal(label: &str) -> String {
    serde_json::to_string(label).unwrap_or_else(|_| js::string_literal(label))
}

fn plain_text(b: &mut CodeBuilder, bound: &Bindings<'_>, separator: &str, prefix: impl Fn(&str) -> String) {
    let parts: Vec<String> = bound
        .items
        .iter()
        .map(|item| format!("{}{}", prefix(&item.mapping.display_label), bound.format(item).text))
        .collect();
    b.blank();
    b.block("return {", "};", |b| {
        b.line(format!("content: `{}`", parts.join(separator)));
    });
}

fn plain_embed(b: &mut CodeBuilder, bound: &Bindings<'_>) {
    b.blank();
    b.block("return {", "};", |b| {
        b.block("embeds: [{", "}]", |b| {
            b.line(format!("title: \"{}\",", EMBED_TITLE));
            b.line(format!("color: {},", EMBED_COLOR));
            b.block("fields: [", "],", |b| {
                let last = bound.items.len() - 1;
                for (i, item) in bound.items.iter().enumerate() {
                    let comma = if i < last { "," } else { "" };
                    b.block("{", format!("}}{}", comma), |b| {
                        b.line(format!("name: {},", label_literal(&item.mapping.display_label)));
                        b.line(format!("value: `{}`,", bound.format(item).text));
                        b.line("inline: true");
                    });
                }
            });
            b.line("timestamp: new Date().toISOString()");
        });
    });
}

fn plain_json(b: &mut CodeBuilder, bound: &Bindings<'_>) {
    b.blank();
    b.block("const selectedData = {", "};", |b| {
        let last = bound.items.len() - 1;
        for (i, item) in bound.items.iter().enumerate() {
            let comma = if i < last { "," } else { "" };
            b.line(format!("{}: {}{}", label_literal(&item.mapping.display_label), item.binding, comma));
        }
    });
    json_return(b);
}

fn json_return(b: &mut CodeBuilder) {
    b.blank();
    b.block("return {", "};", |b| {
        b.line(r#"content: "```json\n" + JSON.stringify(selectedData, null, 2) + "\n```""#);
    });
}

fn push_guarded(b: &mut CodeBuilder, guard: Option<String>, statement: String) {
    match guard {
        Some(condition) => b.line(format!("if ({}) {}", condition, statement)),
        None => b.line(statement),
    };
}

fn guarded_text(
    b: &mut CodeBuilder,
    bound: &Bindings<'_>,
    separator: &str,
    no_data: &str,
    prefix: impl Fn(&str) -> String,
) {
    b.blank();
    b.line("const parts = [];");
    for item in &bound.items {
        let formatted = bound.format(item);
        let statement = format!(
            "parts.push(`{}{}`);",
            prefix(&item.mapping.display_label),
            formatted.text
        );
        push_guarded(b, formatted.guard(), statement);
    }
    b.blank();
    b.block("return {", "};", |b| {
        b.line(format!(
            "content: parts.length > 0 ? parts.join({}) : {}",
            separator,
            js::string_literal(no_data)
        ));
    });
}

fn guarded_embed(b: &mut CodeBuilder, bound: &Bindings<'_>) {
    b.blank();
    b.line("const fields = [];");
    for item in &bound.items {
        let formatted = bound.format(item);
        let statement = format!(
            "fields.push({{ name: {}, value: `{}`, inline: true }});",
            label_literal(&item.mapping.display_label),
            formatted.text
        );
        push_guarded(b, formatted.guard(), statement);
    }
    b.blank();
    b.block("return {", "};", |b| {
        b.block("embeds: [{", "}]", |b| {
            b.line(format!("title: \"{}\",", EMBED_TITLE));
            b.line(format!("color: {},", EMBED_COLOR));
            b.line("fields,");
            b.line("timestamp: new Date().toISOString()");
        });
    });
}

fn guarded_json(b: &mut CodeBuilder, bound: &Bindings<'_>) {
    b.blank();
    b.line("const selectedData = {};");
    for item in &bound.items {
        b.line(format!(
            "if ({binding} != null) selectedData[{}] = {binding};",
            label_literal(&item.mapping.display_label),
            binding = item.binding
        ));
    }
    json_return(b);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Vec<FieldMapping> {
        vec![
            FieldMapping::new("main.temp", "気温", "{value}°C"),
            FieldMapping::new("weather[0].description", "説明", "{value}"),
        ]
    }

    #[test]
    fn empty_mappings_yield_raw_json_fallback() {
        for template in ResponseTemplate::ALL {
            assert_eq!(generate(&[], template), RAW_JSON_FALLBACK);
            assert_eq!(
                generate_with(&[], template, SnippetStyle::Guarded, Locale::En),
                RAW_JSON_FALLBACK
            );
        }
    }

    #[test]
    fn plain_simple_text() {
        let code = generate(&weather(), ResponseTemplate::SimpleText);
        assert_eq!(
            code,
            "const data = await apiResponse.json();\n\
             const mainTemp = data.main.temp;\n\
             const weatherDescription = data.weather[0].description;\n\
             \n\
             return {\n  content: `気温: ${mainTemp}°C, 説明: ${weatherDescription}`\n};"
        );
    }

    #[test]
    fn plain_multi_line_joins_with_escaped_newline() {
        let code = generate(&weather(), ResponseTemplate::MultiLine);
        assert!(code.contains(r"content: `**気温**: ${mainTemp}°C\n**説明**: ${weatherDescription}`"));
    }

    #[test]
    fn plain_embed_has_inline_fields() {
        let code = generate(&weather(), ResponseTemplate::Embed);
        assert!(code.contains("title: \"API Response\","));
        assert!(code.contains("color: 0x5865F2,"));
        assert!(code.contains("name: \"気温\","));
        assert!(code.contains("value: `${mainTemp}°C`,"));
        assert!(code.contains("      },\n"));
        assert!(code.contains("timestamp: new Date().toISOString()"));
    }

    #[test]
    fn plain_json_formatted() {
        let code = generate(&weather(), ResponseTemplate::JsonFormatted);
        assert!(code.contains("  \"気温\": mainTemp,\n  \"説明\": weatherDescription\n};"));
        assert!(code.contains(r#"content: "```json\n" + JSON.stringify(selectedData, null, 2) + "\n```""#));
    }

    #[test]
    fn plain_replaces_only_first_value() {
        let mappings = vec![FieldMapping::new("n", "N", "{value} and {value}")];
        let code = generate(&mappings, ResponseTemplate::SimpleText);
        assert!(code.contains("`N: ${n} and {value}`"));
    }

    #[test]
    fn format_without_value_is_verbatim() {
        let mappings = vec![FieldMapping::new("ok", "OK", r#"{value} ? "はい" : "いいえ""#)];
        let code = generate(&mappings, ResponseTemplate::SimpleText);
        assert!(code.contains(r#"`OK: ${ok} ? "はい" : "いいえ"`"#));

        let mappings = vec![FieldMapping::new("x", "X", "fixed")];
        let code = generate(&mappings, ResponseTemplate::SimpleText);
        assert!(code.contains("`X: fixed`"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mappings = vec![FieldMapping::new("a", "lbl`${x}", "`{value}` \\")];
        let code = generate(&mappings, ResponseTemplate::SimpleText);
        assert!(code.contains(r"`lbl\`\${x}: \`${a}\` \\`"));
    }

    #[test]
    fn colliding_bindings_are_suffixed() {
        let mappings = vec![
            FieldMapping::new("a.main.temp", "A", "{value}"),
            FieldMapping::new("b.main.temp", "B", "{value}"),
            FieldMapping::new("data", "D", "{value}"),
        ];
        let code = generate(&mappings, ResponseTemplate::SimpleText);
        assert!(code.contains("const mainTemp = data.a.main.temp;"));
        assert!(code.contains("const mainTemp2 = data.b.main.temp;"));
        assert!(code.contains("const data2 = data.data;"));
    }

    #[test]
    fn guarded_skips_missing_values() {
        let code = generate_with(&weather(), ResponseTemplate::SimpleText, SnippetStyle::Guarded, Locale::Ja);
        assert!(code.contains("const mainTemp = data?.main?.temp;"));
        assert!(code.contains("const weatherDescription = data?.weather?.[0]?.description;"));
        assert!(code.contains("if (mainTemp != null) parts.push(`気温: ${mainTemp}°C`);"));
        assert!(code.contains("parts.join(', ')"));
        assert!(code.contains("'表示できるデータがありません。'"));
    }

    #[test]
    fn guarded_substitutes_other_mapped_paths_once() {
        let mappings = vec![
            FieldMapping::new("main.temp", "Temp", "{value} (max {main.temp_max}) {unknown}"),
            FieldMapping::new("main.temp_max", "Max", "{value}"),
        ];
        let code = generate_with(&mappings, ResponseTemplate::SimpleText, SnippetStyle::Guarded, Locale::En);
        assert!(code.contains(
            "if (mainTemp != null && mainTemp_max != null) parts.push(`Temp: ${mainTemp} (max ${mainTemp_max}) {unknown}`);"
        ));
        assert!(code.contains("'No data to display.'"));
    }

    #[test]
    fn guarded_embed_and_json() {
        let embed = generate_with(&weather(), ResponseTemplate::Embed, SnippetStyle::Guarded, Locale::Ja);
        assert!(embed.contains(
            "if (mainTemp != null) fields.push({ name: \"気温\", value: `${mainTemp}°C`, inline: true });"
        ));
        assert!(embed.contains("    fields,\n"));

        let json = generate_with(&weather(), ResponseTemplate::JsonFormatted, SnippetStyle::Guarded, Locale::Ja);
        assert!(json.contains("if (mainTemp != null) selectedData[\"気温\"] = mainTemp;"));
    }

    #[test]
    fn mapped_keys_never_shadow_globals() {
        let mappings = vec![FieldMapping::new("JSON", "Payload", "{value}")];
        let code = generate_with(&mappings, ResponseTemplate::JsonFormatted, SnippetStyle::Guarded, Locale::En);
        assert!(code.contains("const JSON2 = data?.JSON;"));
        assert!(code.contains("selectedData[\"Payload\"] = JSON2;"));
        assert!(code.contains("JSON.stringify(selectedData, null, 2)"));
    }

    #[test]
    fn every_template_produces_a_return() {
        for style in [SnippetStyle::Plain, SnippetStyle::Guarded] {
            for template in ResponseTemplate::ALL {
                let code = generate_with(&weather(), template, style, Locale::Ja);
                assert!(code.starts_with("const data = await apiResponse.json();"));
                assert!(code.contains("return {"));
                assert!(code.ends_with("};"));
            }
        }
    }
}
