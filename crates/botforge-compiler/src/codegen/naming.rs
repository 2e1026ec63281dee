//! Identifier sanitization for generated code and package metadata.

use std::collections::HashSet;

use super::js::{is_identifier_part, is_identifier_start};
use crate::schema::path::{self, PathSegment};

/// Package name used when a bot name has no usable characters.
pub const FALLBACK_SLUG: &str = "discord-bot";

/// JavaScript reserved words, the globals generated code calls, and the
/// names the generated modules declare.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "Infinity", "instanceof", "interface",
    "let", "NaN", "new", "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
    // runtime globals
    "Array", "Boolean", "Buffer", "Date", "Error", "Headers", "JSON", "Math", "Number", "Object",
    "Promise", "String", "URL", "console", "encodeURIComponent", "fetch", "globalThis", "process",
    // module-level names
    "MAX_CONTENT_LENGTH", "buildUrl", "dispatchCommand", "handlers",
    // generated locals
    "apiResponse", "baseUrl", "data", "endpoint", "env", "error", "fields", "headers", "options",
    "parts", "selectedData", "url",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// Lower-cases `name` into an npm-safe package identifier.
///
/// Runs of anything other than ASCII letters and digits collapse into a
/// single `-`; leading and trailing dashes are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(214);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Upper-cases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces characters that cannot appear in an identifier with `_`.
fn sanitize_part(s: &str) -> String {
    s.chars()
        .map(|c| if is_identifier_part(c) { c } else { '_' })
        .collect()
}

/// Turns arbitrary text into a valid identifier.
pub fn sanitize_identifier(s: &str) -> String {
    let cleaned = sanitize_part(s);
    match cleaned.chars().next() {
        None => "_".to_string(),
        Some(c) if !is_identifier_start(c) => format!("_{}", cleaned),
        Some(_) => cleaned,
    }
}

/// `handle` followed by the command name split on `-`/`_`, each segment
/// capitalized.
///
/// `get-user` and `get_user` both yield `handleGetUser`; such collisions are
/// reported by validation, not corrected here.
pub fn handler_name(command_name: &str) -> String {
    let body: String = command_name
        .split(['-', '_'])
        .map(capitalize)
        .collect();
    format!("handle{}", sanitize_part(&body))
}

/// Base binding name for a mapped field: the last two key segments of the
/// path, array indices dropped, camel-cased.
///
/// `weather[0].description` → `weatherDescription`, `main.temp` → `mainTemp`.
pub fn field_binding_base(field_path: &str) -> String {
    let keys: Vec<&str> = path::parse(field_path)
        .into_iter()
        .filter_map(|segment| match segment {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        })
        .collect();

    let tail = &keys[keys.len().saturating_sub(2)..];
    let camel: String = tail
        .iter()
        .enumerate()
        .map(|(i, key)| if i == 0 { key.to_string() } else { capitalize(key) })
        .collect();

    if camel.is_empty() {
        "value".to_string()
    } else {
        sanitize_identifier(&camel)
    }
}

/// Hands out unique bindings within one generated scope.
#[derive(Debug, Default)]
pub struct BindingAllocator {
    used: HashSet<String>,
}

impl BindingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `base` if free, otherwise `base2`, `base3`, ... Reserved
    /// words are never returned unsuffixed.
    pub fn allocate(&mut self, base: &str) -> String {
        let base = sanitize_identifier(base);
        let mut candidate = base.clone();
        let mut n = 2;
        while is_reserved(&candidate) || self.used.contains(&candidate) {
            candidate = format!("{}{}", base, n);
            n += 1;
        }
        if candidate != base {
            tracing::debug!(base = %base, binding = %candidate, "binding renamed to avoid collision");
        }
        self.used.insert(candidate.clone());
        candidate
    }

    /// Marks `name` as taken without allocating it.
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("My Cool Bot"), "my-cool-bot");
        assert_eq!(slugify("  weather_bot!! v2 "), "weather-bot-v2");
        assert_eq!(slugify("天気ボット"), FALLBACK_SLUG);
        assert_eq!(slugify(""), FALLBACK_SLUG);
    }

    #[test]
    fn handler_names() {
        assert_eq!(handler_name("weather"), "handleWeather");
        assert_eq!(handler_name("get-user"), "handleGetUser");
        assert_eq!(handler_name("get_user"), "handleGetUser");
        assert_eq!(handler_name("roll-2d6"), "handleRoll2d6");
        assert_eq!(handler_name("天気"), "handle天気");
    }

    #[test]
    fn field_binding_bases() {
        assert_eq!(field_binding_base("main.temp"), "mainTemp");
        assert_eq!(field_binding_base("weather[0].description"), "weatherDescription");
        assert_eq!(field_binding_base("name"), "name");
        assert_eq!(field_binding_base("a.b.c.d"), "cD");
        assert_eq!(field_binding_base("[0].title"), "title");
        assert_eq!(field_binding_base("root"), "value");
        assert_eq!(field_binding_base("meta.x-rate"), "metaX_rate");
        assert_eq!(field_binding_base("2fa"), "_2fa");
    }

    #[test]
    fn allocator_suffixes_collisions_and_reserved_words() {
        let mut bindings = BindingAllocator::new();
        assert_eq!(bindings.allocate("mainTemp"), "mainTemp");
        assert_eq!(bindings.allocate("mainTemp"), "mainTemp2");
        assert_eq!(bindings.allocate("mainTemp"), "mainTemp3");
        assert_eq!(bindings.allocate("data"), "data2");
        assert_eq!(bindings.allocate("class"), "class2");
    }

    #[test]
    fn allocator_never_shadows_called_globals() {
        let mut bindings = BindingAllocator::new();
        assert_eq!(bindings.allocate("fetch"), "fetch2");
        assert_eq!(bindings.allocate("console"), "console2");
        assert_eq!(bindings.allocate("JSON"), "JSON2");
        assert_eq!(bindings.allocate("buildUrl"), "buildUrl2");
        assert_eq!(bindings.allocate("handlers"), "handlers2");
    }
}
