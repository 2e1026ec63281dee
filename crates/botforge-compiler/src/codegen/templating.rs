//! Runtime templating of endpoints and static replies.
//!
//! Both operate on option values only known when the command runs, so the
//! compiler emits JavaScript that performs the substitution rather than
//! substituting itself.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::js;
use super::naming::BindingAllocator;
use crate::ir::CommandOption;

/// `{random(...)}` or any other `{name}` placeholder, in one pass.
static STATIC_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{random\(([^()]*)\)\}|\{([^{}]+)\}").expect("static text regex is valid")
});

/// A declared option and the local it is read into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundOption {
    pub name: String,
    pub binding: String,
}

/// Allocates a local for each option, in declaration order.
pub fn bind_options(options: &[CommandOption], bindings: &mut BindingAllocator) -> Vec<BoundOption> {
    options
        .iter()
        .map(|option| BoundOption {
            name: option.name.clone(),
            binding: bindings.allocate(&option.name),
        })
        .collect()
}

/// Statements rewriting the `endpoint` local, one per option in
/// declaration order. Placeholders without a matching option stay as-is.
pub fn endpoint_replacements(options: &[BoundOption]) -> Vec<String> {
    options
        .iter()
        .map(|option| {
            format!(
                "endpoint = endpoint.replaceAll({}, encodeURIComponent(String({} ?? '')));",
                js::string_literal(&format!("{{{}}}", option.name)),
                option.binding
            )
        })
        .collect()
}

/// A template-literal expression producing the reply for `text`.
///
/// Recognises `{random(a,b)}` with two integers (inclusive range),
/// `{random(x,y,...)}` (random pick) and `{optionName}`. Anything else in
/// braces is kept verbatim.
pub fn static_text_expression(text: &str, options: &[BoundOption]) -> String {
    let mut out = String::from("`");
    let mut last = 0;

    for caps in STATIC_PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if let Some(replacement) = placeholder_expression(&caps, options) {
            out.push_str(&js::template_text(&text[last..whole.start()]));
            out.push_str("${");
            out.push_str(&replacement);
            out.push('}');
            last = whole.end();
        }
    }
    out.push_str(&js::template_text(&text[last..]));
    out.push('`');
    out
}

fn placeholder_expression(caps: &Captures<'_>, options: &[BoundOption]) -> Option<String> {
    if let Some(args) = caps.get(1) {
        return random_expression(args.as_str());
    }
    let name = caps.get(2)?.as_str().trim();
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| format!("{} ?? ''", option.binding))
}

/// Integer range for two integer arguments, otherwise a pick from the list.
fn random_expression(args: &str) -> Option<String> {
    let items: Vec<&str> = args
        .split(',')
        .map(|a| strip_quotes(a.trim()))
        .collect();
    if items.iter().all(|a| a.is_empty()) {
        return None;
    }

    if let [a, b] = items.as_slice() {
        if let (Ok(a), Ok(b)) = (a.parse::<i64>(), b.parse::<i64>()) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            return Some(format!(
                "Math.floor(Math.random() * ({} - {} + 1)) + {}",
                max, min, min
            ));
        }
    }

    let choices: Vec<String> = items.iter().map(|item| js::string_literal(item)).collect();
    Some(format!(
        "[{}][Math.floor(Math.random() * {})]",
        choices.join(", "),
        choices.len()
    ))
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> Vec<BoundOption> {
        vec![BoundOption {
            name: "city".into(),
            binding: "city".into(),
        }]
    }

    #[test]
    fn endpoint_replacement_statements() {
        let statements = endpoint_replacements(&city());
        assert_eq!(
            statements,
            vec!["endpoint = endpoint.replaceAll('{city}', encodeURIComponent(String(city ?? '')));"]
        );
    }

    #[test]
    fn endpoint_replacements_follow_declaration_order() {
        let options = vec![
            BoundOption { name: "b".into(), binding: "b".into() },
            BoundOption { name: "a".into(), binding: "a".into() },
        ];
        let statements = endpoint_replacements(&options);
        assert!(statements[0].contains("'{b}'"));
        assert!(statements[1].contains("'{a}'"));
    }

    #[test]
    fn integer_range() {
        assert_eq!(
            static_text_expression("You rolled {random(1,6)}!", &[]),
            "`You rolled ${Math.floor(Math.random() * (6 - 1 + 1)) + 1}!`"
        );
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        assert_eq!(
            static_text_expression("{random(10, 1)}", &[]),
            "`${Math.floor(Math.random() * (10 - 1 + 1)) + 1}`"
        );
    }

    #[test]
    fn pick_from_list() {
        assert_eq!(
            static_text_expression(r#"{random("rock", "paper", "scissors")}"#, &[]),
            "`${['rock', 'paper', 'scissors'][Math.floor(Math.random() * 3)]}`"
        );
    }

    #[test]
    fn options_and_unknown_placeholders() {
        assert_eq!(
            static_text_expression("Hello {city} and {nobody}", &city()),
            "`Hello ${city ?? ''} and {nobody}`"
        );
    }

    #[test]
    fn mixed_in_document_order() {
        let expr = static_text_expression("{city}: {random(a,b,c)} {random(1,2)}", &city());
        let city_at = expr.find("${city").unwrap();
        let pick_at = expr.find("['a', 'b', 'c']").unwrap();
        let range_at = expr.find("(2 - 1 + 1)").unwrap();
        assert!(city_at < pick_at && pick_at < range_at);
    }

    #[test]
    fn literal_text_is_escaped() {
        assert_eq!(static_text_expression("a `b` ${c}", &[]), r"`a \`b\` \${c}`");
    }

    #[test]
    fn empty_random_is_verbatim() {
        assert_eq!(static_text_expression("{random()}", &[]), "`{random()}`");
    }
}
