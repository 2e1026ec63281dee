//! JavaScript source building with escaping.
//!
//! Every piece of user text (names, descriptions, labels, static replies)
//! reaches generated code through one of the escaping helpers here, never by
//! raw interpolation.

use crate::schema::path::{self, PathSegment};

/// Quotes `s` as a single-quoted JavaScript string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Escapes literal text for use between backticks of a template literal.
///
/// Line breaks become `\n` escapes so generated code can be re-indented
/// without altering string contents.
pub fn template_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Text safe inside a `//` line comment: every JavaScript line terminator
/// becomes a space.
pub fn comment_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => ' ',
            c => c,
        })
        .collect()
}

/// Whether `s` can be written as a bare identifier or property name.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => chars.all(is_identifier_part),
        _ => false,
    }
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

pub(crate) fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit() || (!c.is_ascii() && c.is_numeric())
}

/// `object.key`, or `object['key']` when `key` is not an identifier.
pub fn member(object: &str, key: &str) -> String {
    if is_identifier(key) {
        format!("{}.{}", object, key)
    } else {
        format!("{}[{}]", object, string_literal(key))
    }
}

/// Property access for a catalogue path rooted at `root`.
///
/// With `optional`, every step uses optional chaining so a missing
/// intermediate object yields `undefined` instead of throwing.
pub fn path_accessor(root: &str, field_path: &str, optional: bool) -> String {
    let mut out = root.to_string();
    for segment in path::parse(field_path) {
        if optional {
            out.push('?');
        }
        match segment {
            PathSegment::Key(key) if is_identifier(key) => {
                out.push('.');
                out.push_str(key);
            }
            PathSegment::Key(key) => {
                if optional {
                    out.push('.');
                }
                out.push('[');
                out.push_str(&string_literal(key));
                out.push(']');
            }
            PathSegment::Index(i) => {
                if optional {
                    out.push('.');
                }
                out.push_str(&format!("[{}]", i));
            }
        }
    }
    out
}

/// Line-oriented builder for generated source with two-space indentation.
#[derive(Debug, Default)]
pub struct CodeBuilder {
    buf: String,
    depth: usize,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts at `depth` levels of indentation.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            buf: String::new(),
            depth,
        }
    }

    /// Appends one line at the current indentation. Multi-line input is
    /// indented line by line.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        for l in text.as_ref().split('\n') {
            if l.is_empty() {
                self.buf.push('\n');
            } else {
                for _ in 0..self.depth {
                    self.buf.push_str("  ");
                }
                self.buf.push_str(l);
                self.buf.push('\n');
            }
        }
        self
    }

    /// Appends `text` unindented, as written.
    pub fn raw(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(text.as_ref());
        if !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Writes `open`, the body one level deeper, then `close`.
    pub fn block(&mut self, open: impl AsRef<str>, close: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(open);
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line(close)
    }

    /// Runs `body` one level deeper without surrounding lines.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
