//! Field path addressing.
//!
//! Paths look like `main.temp`, `weather[0].description` or `[0].name` (an
//! element of a root array). The bare path `root` addresses the document.

use serde_json::Value;

/// Path recorded for the document itself.
pub const ROOT_PATH: &str = "root";

/// One step of a field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Splits a path into its dot/bracket-delimited segments.
///
/// `root` yields no segments.
pub fn parse(path: &str) -> Vec<PathSegment<'_>> {
    if path == ROOT_PATH {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut rest = path;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let end = after.find(']').unwrap_or(after.len());
            let inner = &after[..end];
            match inner.parse::<usize>() {
                Ok(i) => segments.push(PathSegment::Index(i)),
                Err(_) if !inner.is_empty() => segments.push(PathSegment::Key(inner)),
                Err(_) => {}
            }
            rest = after.get(end + 1..).unwrap_or("");
        } else if let Some(after) = rest.strip_prefix('.') {
            rest = after;
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            segments.push(PathSegment::Key(&rest[..end]));
            rest = &rest[end..];
        }
    }
    segments
}

/// Raw textual segments, array indices included (`a[0].b` → `a`, `0`, `b`).
pub fn segments(path: &str) -> Vec<&str> {
    path.split(['.', '[', ']']).filter(|s| !s.is_empty()).collect()
}

/// The final segment of a path, or the path itself if it has none.
pub fn last_segment(path: &str) -> &str {
    segments(path).last().copied().unwrap_or(path)
}

/// The path with its last `.key` or `[i]` segment removed.
///
/// Returns `None` for single-segment paths.
pub fn parent_path(path: &str) -> Option<&str> {
    let cut = if path.ends_with(']') {
        path.rfind('[')?
    } else {
        path.rfind(['.', '['])?
    };
    Some(&path[..cut]).filter(|p| !p.is_empty())
}

/// Resolves a catalogue path against a document.
pub fn value_by_path<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    parse(path).into_iter().try_fold(json, |current, segment| match (segment, current) {
        (PathSegment::Key(key), Value::Object(map)) => map.get(key),
        (PathSegment::Index(i), Value::Array(items)) => items.get(i),
        (PathSegment::Index(i), Value::Object(map)) => map.get(&i.to_string()),
        _ => None,
    })
}
