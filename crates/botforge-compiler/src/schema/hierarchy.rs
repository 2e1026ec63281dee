//! Tree reconstruction from a flat field catalogue.

use std::collections::HashMap;

use crate::ir::{ApiField, FieldNode};
use super::path::{last_segment, parent_path};

/// Rebuilds the parent/child tree of a catalogue in O(n).
///
/// A field's parent is the field whose path is its own minus the last
/// segment. Fields without a container parent in `fields` become roots, so
/// every field appears exactly once. Sibling order follows `fields`.
pub fn organize_hierarchy(fields: &[ApiField]) -> Vec<FieldNode> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        index.entry(field.path.as_str()).or_insert(i);
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); fields.len()];
    for (i, field) in fields.iter().enumerate() {
        let parent = parent_path(&field.path)
            .and_then(|p| index.get(p).copied())
            .filter(|&p| p != i && fields[p].field_type.is_container());
        match parent {
            Some(p) => children[p].push(i),
            None => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|i| build_node(i, fields, &children))
        .collect()
}

fn build_node(i: usize, fields: &[ApiField], children: &[Vec<usize>]) -> FieldNode {
    let field = &fields[i];
    let kids = field.field_type.is_container().then(|| {
        children[i]
            .iter()
            .map(|&c| build_node(c, fields, children))
            .collect()
    });

    FieldNode {
        path: field.path.clone(),
        name: last_segment(&field.path).to_string(),
        field_type: field.field_type,
        sample_value: field.sample_value.clone(),
        children: kids,
        is_leaf: field.field_type.is_selectable(),
    }
}
