//! Tree scanner: finds `{Name: ...}`-only objects nested under qualifying keys.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::types::UnresolvedRef;

/// Structural rule a node must satisfy to count as an unresolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Trail segments of which at least one must appear above a match.
    pub ancestors: Vec<String>,
    /// The sole key of an unresolved node.
    pub name_key: String,
}

impl Default for Rule {
    /// `Name`-only objects anywhere below `Columns` or `Parameters`.
    fn default() -> Self {
        return Self {
            ancestors: vec!["Columns".to_string(), "Parameters".to_string()],
            name_key: "Name".to_string(),
        };
    }
}

/// Walks a parsed document depth-first and collects unresolved references.
/// Total over every JSON shape; there is no failure path.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    /// Predicate applied to every object node.
    rule: Rule,
}

impl Scanner {
    /// Create a scanner for the given rule.
    pub const fn new(rule: Rule) -> Self {
        return Self { rule };
    }

    /// Append every unresolved reference at or below `node` to `found`.
    ///
    /// Pre-order: an object is tested before its children, object keys are
    /// visited in parse order and array elements in index order. Recursion
    /// depth is bounded by the JSON decoder's nesting limit.
    pub fn scan(&self, node: &Value, trail: &Trail<'_>, file_id: &str, found: &mut Vec<UnresolvedRef>) {
        match node {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.scan(item, &trail.child(index.to_string()), file_id, found);
                }
            },
            Value::Object(map) => {
                if let Some(name) = self.unresolved_name(map, trail) {
                    // Reported down to the `Name` field itself, then its value.
                    let name_field = trail.child(self.rule.name_key.as_str());
                    found.push(UnresolvedRef {
                        file: file_id.to_string(),
                        trail: name_field.render_with(&name),
                    });
                }
                // A matched node's own `Name` child is still visited.
                for (key, child) in map {
                    self.scan(child, &trail.child(key.as_str()), file_id, found);
                }
            },
            Value::Bool(_) | Value::Null | Value::Number(_) | Value::String(_) => {},
        }
        return;
    }

    /// Scan a whole document from its root.
    pub fn scan_document(&self, document: &Value, file_id: &str) -> Vec<UnresolvedRef> {
        let mut found = Vec::new();
        self.scan(document, &Trail::Root, file_id, &mut found);
        return found;
    }

    /// The stringified name of `map` if it is an unresolved reference at `trail`.
    fn unresolved_name(&self, map: &Map<String, Value>, trail: &Trail<'_>) -> Option<String> {
        if map.len() != 1 {
            return None;
        }
        let name = map.get(&self.rule.name_key)?;
        if !self.rule.ancestors.iter().any(|ancestor| return trail.contains(ancestor)) {
            return None;
        }
        return Some(stringify_name(name));
    }
}

/// Root-to-node path of object keys and array indices.
///
/// Each descent borrows its parent and adds one segment, so a child never
/// mutates the trail its siblings see and nothing is popped on backtrack.
#[derive(Debug)]
pub enum Trail<'a> {
    /// The document root; contributes no segment.
    Root,
    /// One key or index below `parent`.
    Segment {
        /// Object key or decimal array index.
        name: Cow<'a, str>,
        /// Trail of the enclosing node.
        parent: &'a Trail<'a>,
    },
}

impl<'a> Trail<'a> {
    /// Extend this trail by one segment.
    pub fn child<'b>(&'b self, segment: impl Into<Cow<'b, str>>) -> Trail<'b>
    where
        'a: 'b,
    {
        return Trail::Segment {
            name: segment.into(),
            parent: self,
        };
    }

    /// Whether any segment from the root down to here equals `segment` exactly.
    pub fn contains(&self, segment: &str) -> bool {
        return self.segments_leaf_first().any(|s| return s == segment);
    }

    /// Join the trail root-first with `/`, then append `leaf` as a final segment.
    pub fn render_with(&self, leaf: &str) -> String {
        let mut segments: Vec<&str> = self.segments_leaf_first().collect();
        segments.reverse();
        segments.push(leaf);
        return segments.join("/");
    }

    /// Segments from the current node back up to the root.
    fn segments_leaf_first(&self) -> impl Iterator<Item = &str> {
        let mut cursor = Some(self);
        return std::iter::from_fn(move || {
            loop {
                match cursor? {
                    Trail::Root => {
                        cursor = None;
                    },
                    Trail::Segment { name, parent } => {
                        cursor = Some(*parent);
                        return Some(&**name);
                    },
                }
            }
        });
    }
}

/// Render a `Name` value as a trail segment: strings verbatim, anything else as compact JSON.
fn stringify_name(value: &Value) -> String {
    return match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
}
