//! Record and tree node types.
//!
//! A `Record` is one flat input row. A `TreeNode` wraps a record with its
//! position in the hierarchy:
//! - Parent back-reference (an arena index, never owning)
//! - Ordered children (input order of records sharing the parent)
//! - Depth (edge count from the root)

use serde::Serialize;
use std::collections::BTreeMap;

/// Stable node identifier within a `Hierarchy`.
///
/// Indexes the hierarchy's node arena in input-record order. It wraps a u32
/// for compact storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Arena index of the node.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One flat input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier.
    pub id: String,
    /// Parent identifier; `None` only for the root.
    pub parent_id: Option<String>,
    /// Auxiliary columns (e.g. `name`), keyed by header.
    pub fields: BTreeMap<String, String>,
}

impl Record {
    /// Create a record with no auxiliary fields.
    pub fn new(id: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.filter(|p| !p.is_empty()).map(str::to_string),
            fields: BTreeMap::new(),
        }
    }

    /// Shorthand for a parentless record.
    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, None)
    }

    /// Shorthand for a record under `parent_id`.
    pub fn child(id: impl Into<String>, parent_id: &str) -> Self {
        Self::new(id, Some(parent_id))
    }

    /// Attach an auxiliary field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up an auxiliary field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Display text: the given column when present and non-empty, else the id.
    pub fn label(&self, label_column: Option<&str>) -> &str {
        label_column
            .and_then(|column| self.field(column))
            .filter(|value| !value.is_empty())
            .unwrap_or(&self.id)
    }
}

/// A record placed in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// The wrapped input row.
    pub record: Record,
    /// Parent node (None for the root).
    pub parent: Option<NodeId>,
    /// Children in input order.
    pub children: Vec<NodeId>,
    /// Distance from the root (root = 0).
    pub depth: u32,
}

impl TreeNode {
    /// Check if this node is the root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The record id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.record.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_index() {
        assert_eq!(NodeId(42).index(), 42);
    }

    #[test]
    fn test_empty_parent_is_root() {
        let record = Record::new("root", Some(""));
        assert_eq!(record.parent_id, None);

        let record = Record::child("a", "root");
        assert_eq!(record.parent_id.as_deref(), Some("root"));
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let record = Record::child("industry1", "root").with_field("name", "Industry One");
        assert_eq!(record.label(Some("name")), "Industry One");
        assert_eq!(record.label(Some("missing")), "industry1");
        assert_eq!(record.label(None), "industry1");

        let blank = Record::root("root").with_field("name", "");
        assert_eq!(blank.label(Some("name")), "root");
    }
}
