//! Property change trees
//!
//! A resource's `delta` lists the properties that differ between its before
//! and after states. Structured and array properties nest further changes in
//! `children`, so each entry is the root of a finite tree it owns outright.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::change_type::PropertyChangeType;

/// One node of a property change tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyChange {
    #[serde(default)]
    path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    property_change_type: Option<PropertyChangeType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    after: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<PropertyChange>,
}

impl PropertyChange {
    /// Create a leaf change at `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// With property change type
    #[inline]
    #[must_use]
    pub fn with_type(mut self, change_type: PropertyChangeType) -> Self {
        self.property_change_type = Some(change_type);
        self
    }

    /// With value before the deployment (null leaves it absent)
    #[inline]
    #[must_use]
    pub fn with_before(mut self, value: Value) -> Self {
        self.before = crate::model::present(value);
        self
    }

    /// With value after the deployment (null leaves it absent)
    #[inline]
    #[must_use]
    pub fn with_after(mut self, value: Value) -> Self {
        self.after = crate::model::present(value);
        self
    }

    /// With nested change appended
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: PropertyChange) -> Self {
        self.children.push(child);
        self
    }

    /// Location of the property within the resource (or within the parent)
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// How the property changes, if the service said
    #[inline]
    #[must_use]
    pub fn property_change_type(&self) -> Option<&PropertyChangeType> {
        self.property_change_type.as_ref()
    }

    /// Value before the deployment
    #[inline]
    #[must_use]
    pub fn before(&self) -> Option<&Value> {
        self.before.as_ref()
    }

    /// Value after the deployment
    #[inline]
    #[must_use]
    pub fn after(&self) -> Option<&Value> {
        self.after.as_ref()
    }

    /// Nested changes, in document order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[PropertyChange] {
        &self.children
    }

    /// Check if node has no nested changes
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order iterator over this node and all descendants
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Pre-order iterator yielding each node with its depth (this node is 1)
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(1, self)],
        }
    }

    /// Number of levels in the tree; a leaf has depth 1
    #[must_use]
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth).max().unwrap_or(1)
    }

    /// Number of nodes in the tree, including this one
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// First node in pre-order whose path equals `path`
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&PropertyChange> {
        self.iter().find(|node| node.path == path)
    }

    /// Nodes without nested changes, in pre-order
    pub fn leaves(&self) -> impl Iterator<Item = &PropertyChange> {
        self.iter().filter(|node| node.is_leaf())
    }

    /// Any node in the tree whose type is not recognized
    pub(crate) fn first_unrecognized(&self) -> Option<&PropertyChangeType> {
        self.iter()
            .filter_map(PropertyChange::property_change_type)
            .find(|t| !t.is_recognized())
    }
}

impl<'a> IntoIterator for &'a PropertyChange {
    type Item = &'a PropertyChange;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a property change tree
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a PropertyChange>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PropertyChange;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order iterator yielding `(depth, node)` pairs
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a PropertyChange)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a PropertyChange);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
