//! Element Tree
//!
//! The capability set the dashboard needs from a document: create, attach,
//! detach and annotate elements, and look up fixed elements by selector.
//!
//! [`Document`] is the in-memory implementation. It serializes to HTML for
//! the server-rendered page and doubles as the test double.

mod document;

pub use document::Document;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle to an element owned by a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(NodeId)
    }
}

/// Element tree operations used by the dashboard
///
/// Node handles that do not belong to the tree are ignored by mutating
/// operations and yield `None` from lookups.
pub trait Dom: Send {
    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent first
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach `child` from `parent`. Returns false if it was not a child.
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool;

    /// Detach every child of `node`
    fn clear_children(&mut self, node: NodeId);

    /// Detach every child of `node` and discard them with their descendants.
    /// Handles into the removed subtrees become invalid.
    fn remove_children(&mut self, node: NodeId);

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Replace the text content of `node`
    fn set_text(&mut self, node: NodeId, text: &str);

    fn text(&self, node: NodeId) -> Option<&str>;

    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> &[NodeId];

    /// First attached element matching a simple selector (`#id`, `.class`
    /// or a tag name), in document order
    fn query(&self, selector: &str) -> Option<NodeId>;
}
