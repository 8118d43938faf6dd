//! Element definitions for the narrative graph.

mod connection;
mod content;
mod node;
mod node_type;

pub use connection::*;
pub use content::*;
pub use node::*;
pub use node_type::*;

use serde::{Deserialize, Serialize};

/// Handle of a node inside a [`crate::NarrativeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub usize);

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Handle of a connection inside a [`crate::NarrativeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionHandle(pub usize);

impl std::fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "connection#{}", self.0)
    }
}

/// Identity shared by everything stored in a project: an immutable
/// identifier and a mutable, non-unique display label.
pub trait Element {
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    fn set_label(&mut self, label: String);
}

/// First element (in slice order) with the given identifier.
///
/// Identifiers are not checked for uniqueness; on collision the first wins.
pub fn find_by_id<'a, T: Element>(elements: &'a [T], id: &str) -> Option<(usize, &'a T)> {
    elements.iter().enumerate().find(|(_, element)| element.id() == id)
}

/// First element (in slice order) with exactly the given label.
pub fn find_by_label<'a, T: Element>(elements: &'a [T], label: &str) -> Option<(usize, &'a T)> {
    elements
        .iter()
        .enumerate()
        .find(|(_, element)| element.label() == label)
}

/// Whether a connection label counts as an authored choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelFilter {
    /// Non-blank label.
    Labeled,
    /// Empty or whitespace-only label.
    Unlabeled,
}

impl LabelFilter {
    pub fn accepts(&self, label: &str) -> bool {
        let blank = label.trim().is_empty();
        match self {
            LabelFilter::Labeled => !blank,
            LabelFilter::Unlabeled => blank,
        }
    }
}
