//! Results of a single traversal step.

use corkboard::{ConnectionHandle, NodeHandle};
use serde::{Deserialize, Serialize};

use super::Cursor;
use crate::error::TraversalWarning;

/// How the engine left a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The caller picked a labeled connection.
    Chosen(ConnectionHandle),
    /// No labeled connections; the first outgoing one was followed.
    Automatic(ConnectionHandle),
    /// No outgoing connections; the node's jumper target was used.
    Jumper(NodeHandle),
    /// Nowhere to go.
    End,
}

impl Transition {
    /// Whether the step happened without player input.
    pub fn is_automatic(&self) -> bool {
        !matches!(self, Transition::Chosen(_))
    }

    pub fn connection(&self) -> Option<ConnectionHandle> {
        match self {
            Transition::Chosen(connection) | Transition::Automatic(connection) => Some(*connection),
            Transition::Jumper(_) | Transition::End => None,
        }
    }
}

/// The outcome of [`super::Dialogue::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub next: Cursor,
    pub transition: Transition,
    pub warnings: Vec<TraversalWarning>,
}

impl Advance {
    pub(crate) fn new(next: Cursor, transition: Transition) -> Self {
        Self {
            next,
            transition,
            warnings: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
