//! Traversal errors and warnings.

use corkboard::NodeHandle;
use thiserror::Error;

/// An input the engine refused. The cursor stays where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    #[error("choice {index} is out of range ({available} available)")]
    InvalidChoice { index: usize, available: usize },

    /// The node offers labeled choices but none was given.
    #[error("a choice is required ({available} available)")]
    ChoiceRequired { available: usize },

    #[error("{0} is not part of this project")]
    UnknownNode(NodeHandle),
}

impl DialogueError {
    /// Number of choices the caller may pick from, if the error concerns one.
    pub fn available(&self) -> Option<usize> {
        match self {
            DialogueError::InvalidChoice { available, .. }
            | DialogueError::ChoiceRequired { available } => Some(*available),
            DialogueError::UnknownNode(_) => None,
        }
    }
}

/// A problem noticed while advancing. The transition still happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalWarning {
    /// Several unlabeled connections leave the node; the first one was taken.
    #[error(
        "node `{label}` ({node_id}) has {unlabeled} unlabeled outgoing connections; \
         following the first"
    )]
    AmbiguousAutoAdvance {
        node_id: String,
        label: String,
        unlabeled: usize,
    },

    /// The followed connection has no target, so the walk ends.
    #[error("connection `{connection_id}` has no target; ending the dialogue")]
    DanglingTarget { connection_id: String },
}
