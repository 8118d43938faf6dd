//! Caller-held traversal state.

use corkboard::NodeHandle;
use serde::{Deserialize, Serialize};

/// Where a dialogue session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    At(NodeHandle),
    /// The walk has ended.
    Terminal,
}

impl Cursor {
    pub fn node(&self) -> Option<NodeHandle> {
        match self {
            Cursor::At(node) => Some(*node),
            Cursor::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Cursor::Terminal)
    }
}

impl From<Option<NodeHandle>> for Cursor {
    fn from(node: Option<NodeHandle>) -> Self {
        node.map_or(Cursor::Terminal, Cursor::At)
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cursor::At(node) => write!(f, "at {}", node),
            Cursor::Terminal => f.write_str("terminal"),
        }
    }
}
