//! Connection definitions.

use super::{ConnectionHandle, Element, LabelFilter, NodeHandle};

/// A directed, labeled edge between two nodes.
///
/// Either endpoint may be missing when the import referenced an unknown
/// node. Connections are created through [`crate::NarrativeGraph`], which
/// registers them with their endpoints.
#[derive(Debug, Clone)]
pub struct Connection {
    handle: ConnectionHandle,
    id: String,
    label: String,
    source: Option<NodeHandle>,
    target: Option<NodeHandle>,
}

impl Connection {
    pub(crate) fn new(
        handle: ConnectionHandle,
        id: String,
        label: String,
        source: Option<NodeHandle>,
        target: Option<NodeHandle>,
    ) -> Self {
        Self {
            handle,
            id,
            label,
            source,
            target,
        }
    }

    pub fn handle(&self) -> ConnectionHandle {
        self.handle
    }

    pub fn source(&self) -> Option<NodeHandle> {
        self.source
    }

    pub fn target(&self) -> Option<NodeHandle> {
        self.target
    }

    /// Source and target are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source.is_some() && self.source == self.target
    }

    pub fn is_labeled(&self) -> bool {
        LabelFilter::Labeled.accepts(&self.label)
    }

    /// Outgoing from `node`: `node` is the source and not also the target.
    pub fn leaves(&self, node: NodeHandle) -> bool {
        self.source == Some(node) && self.target != Some(node)
    }

    /// Incoming to `node`: `node` is the target and not also the source.
    pub fn enters(&self, node: NodeHandle) -> bool {
        self.target == Some(node) && self.source != Some(node)
    }
}

impl Element for Connection {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }
}
