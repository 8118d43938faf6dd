//! Narrative graph - the arena holding every node and connection of a project.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::elements::{
    find_by_id, find_by_label, Connection, ConnectionHandle, Element, LabelFilter, Node,
    NodeHandle,
};

/// Editor viewport saved with the project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// A narrative project.
///
/// Owns the canonical, insertion-ordered node and connection lists. Nodes and
/// connections refer to each other through handles resolved here, so the
/// graph has no reference cycles. Not synchronized: share it read-only.
#[derive(Debug, Clone, Default)]
pub struct NarrativeGraph {
    pub name: String,
    pub viewport: Viewport,

    nodes: Vec<Node>,
    connections: Vec<Connection>,
    starting_node: Option<NodeHandle>,
}

impl NarrativeGraph {
    /// Create an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a node. Connection handles carried over from another graph are
    /// dropped; they have no meaning here.
    pub fn add_node(&mut self, mut node: Node) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        if node.has_connections() {
            debug!(node = node.id(), "dropping foreign connection handles");
            node.clear_connections();
        }
        self.nodes.push(node);
        handle
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.0)
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle.0)
    }

    /// Every node handle in declaration order.
    pub fn node_handles(&self) -> impl Iterator<Item = NodeHandle> {
        (0..self.nodes.len()).map(NodeHandle)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_by_id(&self, id: &str) -> Option<NodeHandle> {
        find_by_id(&self.nodes, id).map(|(index, _)| NodeHandle(index))
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeHandle> {
        find_by_label(&self.nodes, label).map(|(index, _)| NodeHandle(index))
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, handle: ConnectionHandle) -> Option<&Connection> {
        self.connections.get(handle.0)
    }

    pub fn connection_mut(&mut self, handle: ConnectionHandle) -> Option<&mut Connection> {
        self.connections.get_mut(handle.0)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn connection_by_id(&self, id: &str) -> Option<ConnectionHandle> {
        find_by_id(&self.connections, id).map(|(index, _)| ConnectionHandle(index))
    }

    pub fn connection_by_label(&self, label: &str) -> Option<ConnectionHandle> {
        find_by_label(&self.connections, label).map(|(index, _)| ConnectionHandle(index))
    }

    pub fn starting_node(&self) -> Option<NodeHandle> {
        self.starting_node
    }

    pub fn set_starting_node(&mut self, node: Option<NodeHandle>) {
        self.starting_node = node.filter(|handle| self.node(*handle).is_some());
    }

    /// Create a connection and register it with both endpoints.
    ///
    /// An endpoint that is `None` (or not a node of this graph) is left
    /// unregistered. A self-loop is registered twice on its node.
    pub fn add_connection(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        source: Option<NodeHandle>,
        target: Option<NodeHandle>,
    ) -> ConnectionHandle {
        let handle = ConnectionHandle(self.connections.len());
        let source = source.filter(|node| self.node(*node).is_some());
        let target = target.filter(|node| self.node(*node).is_some());

        for endpoint in [source, target].into_iter().flatten() {
            self.nodes[endpoint.0].register(handle);
        }

        self.connections
            .push(Connection::new(handle, id.into(), label.into(), source, target));
        handle
    }

    /// Connect two nodes under a freshly generated identifier.
    pub fn connect(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        label: impl Into<String>,
    ) -> ConnectionHandle {
        let id = Uuid::new_v4().to_string();
        self.add_connection(id, label, Some(source), Some(target))
    }

    /// Remove a connection from its endpoints' incident lists.
    ///
    /// Idempotent. The connection stays in [`Self::connections`]; its
    /// endpoints simply no longer list it.
    pub fn disconnect(&mut self, handle: ConnectionHandle) {
        let Some(connection) = self.connections.get(handle.0) else {
            return;
        };

        for endpoint in [connection.source(), connection.target()].into_iter().flatten() {
            if let Some(node) = self.nodes.get_mut(endpoint.0) {
                node.unregister(handle);
            }
        }
    }

    /// Disconnect `connection` if `node` currently lists it.
    pub fn remove_connection_from(&mut self, node: NodeHandle, connection: ConnectionHandle) -> bool {
        let listed = self
            .node(node)
            .is_some_and(|n| n.connections().contains(&connection));

        if listed {
            self.disconnect(connection);
        }
        listed
    }

    /// Every connection incident to `node`, in registration order.
    pub fn connections_of(&self, node: NodeHandle) -> Vec<&Connection> {
        self.node(node)
            .map(|n| {
                n.connections()
                    .iter()
                    .filter_map(|handle| self.connection(*handle))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Connections entering `node`, self-loops excluded.
    pub fn incoming(&self, node: NodeHandle) -> Vec<&Connection> {
        self.connections_of(node)
            .into_iter()
            .filter(|c| c.enters(node))
            .collect()
    }

    /// Connections leaving `node`, self-loops excluded.
    pub fn outgoing(&self, node: NodeHandle) -> Vec<&Connection> {
        self.connections_of(node)
            .into_iter()
            .filter(|c| c.leaves(node))
            .collect()
    }

    pub fn incoming_by_label(&self, node: NodeHandle, filter: LabelFilter) -> Vec<&Connection> {
        self.incoming(node)
            .into_iter()
            .filter(|c| filter.accepts(c.label()))
            .collect()
    }

    pub fn outgoing_by_label(&self, node: NodeHandle, filter: LabelFilter) -> Vec<&Connection> {
        self.outgoing(node)
            .into_iter()
            .filter(|c| filter.accepts(c.label()))
            .collect()
    }

    pub fn has_labeled_incoming(&self, node: NodeHandle) -> bool {
        self.incoming(node).iter().any(|c| c.is_labeled())
    }

    pub fn has_labeled_outgoing(&self, node: NodeHandle) -> bool {
        self.outgoing(node).iter().any(|c| c.is_labeled())
    }

    /// Resolved components of `node`; unresolved slots stay `None`.
    pub fn components_of(&self, node: NodeHandle) -> Vec<Option<&Node>> {
        self.node(node)
            .map(|n| {
                n.components()
                    .iter()
                    .map(|slot| slot.and_then(|handle| self.node(handle)))
                    .collect()
            })
            .unwrap_or_default()
    }
}
