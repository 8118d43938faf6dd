//! Node definitions.

use super::{ConnectionHandle, Content, Element, NodeHandle, NodeType};

/// A content vertex of the narrative graph.
///
/// Nodes only refer to other nodes and connections through handles; the
/// project owns every entity.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    label: String,
    node_type: NodeType,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    pub body: Option<Content>,
    pub attributes: Vec<String>,

    /// Referenced nodes in declaration order; `None` marks an unresolved id.
    components: Vec<Option<NodeHandle>>,

    /// Incident connections, both directions, in registration order.
    /// A self-looped connection appears twice.
    connections: Vec<ConnectionHandle>,

    jumper_target: Option<NodeHandle>,
}

impl Node {
    /// Create a node with no body, attributes, components or connections.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            node_type,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            body: None,
            attributes: Vec::new(),
            components: Vec::new(),
            connections: Vec::new(),
            jumper_target: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_body(mut self, body: Content) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(attributes.into_iter().map(Into::into));
        self
    }

    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn contains_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }

    pub fn contains_attribute_with_prefix(&self, prefix: &str) -> bool {
        self.attributes.iter().any(|a| a.starts_with(prefix))
    }

    /// The remainder of every attribute starting with `prefix`, in order.
    ///
    /// `["speaker:Ada", "mood:calm"]` with prefix `"speaker:"` yields `["Ada"]`.
    pub fn attributes_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.attributes
            .iter()
            .filter_map(|a| a.strip_prefix(prefix))
            .collect()
    }

    pub fn components(&self) -> &[Option<NodeHandle>] {
        &self.components
    }

    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }

    /// Append a component slot; `None` records an unresolved reference.
    pub fn add_component(&mut self, component: Option<NodeHandle>) {
        self.components.push(component);
    }

    pub fn connections(&self) -> &[ConnectionHandle] {
        &self.connections
    }

    pub fn has_connections(&self) -> bool {
        !self.connections.is_empty()
    }

    pub fn jumper_target(&self) -> Option<NodeHandle> {
        self.jumper_target
    }

    pub fn has_jumper_target(&self) -> bool {
        self.jumper_target.is_some()
    }

    pub(crate) fn set_jumper_target(&mut self, target: Option<NodeHandle>) {
        self.jumper_target = target;
    }

    pub(crate) fn register(&mut self, connection: ConnectionHandle) {
        self.connections.push(connection);
    }

    pub(crate) fn clear_connections(&mut self) {
        self.connections.clear();
    }

    /// Drop every occurrence of `connection`. Returns whether any was present.
    pub(crate) fn unregister(&mut self, connection: ConnectionHandle) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| *c != connection);
        self.connections.len() != before
    }
}

impl Element for Node {
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
