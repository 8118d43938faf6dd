//! Importer - builds a linked [`NarrativeGraph`] from an editor export.
//!
//! The import runs in phases because edges and component lists may refer to
//! nodes declared later in the document:
//! 1. **Nodes**: every node record becomes a [`Node`]; its component ids and
//!    starting flag are stashed in a side table in declaration order
//! 2. **Linking**: components, the starting node and jumper targets are
//!    resolved against the complete node list
//! 3. **Edges**: every edge record becomes a [`crate::Connection`] registered
//!    with whichever endpoints resolve
//!
//! Unknown node types and unresolved references are reported as
//! [`ImportWarning`]s; only a malformed document fails the import.

mod document;
mod error;

pub use error::*;

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::elements::{Content, Element, Node, NodeHandle, NodeType, SchemaVariant};
use crate::project::{NarrativeGraph, Viewport};
use document::{RawDocument, RawEdge, RawNode};

/// Configuration for the importer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Schema revision used to map node type strings.
    pub schema: SchemaVariant,

    /// Project name; file imports default to the file stem.
    pub project_name: Option<String>,
}

impl ImportConfig {
    pub fn with_schema(mut self, schema: SchemaVariant) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }
}

/// A fully linked graph and the problems worked around while building it.
#[derive(Debug, Clone)]
pub struct Imported {
    pub graph: NarrativeGraph,
    pub warnings: Vec<ImportWarning>,
}

/// Per-node data held back until every node exists.
struct PendingLinks {
    handle: NodeHandle,
    component_ids: Vec<String>,
    is_starting_node: bool,
}

/// Reads export documents into narrative graphs.
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    /// Create an importer with the given configuration.
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Create an importer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ImportConfig::default())
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn import_str(&self, json: &str) -> Result<Imported, ImportError> {
        self.import_slice(json.as_bytes())
    }

    pub fn import_slice(&self, bytes: &[u8]) -> Result<Imported, ImportError> {
        let name = self.config.project_name.clone().unwrap_or_default();
        self.import_named(name, bytes)
    }

    pub fn import_reader<R: Read>(&self, mut reader: R) -> Result<Imported, ImportError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.import_slice(&bytes)
    }

    /// Import a project file, naming the project after the file stem unless
    /// the configuration names it.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<Imported, ImportError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;

        let name = self.config.project_name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        self.import_named(name, &bytes)
    }

    fn import_named(&self, name: String, bytes: &[u8]) -> Result<Imported, ImportError> {
        let document: RawDocument = serde_json::from_slice(bytes)?;
        self.build(name, document)
    }

    fn build(&self, name: String, document: RawDocument) -> Result<Imported, ImportError> {
        let mut graph = NarrativeGraph::new(name);
        let mut warnings = Vec::new();

        if let Some(viewport) = document.viewport {
            graph.viewport = Viewport {
                x: viewport.x.unwrap_or_default(),
                y: viewport.y.unwrap_or_default(),
                zoom: viewport.zoom.unwrap_or_default(),
            };
        }

        let pending = self.read_nodes(&mut graph, document.nodes.unwrap_or_default(), &mut warnings)?;
        debug!(nodes = graph.node_count(), "node phase complete");

        self.link_nodes(&mut graph, pending, &mut warnings);
        debug!("linking phase complete");

        self.read_edges(&mut graph, document.edges.unwrap_or_default(), &mut warnings);

        info!(
            project = %graph.name,
            nodes = graph.node_count(),
            connections = graph.connection_count(),
            warnings = warnings.len(),
            "imported project"
        );

        Ok(Imported { graph, warnings })
    }

    fn read_nodes(
        &self,
        graph: &mut NarrativeGraph,
        records: Vec<RawNode>,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Vec<PendingLinks>, ImportError> {
        let mut pending = Vec::with_capacity(records.len());

        for record in records {
            let node_type = NodeType::parse(&record.node_type, self.config.schema);
            if node_type.is_unknown() {
                record_warning(
                    warnings,
                    ImportWarning::UnknownNodeType {
                        node_id: record.id.clone(),
                        type_name: record.node_type.clone(),
                    },
                );
            }

            if graph.node_by_id(&record.id).is_some() {
                record_warning(
                    warnings,
                    ImportWarning::DuplicateNodeId {
                        node_id: record.id.clone(),
                    },
                );
            }

            let (x, y) = record
                .position
                .map(|p| (p.x.unwrap_or_default(), p.y.unwrap_or_default()))
                .unwrap_or_default();

            let (width, height) = match &record.style {
                Some(style) => (
                    dimension(style.width.as_ref(), &record.id, "width")?,
                    dimension(style.height.as_ref(), &record.id, "height")?,
                ),
                None => (0.0, 0.0),
            };

            let data = record.data.unwrap_or_default();

            // The body is always wrapped, even when empty.
            let node = Node::new(record.id, node_type)
                .with_label(data.label.unwrap_or_default())
                .with_position(x, y)
                .with_size(width, height)
                .with_body(Content::new(data.body.unwrap_or_default()))
                .with_attributes(data.attributes.unwrap_or_default());

            pending.push(PendingLinks {
                handle: graph.add_node(node),
                component_ids: data.components.unwrap_or_default(),
                is_starting_node: data.is_starting_node.unwrap_or(false),
            });
        }

        Ok(pending)
    }

    fn link_nodes(
        &self,
        graph: &mut NarrativeGraph,
        pending: Vec<PendingLinks>,
        warnings: &mut Vec<ImportWarning>,
    ) {
        for links in pending {
            let components: Vec<Option<NodeHandle>> = links
                .component_ids
                .iter()
                .map(|component_id| {
                    let resolved = graph.node_by_id(component_id);
                    if resolved.is_none() {
                        record_warning(
                            warnings,
                            ImportWarning::UnresolvedComponent {
                                node_id: node_id(graph, links.handle),
                                component_id: component_id.clone(),
                            },
                        );
                    }
                    resolved
                })
                .collect();

            // Later flagged nodes override earlier ones.
            if links.is_starting_node {
                graph.set_starting_node(Some(links.handle));
            }

            let jumper_target = find_jumper_target(graph, links.handle);

            if let Some(node) = graph.node_mut(links.handle) {
                for component in components {
                    node.add_component(component);
                }
                if jumper_target.is_some() {
                    node.set_jumper_target(jumper_target);
                }
            }
        }
    }

    fn read_edges(
        &self,
        graph: &mut NarrativeGraph,
        records: Vec<RawEdge>,
        warnings: &mut Vec<ImportWarning>,
    ) {
        for record in records {
            let source = resolve_endpoint(graph, &record, Endpoint::Source, warnings);
            let target = resolve_endpoint(graph, &record, Endpoint::Target, warnings);
            graph.add_connection(record.id, record.label, source, target);
        }
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn dimension(
    value: Option<&document::Dimension>,
    node_id: &str,
    field: &'static str,
) -> Result<f64, ImportError> {
    value
        .map(|dimension| dimension.value(node_id, field))
        .transpose()
        .map(Option::unwrap_or_default)
}

/// First other node, in declaration order, whose label equals a jumper's label.
fn find_jumper_target(graph: &NarrativeGraph, handle: NodeHandle) -> Option<NodeHandle> {
    let jumper = graph.node(handle)?;
    if jumper.node_type() != &NodeType::Jumper {
        return None;
    }

    graph
        .node_handles()
        .filter(|candidate| *candidate != handle)
        .find(|candidate| {
            graph
                .node(*candidate)
                .is_some_and(|node| node.label() == jumper.label())
        })
}

fn resolve_endpoint(
    graph: &NarrativeGraph,
    record: &RawEdge,
    endpoint: Endpoint,
    warnings: &mut Vec<ImportWarning>,
) -> Option<NodeHandle> {
    let node_id = match endpoint {
        Endpoint::Source => &record.source,
        Endpoint::Target => &record.target,
    };

    let resolved = graph.node_by_id(node_id);
    if resolved.is_none() {
        record_warning(
            warnings,
            ImportWarning::UnresolvedEndpoint {
                edge_id: record.id.clone(),
                endpoint,
                node_id: node_id.clone(),
            },
        );
    }
    resolved
}

fn node_id(graph: &NarrativeGraph, handle: NodeHandle) -> String {
    graph
        .node(handle)
        .map(|node| node.id().to_string())
        .unwrap_or_default()
}

fn record_warning(warnings: &mut Vec<ImportWarning>, warning: ImportWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}
