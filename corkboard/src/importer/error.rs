//! Import failures and non-fatal import diagnostics.

use thiserror::Error;

/// A failure that aborts the import. No partial graph is produced.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON, or a required field is missing or has
    /// the wrong type.
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// A style dimension could not be read as a number.
    #[error("malformed document: node `{node_id}` has unparsable {field} `{value}`")]
    InvalidDimension {
        node_id: String,
        field: &'static str,
        value: String,
    },

    #[error("failed to read project: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// True for every failure caused by the document content rather than I/O.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ImportError::MalformedDocument(_) | ImportError::InvalidDimension { .. }
        )
    }
}

/// Which end of an edge failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// A problem the importer worked around.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportWarning {
    /// The node was created with [`crate::NodeType::Unknown`].
    #[error("node `{node_id}` has unknown type `{type_name}`")]
    UnknownNodeType { node_id: String, type_name: String },

    /// A component slot was left empty.
    #[error("node `{node_id}` references unknown component `{component_id}`")]
    UnresolvedComponent {
        node_id: String,
        component_id: String,
    },

    /// The connection was kept with a missing endpoint.
    #[error("edge `{edge_id}` has unknown {endpoint} `{node_id}`")]
    UnresolvedEndpoint {
        edge_id: String,
        endpoint: Endpoint,
        node_id: String,
    },

    /// Lookups by this identifier resolve to the first declaration.
    #[error("node id `{node_id}` is declared more than once")]
    DuplicateNodeId { node_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        let warning = ImportWarning::UnresolvedEndpoint {
            edge_id: "e1".to_string(),
            endpoint: Endpoint::Target,
            node_id: "ghost".to_string(),
        };
        assert_eq!(warning.to_string(), "edge `e1` has unknown target `ghost`");
    }

    #[test]
    fn test_is_malformed() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(ImportError::from(json_error).is_malformed());

        let io = ImportError::from(std::io::Error::other("disk"));
        assert!(!io.is_malformed());
    }
}
