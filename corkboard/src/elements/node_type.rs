//! Node content types and the schema variants that define them.

use serde::{Deserialize, Serialize};

/// Which revision of the export schema a document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// `text-area`, `text-field`, `component`, `note`.
    #[default]
    Standard,
    /// The standard types plus `jumper`.
    Legacy,
}

/// The closed set of node content types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    TextArea,
    TextField,
    Component,
    Note,
    /// Same-label alias node; legacy schema only.
    Jumper,
    /// A type string outside the schema, kept verbatim.
    Unknown(String),
}

impl NodeType {
    /// Map a schema type string to a node type.
    ///
    /// Strings the schema does not define map to [`NodeType::Unknown`],
    /// including `jumper` under [`SchemaVariant::Standard`].
    pub fn parse(type_name: &str, schema: SchemaVariant) -> Self {
        match (type_name, schema) {
            ("text-area", _) => NodeType::TextArea,
            ("text-field", _) => NodeType::TextField,
            ("component", _) => NodeType::Component,
            ("note", _) => NodeType::Note,
            ("jumper", SchemaVariant::Legacy) => NodeType::Jumper,
            (other, _) => NodeType::Unknown(other.to_string()),
        }
    }

    /// The schema string for this type.
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::TextArea => "text-area",
            NodeType::TextField => "text-field",
            NodeType::Component => "component",
            NodeType::Note => "note",
            NodeType::Jumper => "jumper",
            NodeType::Unknown(name) => name,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, NodeType::Unknown(_))
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
