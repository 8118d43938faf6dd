//! Raw records of the export document, as read by serde.
//!
//! Optional keys are `Option`s, so a key holding `null` reads the same as an
//! absent key. Required keys are plain fields and fail the import when missing.

use serde::Deserialize;

use super::ImportError;

#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    pub viewport: Option<RawViewport>,
    pub nodes: Option<Vec<RawNode>>,
    pub edges: Option<Vec<RawEdge>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawViewport {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub zoom: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Option<RawPosition>,
    pub style: Option<RawStyle>,
    pub data: Option<RawData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPosition {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStyle {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawData {
    pub label: Option<String>,
    pub body: Option<String>,
    pub attributes: Option<Vec<String>>,
    pub components: Option<Vec<String>>,
    #[serde(rename = "isStartingNode")]
    pub is_starting_node: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
}

/// A CSS-like size: `"120px"`, `"50%"`, or a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Dimension {
    Number(f64),
    Text(String),
}

impl Dimension {
    /// The numeric value with any unit suffix stripped.
    pub fn value(&self, node_id: &str, field: &'static str) -> Result<f64, ImportError> {
        match self {
            Dimension::Number(value) => Ok(*value),
            Dimension::Text(text) => {
                let number = text
                    .trim()
                    .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
                    .trim();

                number.parse::<f64>().map_err(|_| ImportError::InvalidDimension {
                    node_id: node_id.to_string(),
                    field,
                    value: text.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Dimension {
        Dimension::Text(value.to_string())
    }

    #[test]
    fn test_dimension_units_stripped() {
        assert_eq!(text("120px").value("n", "width").unwrap(), 120.0);
        assert_eq!(text("50%").value("n", "width").unwrap(), 50.0);
        assert_eq!(text("2.5em").value("n", "width").unwrap(), 2.5);
        assert_eq!(text(" 80 px ").value("n", "width").unwrap(), 80.0);
        assert_eq!(text("64").value("n", "width").unwrap(), 64.0);
        assert_eq!(Dimension::Number(12.0).value("n", "width").unwrap(), 12.0);
    }

    #[test]
    fn test_dimension_unparsable() {
        let error = text("wide").value("n1", "height").unwrap_err();
        assert!(matches!(
            error,
            ImportError::InvalidDimension { ref node_id, field: "height", .. } if node_id == "n1"
        ));
        assert!(text("").value("n1", "width").is_err());
    }

    #[test]
    fn test_null_reads_as_absent() {
        let node: RawNode =
            serde_json::from_str(r#"{"id":"a","type":"note","position":null,"data":{"label":null}}"#)
                .unwrap();
        assert!(node.position.is_none());
        assert!(node.data.unwrap().label.is_none());
    }

    #[test]
    fn test_required_field_missing() {
        let result = serde_json::from_str::<RawEdge>(r#"{"id":"e","source":"a","target":"b"}"#);
        assert!(result.is_err());
    }
}
