//! End-to-end import behavior.

use std::io::Write;

use corkboard::{
    Element, Endpoint, ImportConfig, ImportError, ImportWarning, Imported, Importer, NodeHandle,
    NodeType, SchemaVariant,
};

const PROJECT: &str = r#"{
    "viewport": {"x": 12.5, "y": -4, "zoom": 1.25},
    "nodes": [
        {
            "id": "start",
            "type": "text-area",
            "position": {"x": 10, "y": 20},
            "style": {"width": "200px", "height": "120px"},
            "data": {
                "label": "Intro",
                "body": "<p>Welcome, <b>traveler</b>.</p>",
                "attributes": ["speaker:Guide", "mood:warm"],
                "components": ["card", "missing", "start"],
                "isStartingNode": true
            }
        },
        {
            "id": "card",
            "type": "component",
            "data": {"label": "Guide card"}
        },
        {
            "id": "odd",
            "type": "widget",
            "data": null
        },
        {
            "id": "end",
            "type": "note",
            "position": null,
            "data": {"label": "End", "isStartingNode": false}
        }
    ],
    "edges": [
        {"id": "e1", "source": "start", "target": "end", "label": "Leave"},
        {"id": "e2", "source": "start", "target": "ghost", "label": ""},
        {"id": "e3", "source": "end", "target": "end", "label": "Wait"},
        {"id": "e4", "source": "phantom", "target": "start", "label": ""}
    ]
}"#;

fn import(json: &str) -> Imported {
    Importer::with_defaults().import_str(json).unwrap()
}

#[test]
fn test_counts_match_records() {
    let imported = import(PROJECT);

    assert_eq!(imported.graph.node_count(), 4);
    // Edges with unresolved endpoints are kept.
    assert_eq!(imported.graph.connection_count(), 4);
}

#[test]
fn test_order_follows_document() {
    let imported = import(PROJECT);

    let node_ids: Vec<_> = imported.graph.nodes().iter().map(|n| n.id()).collect();
    assert_eq!(node_ids, vec!["start", "card", "odd", "end"]);

    let edge_ids: Vec<_> = imported.graph.connections().iter().map(|c| c.id()).collect();
    assert_eq!(edge_ids, vec!["e1", "e2", "e3", "e4"]);
}

#[test]
fn test_reimport_is_deterministic() {
    let first = import(PROJECT);
    let second = import(PROJECT);

    let ids = |imported: &Imported| -> (Vec<String>, Vec<String>) {
        (
            imported.graph.nodes().iter().map(|n| n.id().to_string()).collect(),
            imported
                .graph
                .connections()
                .iter()
                .map(|c| c.id().to_string())
                .collect(),
        )
    };

    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_every_connection_is_registered_with_its_endpoints() {
    let imported = import(PROJECT);
    let graph = &imported.graph;

    for connection in graph.connections() {
        for node in graph.node_handles() {
            let occurrences = graph
                .node(node)
                .unwrap()
                .connections()
                .iter()
                .filter(|c| **c == connection.handle())
                .count();

            let expected = usize::from(connection.source() == Some(node))
                + usize::from(connection.target() == Some(node));
            assert_eq!(occurrences, expected, "{} on {}", connection.id(), node);
        }
    }
}

#[test]
fn test_node_fields() {
    let imported = import(PROJECT);
    let graph = &imported.graph;
    let start = graph.node(graph.node_by_id("start").unwrap()).unwrap();

    assert_eq!(start.label(), "Intro");
    assert_eq!(start.node_type(), &NodeType::TextArea);
    assert_eq!((start.x, start.y), (10.0, 20.0));
    assert_eq!((start.width, start.height), (200.0, 120.0));
    assert_eq!(start.attributes, vec!["speaker:Guide", "mood:warm"]);
    assert_eq!(start.body.as_ref().unwrap().text(), "Welcome, traveler.");

    assert_eq!(graph.viewport.x, 12.5);
    assert_eq!(graph.viewport.y, -4.0);
    assert_eq!(graph.viewport.zoom, 1.25);
    assert_eq!(graph.starting_node(), Some(NodeHandle(0)));
}

#[test]
fn test_components_keep_order_and_missing_slots() {
    let imported = import(PROJECT);
    let graph = &imported.graph;
    let start = graph.node_by_id("start").unwrap();

    assert_eq!(
        graph.node(start).unwrap().components(),
        &[Some(NodeHandle(1)), None, Some(NodeHandle(0))]
    );

    let components = graph.components_of(start);
    assert_eq!(components[0].unwrap().label(), "Guide card");
    assert!(components[1].is_none());
}

#[test]
fn test_unknown_type_is_kept() {
    let imported = import(PROJECT);
    let odd = &imported.graph.nodes()[2];

    assert_eq!(odd.node_type(), &NodeType::Unknown("widget".to_string()));
    assert_eq!(odd.label(), "");
    assert!(imported.warnings.contains(&ImportWarning::UnknownNodeType {
        node_id: "odd".to_string(),
        type_name: "widget".to_string(),
    }));
}

#[test]
fn test_unresolved_references_are_warnings() {
    let imported = import(PROJECT);
    let graph = &imported.graph;

    let e2 = graph.connection(graph.connection_by_id("e2").unwrap()).unwrap();
    assert_eq!(e2.source(), graph.node_by_id("start"));
    assert_eq!(e2.target(), None);

    let e4 = graph.connection(graph.connection_by_id("e4").unwrap()).unwrap();
    assert_eq!(e4.source(), None);

    assert!(imported.warnings.contains(&ImportWarning::UnresolvedEndpoint {
        edge_id: "e2".to_string(),
        endpoint: Endpoint::Target,
        node_id: "ghost".to_string(),
    }));
    assert!(imported.warnings.contains(&ImportWarning::UnresolvedEndpoint {
        edge_id: "e4".to_string(),
        endpoint: Endpoint::Source,
        node_id: "phantom".to_string(),
    }));
    assert!(imported.warnings.contains(&ImportWarning::UnresolvedComponent {
        node_id: "start".to_string(),
        component_id: "missing".to_string(),
    }));
    assert_eq!(imported.warnings.len(), 4);
}

#[test]
fn test_self_loop_is_registered_twice() {
    let imported = import(PROJECT);
    let graph = &imported.graph;
    let end = graph.node_by_id("end").unwrap();

    let e3 = graph.connection_by_id("e3").unwrap();
    let listed = graph
        .node(end)
        .unwrap()
        .connections()
        .iter()
        .filter(|c| **c == e3)
        .count();
    assert_eq!(listed, 2);
    assert!(graph.outgoing(end).is_empty());
    assert_eq!(graph.incoming(end).len(), 1);
}

#[test]
fn test_forward_references_resolve() {
    let json = r#"{
        "nodes": [
            {"id": "a", "type": "component", "data": {"components": ["c"]}},
            {"id": "b", "type": "note"},
            {"id": "c", "type": "note"}
        ],
        "edges": [{"id": "e", "source": "c", "target": "a", "label": ""}]
    }"#;
    let imported = import(json);

    assert_eq!(imported.graph.nodes()[0].components(), &[Some(NodeHandle(2))]);
    assert!(imported.warnings.is_empty());
}

#[test]
fn test_last_starting_node_wins() {
    let json = r#"{
        "nodes": [
            {"id": "a", "type": "note", "data": {"isStartingNode": true}},
            {"id": "b", "type": "note", "data": {"isStartingNode": true}},
            {"id": "c", "type": "note", "data": {"isStartingNode": false}}
        ]
    }"#;

    assert_eq!(import(json).graph.starting_node(), Some(NodeHandle(1)));
}

#[test]
fn test_jumper_links_first_other_node_with_same_label() {
    let json = r#"{
        "nodes": [
            {"id": "x", "type": "text-area", "data": {"label": "hub"}},
            {"id": "j", "type": "jumper", "data": {"label": "Hub"}},
            {"id": "h1", "type": "text-area", "data": {"label": "Hub"}},
            {"id": "h2", "type": "text-area", "data": {"label": "Hub"}},
            {"id": "lonely", "type": "jumper", "data": {"label": "Nowhere"}}
        ]
    }"#;
    let importer = Importer::new(ImportConfig::default().with_schema(SchemaVariant::Legacy));
    let imported = importer.import_str(json).unwrap();
    let graph = &imported.graph;

    assert_eq!(graph.nodes()[1].jumper_target(), graph.node_by_id("h1"));
    assert!(!graph.nodes()[4].has_jumper_target());
    // Only jumpers get targets.
    assert!(!graph.nodes()[2].has_jumper_target());
}

#[test]
fn test_duplicate_ids_first_wins() {
    let json = r#"{
        "nodes": [
            {"id": "a", "type": "note", "data": {"label": "first"}},
            {"id": "a", "type": "note", "data": {"label": "second"}}
        ],
        "edges": [{"id": "e", "source": "a", "target": "a", "label": ""}]
    }"#;
    let imported = import(json);

    assert_eq!(imported.graph.node_count(), 2);
    assert_eq!(imported.graph.node_by_id("a"), Some(NodeHandle(0)));
    assert_eq!(
        imported.warnings,
        vec![ImportWarning::DuplicateNodeId {
            node_id: "a".to_string()
        }]
    );
}

#[test]
fn test_numeric_dimensions_accepted() {
    let json = r#"{"nodes": [{"id": "a", "type": "note", "style": {"width": 40, "height": "3.5em"}}]}"#;
    let imported = import(json);
    let node = &imported.graph.nodes()[0];
    assert_eq!((node.width, node.height), (40.0, 3.5));
}

#[test]
fn test_malformed_documents_fail() {
    let cases = [
        "not json",
        r#"{"nodes": [{"type": "note"}]}"#,
        r#"{"nodes": [{"id": "a"}]}"#,
        r#"{"nodes": [{"id": 7, "type": "note"}]}"#,
        r#"{"nodes": [{"id": "a", "type": "note", "position": {"x": "left"}}]}"#,
        r#"{"edges": [{"id": "e", "source": "a", "target": "b"}]}"#,
        r#"{"edges": [{"id": "e", "source": "a", "target": "b", "label": null}]}"#,
        r#"{"nodes": [{"id": "a", "type": "note", "data": {"isStartingNode": "yes"}}]}"#,
    ];

    for case in cases {
        let error = Importer::with_defaults().import_str(case).unwrap_err();
        assert!(error.is_malformed(), "{case} should be malformed: {error}");
    }
}

#[test]
fn test_unparsable_dimension_fails() {
    let json = r#"{"nodes": [{"id": "a", "type": "note", "style": {"width": "auto", "height": "10px"}}]}"#;
    let error = Importer::with_defaults().import_str(json).unwrap_err();

    assert!(matches!(
        error,
        ImportError::InvalidDimension { field: "width", .. }
    ));
}

#[test]
fn test_import_file_names_project_after_stem() {
    let mut file = tempfile::Builder::new()
        .prefix("castle-")
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(PROJECT.as_bytes()).unwrap();

    let imported = Importer::with_defaults().import_file(file.path()).unwrap();
    let stem = file.path().file_stem().unwrap().to_string_lossy().into_owned();

    assert_eq!(imported.graph.name, stem);
    assert!(imported.graph.name.starts_with("castle-"));
    assert_eq!(imported.graph.node_count(), 4);
}

#[test]
fn test_import_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = Importer::with_defaults()
        .import_file(dir.path().join("absent.json"))
        .unwrap_err();

    assert!(matches!(error, ImportError::Io(_)));
}

#[test]
fn test_import_reader() {
    let imported = Importer::with_defaults()
        .import_reader(PROJECT.as_bytes())
        .unwrap();
    assert_eq!(imported.graph.connection_count(), 4);
}

#[test]
fn test_import_file_shares_slice_parsing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"nodes\": 3}").unwrap();

    let error = Importer::with_defaults().import_file(file.path()).unwrap_err();
    assert!(matches!(error, ImportError::MalformedDocument(_)));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PROJECT.as_bytes()).unwrap();
    let importer = Importer::new(ImportConfig::default().with_project_name("Castle"));
    let from_file = importer.import_file(file.path()).unwrap();
    let from_slice = importer.import_slice(PROJECT.as_bytes()).unwrap();

    assert_eq!(from_file.graph.name, "Castle");
    assert_eq!(from_file.graph.node_count(), from_slice.graph.node_count());
    assert_eq!(from_file.warnings, from_slice.warnings);
}
