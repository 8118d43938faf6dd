//! Project listing for `--summary`.

use corkboard::{Element, NarrativeGraph, NodeHandle};
use std::io::{self, Write};

const MISSING: &str = "<missing>";

pub fn write_summary(graph: &NarrativeGraph, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Project: {}", graph.name)?;
    writeln!(
        out,
        "Viewport: x={} y={} zoom={}",
        graph.viewport.x, graph.viewport.y, graph.viewport.zoom
    )?;
    writeln!(out, "Starting node: {}", describe(graph, graph.starting_node()))?;

    writeln!(out)?;
    writeln!(out, "Nodes ({}):", graph.node_count())?;
    for node in graph.nodes() {
        writeln!(
            out,
            "  [{}] \"{}\" {} at ({}, {}) size {}x{}",
            node.id(),
            node.label(),
            node.node_type(),
            node.x,
            node.y,
            node.width,
            node.height
        )?;

        if node.has_attributes() {
            writeln!(out, "    attributes: {}", node.attributes.join(", "))?;
        }

        let missing = node.components().iter().filter(|c| c.is_none()).count();
        if node.has_components() {
            writeln!(
                out,
                "    components: {} ({} missing)",
                node.components().len(),
                missing
            )?;
        }

        writeln!(out, "    connections: {}", node.connections().len())?;

        if let Some(target) = node.jumper_target() {
            writeln!(out, "    jumps to: {}", describe(graph, Some(target)))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Connections ({}):", graph.connection_count())?;
    for connection in graph.connections() {
        writeln!(
            out,
            "  [{}] \"{}\": {} -> {}",
            connection.id(),
            connection.label(),
            describe(graph, connection.source()),
            describe(graph, connection.target())
        )?;
    }

    Ok(())
}

fn describe(graph: &NarrativeGraph, node: Option<NodeHandle>) -> String {
    node.and_then(|handle| graph.node(handle))
        .map(|node| format!("\"{}\" ({})", node.label(), node.id()))
        .unwrap_or_else(|| MISSING.to_string())
}
