//! Dialogue engine - decides where a conversation goes next.
//!
//! Leaving a node works as follows:
//! 1. **Narration**: the node's body is rendered to plain text
//! 2. **Choices**: labeled outgoing connections become numbered choices and
//!    the caller must pick one
//! 3. **Automatic**: without labeled connections the first outgoing connection
//!    is followed, with a warning if several unlabeled ones compete
//! 4. **Jumper**: without any outgoing connection the jumper target is used
//! 5. **End**: otherwise the walk is over

mod cursor;
mod transition;

pub use cursor::*;
pub use transition::*;

use corkboard::{
    Connection, ConnectionHandle, Element, LabelFilter, NarrativeGraph, Node, NodeHandle,
};
use rich_text::{RichText, RichTextOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DialogueError, TraversalWarning};

/// Configuration for the dialogue engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Options used when rendering node bodies.
    pub render: RichTextOptions,
}

/// A labeled connection offered to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Zero-based index to pass back to [`Dialogue::advance`].
    pub index: usize,
    pub label: String,
    pub connection: ConnectionHandle,
}

/// What the player sees at a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub node: NodeHandle,
    /// Rendered body text, when non-blank.
    pub narration: Option<String>,
    /// Empty when the node advances on its own.
    pub choices: Vec<Choice>,
}

impl Turn {
    pub fn needs_choice(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// Dialogue traversal over a borrowed project.
pub struct Dialogue<'g> {
    graph: &'g NarrativeGraph,
    config: DialogueConfig,
}

impl<'g> Dialogue<'g> {
    /// Create a dialogue with the given configuration.
    pub fn new(graph: &'g NarrativeGraph, config: DialogueConfig) -> Self {
        Self { graph, config }
    }

    /// Create a dialogue with default configuration.
    pub fn with_defaults(graph: &'g NarrativeGraph) -> Self {
        Self::new(graph, DialogueConfig::default())
    }

    pub fn graph(&self) -> &'g NarrativeGraph {
        self.graph
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// Cursor at the project's starting node, or terminal if none is set.
    pub fn start(&self) -> Cursor {
        Cursor::from(self.graph.starting_node())
    }

    /// Cursor at the first node carrying `label`.
    pub fn start_at_label(&self, label: &str) -> Option<Cursor> {
        self.graph.node_by_label(label).map(Cursor::At)
    }

    /// Narration and choices at `cursor`; `None` once the walk has ended.
    pub fn turn(&self, cursor: Cursor) -> Result<Option<Turn>, DialogueError> {
        let Cursor::At(node) = cursor else {
            return Ok(None);
        };

        let narration = Some(self.render_body(node)?).filter(|text| !text.trim().is_empty());
        let choices = self.current_choices(node)?;

        Ok(Some(Turn {
            node,
            narration,
            choices,
        }))
    }

    /// Labeled outgoing connections of `node`, in registration order.
    pub fn current_choices(&self, node: NodeHandle) -> Result<Vec<Choice>, DialogueError> {
        self.resolve(node)?;

        Ok(self
            .labeled_choices(node)
            .into_iter()
            .enumerate()
            .map(|(index, connection)| Choice {
                index,
                label: connection.label().to_string(),
                connection: connection.handle(),
            })
            .collect())
    }

    /// Plain text of the node's body, empty when it has none.
    pub fn render_body(&self, node: NodeHandle) -> Result<String, DialogueError> {
        Ok(self
            .render(node)?
            .map(|text| text.plain_text().to_string())
            .unwrap_or_default())
    }

    /// The node's body rendered with the configured options.
    pub fn render(&self, node: NodeHandle) -> Result<Option<RichText>, DialogueError> {
        let body = self.resolve(node)?.body.as_ref();
        Ok(body.map(|content| content.rich_text(&self.config.render)))
    }

    /// Leave `node`.
    ///
    /// When the node offers labeled choices, `choice` must index one of them;
    /// anything else is rejected and the caller should ask again. Otherwise
    /// `choice` is ignored.
    pub fn advance(&self, node: NodeHandle, choice: Option<usize>) -> Result<Advance, DialogueError> {
        let current = self.resolve(node)?;

        let choices = self.labeled_choices(node);
        if !choices.is_empty() {
            let available = choices.len();
            let index = choice.ok_or(DialogueError::ChoiceRequired { available })?;
            let connection = choices
                .get(index)
                .ok_or(DialogueError::InvalidChoice { index, available })?;

            debug!(node = current.id(), choice = connection.label(), "choice taken");
            return Ok(self.follow(connection, Transition::Chosen(connection.handle())));
        }

        let outgoing = self.graph.outgoing(node);
        let unlabeled = outgoing
            .iter()
            .filter(|c| LabelFilter::Unlabeled.accepts(c.label()))
            .count();

        let mut warnings = Vec::new();
        if unlabeled > 1 {
            let warning = TraversalWarning::AmbiguousAutoAdvance {
                node_id: current.id().to_string(),
                label: current.label().to_string(),
                unlabeled,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        let mut advance = match outgoing.first() {
            Some(connection) => {
                debug!(node = current.id(), connection = connection.id(), "advancing automatically");
                self.follow(connection, Transition::Automatic(connection.handle()))
            }
            None => match current.jumper_target() {
                Some(target) => {
                    debug!(node = current.id(), target = %target, "following jumper");
                    Advance::new(Cursor::At(target), Transition::Jumper(target))
                }
                None => {
                    debug!(node = current.id(), "dialogue ended");
                    Advance::new(Cursor::Terminal, Transition::End)
                }
            },
        };

        warnings.append(&mut advance.warnings);
        advance.warnings = warnings;
        Ok(advance)
    }

    fn follow(&self, connection: &Connection, transition: Transition) -> Advance {
        match connection.target() {
            Some(target) => Advance::new(Cursor::At(target), transition),
            None => {
                let warning = TraversalWarning::DanglingTarget {
                    connection_id: connection.id().to_string(),
                };
                warn!("{}", warning);

                let mut advance = Advance::new(Cursor::Terminal, transition);
                advance.warnings.push(warning);
                advance
            }
        }
    }

    fn labeled_choices(&self, node: NodeHandle) -> Vec<&'g Connection> {
        self.graph.outgoing_by_label(node, LabelFilter::Labeled)
    }

    fn resolve(&self, node: NodeHandle) -> Result<&'g Node, DialogueError> {
        self.graph.node(node).ok_or(DialogueError::UnknownNode(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corkboard::{Content, NodeType};
    use rich_text::CustomTag;

    fn graph_with(labels: &[&str]) -> (NarrativeGraph, Vec<NodeHandle>) {
        let mut graph = NarrativeGraph::new("test");
        let handles = labels
            .iter()
            .map(|label| {
                graph.add_node(
                    Node::new(*label, NodeType::TextArea)
                        .with_label(*label)
                        .with_body(Content::new(format!("<p>I am {}.</p>", label))),
                )
            })
            .collect();
        (graph, handles)
    }

    #[test]
    fn test_choices_in_registration_order() {
        let (mut graph, n) = graph_with(&["x", "a", "b", "c"]);
        graph.add_connection("xb", "Second", Some(n[0]), Some(n[2]));
        graph.add_connection("xa", "First", Some(n[0]), Some(n[1]));
        graph.add_connection("xc", "", Some(n[0]), Some(n[3]));

        let dialogue = Dialogue::with_defaults(&graph);
        let choices = dialogue.current_choices(n[0]).unwrap();

        let labels: Vec<_> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Second", "First"]);
        assert_eq!(choices[1].index, 1);

        let advance = dialogue.advance(n[0], Some(1)).unwrap();
        assert_eq!(advance.next, Cursor::At(n[1]));
        assert_eq!(advance.transition, Transition::Chosen(choices[1].connection));
        assert!(!advance.has_warnings());
    }

    #[test]
    fn test_invalid_choice_rejected() {
        let (mut graph, n) = graph_with(&["x", "a"]);
        graph.add_connection("xa", "Go", Some(n[0]), Some(n[1]));
        let dialogue = Dialogue::with_defaults(&graph);

        assert_eq!(
            dialogue.advance(n[0], Some(1)),
            Err(DialogueError::InvalidChoice {
                index: 1,
                available: 1
            })
        );
        assert_eq!(
            dialogue.advance(n[0], None),
            Err(DialogueError::ChoiceRequired { available: 1 })
        );
        // Same node, valid input: still works.
        assert_eq!(dialogue.advance(n[0], Some(0)).unwrap().next, Cursor::At(n[1]));
    }

    #[test]
    fn test_automatic_advance_ignores_choice() {
        let (mut graph, n) = graph_with(&["x", "y"]);
        let c = graph.add_connection("xy", "", Some(n[0]), Some(n[1]));
        let dialogue = Dialogue::with_defaults(&graph);

        let advance = dialogue.advance(n[0], Some(7)).unwrap();
        assert_eq!(advance.next, Cursor::At(n[1]));
        assert_eq!(advance.transition, Transition::Automatic(c));
        assert!(advance.warnings.is_empty());
    }

    #[test]
    fn test_ambiguous_unlabeled_takes_first() {
        let (mut graph, n) = graph_with(&["x", "y", "z"]);
        graph.add_connection("xy", "", Some(n[0]), Some(n[1]));
        graph.add_connection("xz", " ", Some(n[0]), Some(n[2]));
        let dialogue = Dialogue::with_defaults(&graph);

        let advance = dialogue.advance(n[0], None).unwrap();

        assert_eq!(advance.next, Cursor::At(n[1]));
        assert_eq!(
            advance.warnings,
            vec![TraversalWarning::AmbiguousAutoAdvance {
                node_id: "x".to_string(),
                label: "x".to_string(),
                unlabeled: 2,
            }]
        );
    }

    #[test]
    fn test_self_loop_is_not_a_way_out() {
        let (mut graph, n) = graph_with(&["x"]);
        graph.add_connection("loop", "Again", Some(n[0]), Some(n[0]));
        let dialogue = Dialogue::with_defaults(&graph);

        assert!(dialogue.current_choices(n[0]).unwrap().is_empty());
        let advance = dialogue.advance(n[0], None).unwrap();
        assert_eq!(advance.next, Cursor::Terminal);
        assert_eq!(advance.transition, Transition::End);
    }

    #[test]
    fn test_dangling_target_ends_walk() {
        let (mut graph, n) = graph_with(&["x"]);
        graph.add_connection("lost", "Into the void", Some(n[0]), None);
        let dialogue = Dialogue::with_defaults(&graph);

        let advance = dialogue.advance(n[0], Some(0)).unwrap();

        assert_eq!(advance.next, Cursor::Terminal);
        assert_eq!(
            advance.warnings,
            vec![TraversalWarning::DanglingTarget {
                connection_id: "lost".to_string()
            }]
        );
    }

    #[test]
    fn test_turn_narration() {
        let (mut graph, n) = graph_with(&["x"]);
        let silent = graph.add_node(
            Node::new("s", NodeType::Note).with_body(Content::new("<p>   </p>")),
        );
        let bodiless = graph.add_node(Node::new("b", NodeType::Note));
        let dialogue = Dialogue::with_defaults(&graph);

        let turn = dialogue.turn(Cursor::At(n[0])).unwrap().unwrap();
        assert_eq!(turn.narration.as_deref(), Some("I am x."));
        assert!(!turn.needs_choice());

        assert_eq!(dialogue.turn(Cursor::At(silent)).unwrap().unwrap().narration, None);
        assert_eq!(dialogue.turn(Cursor::At(bodiless)).unwrap().unwrap().narration, None);
        assert_eq!(dialogue.turn(Cursor::Terminal).unwrap(), None);
    }

    #[test]
    fn test_render_uses_configured_tags() {
        let mut graph = NarrativeGraph::new("test");
        let node = graph.add_node(
            Node::new("n", NodeType::TextArea)
                .with_body(Content::new("<p>Hello, <player>x</player>!</p>")),
        );
        let config = DialogueConfig {
            render: RichTextOptions::new().with_tag(CustomTag::replace("player", "Ada")),
        };

        let dialogue = Dialogue::new(&graph, config);
        assert_eq!(dialogue.render_body(node).unwrap(), "Hello, Ada!");
    }

    #[test]
    fn test_unknown_node() {
        let graph = NarrativeGraph::new("empty");
        let dialogue = Dialogue::with_defaults(&graph);
        let ghost = NodeHandle(3);

        assert_eq!(dialogue.advance(ghost, None), Err(DialogueError::UnknownNode(ghost)));
        assert_eq!(dialogue.current_choices(ghost), Err(DialogueError::UnknownNode(ghost)));
        assert!(dialogue.turn(Cursor::At(ghost)).is_err());
        assert!(dialogue.start().is_terminal());
    }

    #[test]
    fn test_start_at_label() {
        let (mut graph, n) = graph_with(&["x", "y"]);
        graph.set_starting_node(Some(n[1]));
        let dialogue = Dialogue::with_defaults(&graph);

        assert_eq!(dialogue.start(), Cursor::At(n[1]));
        assert_eq!(dialogue.start_at_label("x"), Some(Cursor::At(n[0])));
        assert_eq!(dialogue.start_at_label("nope"), None);
    }
}
