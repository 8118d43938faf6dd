//! Custom tag descriptors and listeners.

use serde::{Deserialize, Serialize};

/// What the engine does with a custom tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagBehavior {
    /// Track the tag as a style flag and report its start/end offsets.
    Decorate,
    /// Replace the element and its descendants with literal text.
    Replace(String),
}

/// A custom tag recognized by the rich-text engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTag {
    pub name: String,
    pub behavior: TagBehavior,
}

impl CustomTag {
    /// A decorating tag.
    pub fn decorate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: TagBehavior::Decorate,
        }
    }

    /// A replacing tag.
    pub fn replace(name: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: TagBehavior::Replace(replacement.into()),
        }
    }

    pub fn is_replacer(&self) -> bool {
        matches!(self.behavior, TagBehavior::Replace(_))
    }

    /// The replacement text, for replacing tags.
    pub fn replacement(&self) -> Option<&str> {
        match &self.behavior {
            TagBehavior::Replace(text) => Some(text),
            TagBehavior::Decorate => None,
        }
    }

    /// Whether an element tag name refers to this descriptor.
    pub fn matches(&self, tag_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag_name)
    }
}

/// Receives start/end offsets of decorating tags during style tracking.
///
/// Offsets are independent of run creation, so consumers can key their own
/// metadata (substitutions, annotations) on them.
pub trait TagListener {
    fn on_start(&mut self, _tag: &CustomTag, _offset: usize) {}

    fn on_end(&mut self, _tag: &CustomTag, _offset: usize) {}
}

/// Listener that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoListener;

impl TagListener for NoListener {}

/// A recorded decorating-tag boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagEvent {
    Start { tag: String, offset: usize },
    End { tag: String, offset: usize },
}

/// Listener that records every boundary in order.
#[derive(Debug, Default, Clone)]
pub struct TagEventLog {
    pub events: Vec<TagEvent>,
}

impl TagEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(start, end)` offset pairs for a tag, pairing each end with the
    /// most recent unmatched start.
    pub fn spans(&self, tag: &str) -> Vec<(usize, usize)> {
        let mut open = Vec::new();
        let mut spans = Vec::new();

        for event in &self.events {
            match event {
                TagEvent::Start { tag: name, offset } if name == tag => open.push(*offset),
                TagEvent::End { tag: name, offset } if name == tag => {
                    if let Some(start) = open.pop() {
                        spans.push((start, *offset));
                    }
                }
                _ => {}
            }
        }

        spans
    }
}

impl TagListener for TagEventLog {
    fn on_start(&mut self, tag: &CustomTag, offset: usize) {
        self.events.push(TagEvent::Start {
            tag: tag.name.clone(),
            offset,
        });
    }

    fn on_end(&mut self, tag: &CustomTag, offset: usize) {
        self.events.push(TagEvent::End {
            tag: tag.name.clone(),
            offset,
        });
    }
}
