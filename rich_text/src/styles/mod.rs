//! Style flags and style runs.
//!
//! Style tracking is a fold: each [`WalkEvent`] maps the current
//! [`ActiveStyles`] value to the next one without mutating it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::markup::WalkEvent;
use crate::tags::CustomTag;

/// Formatting built into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltinStyle {
    Bold,
    Italic,
    Underline,
}

impl BuiltinStyle {
    /// The built-in style a tag name triggers, if any.
    pub fn from_tag(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "b" | "strong" => Some(BuiltinStyle::Bold),
            "i" | "em" => Some(BuiltinStyle::Italic),
            "u" => Some(BuiltinStyle::Underline),
            _ => None,
        }
    }
}

/// The set of formatting flags active at one point of the walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStyles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Names of the active decorating custom tags.
    pub custom: BTreeSet<String>,
}

impl ActiveStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// The styles in effect after `event`.
    ///
    /// Entering a style-bearing element sets its flag, leaving clears it.
    /// Built-in tags take precedence over custom descriptors of the same name,
    /// and replacing descriptors never become flags.
    pub fn after(&self, event: &WalkEvent<'_>, tags: &[CustomTag]) -> Self {
        let (name, active) = match event {
            WalkEvent::Enter(name) => (*name, true),
            WalkEvent::Exit(name) => (*name, false),
            WalkEvent::Text(_) => return self.clone(),
        };

        let mut next = self.clone();

        match BuiltinStyle::from_tag(name) {
            Some(BuiltinStyle::Bold) => next.bold = active,
            Some(BuiltinStyle::Italic) => next.italic = active,
            Some(BuiltinStyle::Underline) => next.underline = active,
            None => {
                for tag in tags.iter().filter(|tag| !tag.is_replacer() && tag.matches(name)) {
                    if active {
                        next.custom.insert(tag.name.clone());
                    } else {
                        next.custom.remove(&tag.name);
                    }
                }
            }
        }

        next
    }

    /// Whether the decorating custom tag `name` is active.
    pub fn is_custom(&self, name: &str) -> bool {
        self.custom.iter().any(|tag| tag.eq_ignore_ascii_case(name))
    }

    /// True when no flag at all is set.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline && self.custom.is_empty()
    }
}

/// A contiguous `[start, end)` character range with the styles active over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRun {
    pub start: usize,
    pub end: usize,
    pub styles: ActiveStyles,
}

impl StyleRun {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies within `[start, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub fn is_bold(&self) -> bool {
        self.styles.bold
    }

    pub fn is_italic(&self) -> bool {
        self.styles.italic
    }

    pub fn is_underlined(&self) -> bool {
        self.styles.underline
    }

    pub fn is_custom(&self, name: &str) -> bool {
        self.styles.is_custom(name)
    }
}

impl std::fmt::Display for StyleRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}) bold={} italic={} underline={}",
            self.start, self.end, self.styles.bold, self.styles.italic, self.styles.underline
        )?;
        for tag in &self.styles.custom {
            write!(f, " +{}", tag)?;
        }
        Ok(())
    }
}
