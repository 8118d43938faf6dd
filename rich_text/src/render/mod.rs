//! Rich text rendering - plain text plus style runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::markup::{decode_entities, Fragment, WalkEvent};
use crate::styles::{ActiveStyles, BuiltinStyle, StyleRun};
use crate::tags::{CustomTag, NoListener, TagListener};

/// Options controlling how a fragment is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextOptions {
    /// Pull `<code>` elements out of the text into [`RichText::code_blocks`].
    pub extract_code_blocks: bool,

    /// Custom tags, in the order their flags and callbacks are evaluated.
    pub custom_tags: Vec<CustomTag>,
}

impl RichTextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable code block extraction.
    pub fn with_code_blocks(mut self) -> Self {
        self.extract_code_blocks = true;
        self
    }

    /// Add a custom tag descriptor.
    pub fn with_tag(mut self, tag: CustomTag) -> Self {
        self.custom_tags.push(tag);
        self
    }
}

/// Plain text with a gap-free, non-overlapping set of style runs covering
/// every character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    plain_text: String,
    runs: Vec<StyleRun>,
    custom_tags: Vec<CustomTag>,
    code_blocks: Option<Vec<String>>,
}

/// A run whose end boundary may not be known yet.
struct PendingRun {
    start: usize,
    end: Option<usize>,
    styles: ActiveStyles,
}

fn close_last(runs: &mut [PendingRun], offset: usize) {
    if let Some(last) = runs.last_mut() {
        if last.end.is_none() {
            last.end = Some(offset);
        }
    }
}

impl RichText {
    /// Render with default options.
    pub fn parse(html: &str) -> Self {
        Self::with_options(html, &RichTextOptions::default())
    }

    /// Render with the given options, ignoring tag callbacks.
    pub fn with_options(html: &str, options: &RichTextOptions) -> Self {
        Self::with_listener(html, options, &mut NoListener)
    }

    /// Render with the given options, reporting decorating-tag boundaries to
    /// `listener`.
    pub fn with_listener(
        html: &str,
        options: &RichTextOptions,
        listener: &mut dyn TagListener,
    ) -> Self {
        let mut fragment = Fragment::parse(&decode_entities(html));

        let code_blocks = options
            .extract_code_blocks
            .then(|| fragment.extract("code"));

        for tag in &options.custom_tags {
            if let Some(replacement) = tag.replacement() {
                let replaced = fragment.replace(&tag.name, replacement);
                if replaced > 0 {
                    debug!(tag = %tag.name, replaced, "replaced custom tag");
                }
            }
        }

        let tags = &options.custom_tags;
        let mut plain_text = String::new();
        let mut runs: Vec<PendingRun> = Vec::new();
        let mut offset = 0;
        let mut active = ActiveStyles::new();

        for event in fragment.walk() {
            let next = active.after(&event, tags);

            match event {
                WalkEvent::Enter(name) => {
                    for tag in decorating(tags, name) {
                        listener.on_start(tag, offset);
                    }
                }
                WalkEvent::Exit(name) => {
                    for tag in decorating(tags, name) {
                        listener.on_end(tag, offset);
                    }
                    close_last(&mut runs, offset);
                }
                WalkEvent::Text(text) if !text.is_empty() => {
                    close_last(&mut runs, offset);
                    plain_text.push_str(text);
                    runs.push(PendingRun {
                        start: offset,
                        end: None,
                        styles: next.clone(),
                    });
                    offset += text.chars().count();
                }
                WalkEvent::Text(_) => {}
            }

            active = next;
        }

        close_last(&mut runs, offset);

        let runs = runs
            .into_iter()
            .map(|run| StyleRun {
                start: run.start,
                end: run.end.unwrap_or(offset),
                styles: run.styles,
            })
            .collect();

        Self {
            plain_text,
            runs,
            custom_tags: options.custom_tags.clone(),
            code_blocks,
        }
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    /// Length of the plain text in characters.
    pub fn len(&self) -> usize {
        self.plain_text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.plain_text.is_empty()
    }

    /// Style runs in creation order.
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    pub fn custom_tags(&self) -> &[CustomTag] {
        &self.custom_tags
    }

    /// Extracted code blocks, or `None` when extraction was not requested.
    pub fn code_blocks(&self) -> Option<&[String]> {
        self.code_blocks.as_deref()
    }

    /// The run covering the character at `offset`.
    pub fn style_at(&self, offset: usize) -> Option<&StyleRun> {
        self.runs.iter().find(|run| run.contains(offset))
    }

    /// The text covered by `run`.
    pub fn slice(&self, run: &StyleRun) -> &str {
        let start = self.byte_offset(run.start);
        let end = self.byte_offset(run.end);
        &self.plain_text[start..end]
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.plain_text
            .char_indices()
            .nth(char_offset)
            .map(|(index, _)| index)
            .unwrap_or(self.plain_text.len())
    }
}

impl std::fmt::Display for RichText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.plain_text)
    }
}

/// Decorating tags matching `name`. Built-in tag names never reach them.
fn decorating<'a>(tags: &'a [CustomTag], name: &'a str) -> impl Iterator<Item = &'a CustomTag> {
    let builtin = BuiltinStyle::from_tag(name).is_some();
    tags.iter()
        .filter(move |tag| !builtin && !tag.is_replacer() && tag.matches(name))
}
