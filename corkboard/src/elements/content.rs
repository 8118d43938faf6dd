//! Node bodies - rich-text capable HTML containers.

use rich_text::{paragraph_html, Fragment, RichText, RichTextOptions, TagListener};
use serde::{Deserialize, Serialize};

/// The HTML body of a node.
///
/// Holds the source fragment and renders it on demand, so edits to the HTML
/// are always reflected in the text views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    html: String,
}

impl Content {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    /// Combined, whitespace-normalized text of the body.
    pub fn text(&self) -> String {
        Fragment::parse(&self.html).text()
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }

    /// Inner HTML of each paragraph, inline formatting intact.
    pub fn paragraph_html(&self) -> Vec<String> {
        paragraph_html(&self.html)
    }

    /// Render the body through the rich-text engine.
    pub fn rich_text(&self, options: &RichTextOptions) -> RichText {
        RichText::with_options(&self.html, options)
    }

    /// Render the body, reporting decorating-tag boundaries to `listener`.
    pub fn rich_text_with_listener(
        &self,
        options: &RichTextOptions,
        listener: &mut dyn TagListener,
    ) -> RichText {
        RichText::with_listener(&self.html, options, listener)
    }
}

impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}
