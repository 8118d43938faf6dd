//! Markup tree - an owned element/text tree built from the HTML parser output.
//!
//! The parser (`scraper`, backed by html5ever) is only used to tokenize and
//! build its DOM. Everything the engine does afterwards (code extraction, tag
//! replacement, walking) happens on this small owned tree.

mod walk;

pub use walk::*;

use scraper::{ElementRef, Html, Node, Selector};

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element(MarkupElement),
    /// Whitespace-normalized text.
    Text(String),
}

/// An element with a lowercase tag name and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    pub name: String,
    pub children: Vec<Markup>,
}

impl MarkupElement {
    /// Whether this element has the given tag name (ASCII case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Normalized, trimmed text of every descendant text node.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        collect_text(&self.children, &mut raw);
        normalize_whitespace(&raw).trim().to_string()
    }
}

/// A parsed HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub children: Vec<Markup>,
}

impl Fragment {
    /// Parse an HTML fragment. Malformed markup never fails; the parser
    /// recovers the way browsers do.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_fragment(html);
        Self {
            children: convert_children(document.root_element()),
        }
    }

    /// Normalized, trimmed text of the whole fragment.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        collect_text(&self.children, &mut raw);
        normalize_whitespace(&raw).trim().to_string()
    }

    /// Remove every element with the given tag name, returning the text of
    /// each removed element in document order.
    ///
    /// Nested matches are reported after the element that contains them.
    pub fn extract(&mut self, name: &str) -> Vec<String> {
        let mut extracted = Vec::new();
        extract_from(&mut self.children, name, &mut extracted);
        extracted
    }

    /// Replace every element with the given tag name (and its descendants)
    /// with a literal text node. Returns the number of replaced elements.
    pub fn replace(&mut self, name: &str, replacement: &str) -> usize {
        replace_in(&mut self.children, name, replacement)
    }

    /// Number of elements with the given tag name anywhere in the tree.
    pub fn count(&self, name: &str) -> usize {
        count_in(&self.children, name)
    }
}

fn convert_children(element: ElementRef<'_>) -> Vec<Markup> {
    let mut children = Vec::new();

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            children.push(Markup::Element(MarkupElement {
                name: child_element.value().name().to_ascii_lowercase(),
                children: convert_children(child_element),
            }));
        } else if let Node::Text(text) = child.value() {
            let raw: &str = text;
            children.push(Markup::Text(normalize_whitespace(raw)));
        }
        // Comments, doctypes and processing instructions carry no text.
    }

    children
}

/// Elements whose boundaries separate words in the text views.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

fn is_block(element: &MarkupElement) -> bool {
    BLOCK_ELEMENTS.iter().any(|name| element.is(name))
}

fn separate(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

fn collect_text(children: &[Markup], out: &mut String) {
    for child in children {
        match child {
            Markup::Text(text) => out.push_str(text),
            Markup::Element(element) if element.is("br") => separate(out),
            Markup::Element(element) => {
                let block = is_block(element);
                if block {
                    separate(out);
                }
                collect_text(&element.children, out);
                if block {
                    separate(out);
                }
            }
        }
    }
}

fn extract_from(children: &mut Vec<Markup>, name: &str, extracted: &mut Vec<String>) {
    children.retain_mut(|child| match child {
        Markup::Element(element) if element.is(name) => {
            extracted.push(element.text());
            extract_from(&mut element.children, name, extracted);
            false
        }
        Markup::Element(element) => {
            extract_from(&mut element.children, name, extracted);
            true
        }
        Markup::Text(_) => true,
    });
}

fn replace_in(children: &mut [Markup], name: &str, replacement: &str) -> usize {
    let mut replaced = 0;

    for child in children.iter_mut() {
        match child {
            Markup::Element(element) if element.is(name) => {
                *child = Markup::Text(replacement.to_string());
                replaced += 1;
            }
            Markup::Element(element) => {
                replaced += replace_in(&mut element.children, name, replacement);
            }
            Markup::Text(_) => {}
        }
    }

    replaced
}

fn count_in(children: &[Markup], name: &str) -> usize {
    children
        .iter()
        .map(|child| match child {
            Markup::Element(element) => {
                usize::from(element.is(name)) + count_in(&element.children, name)
            }
            Markup::Text(_) => 0,
        })
        .sum()
}

/// Unescape the five basic HTML entities.
///
/// Runs before parsing so that custom tag syntax escaped by an editor turns
/// back into markup. Replacement order is fixed: `&lt;`, `&gt;`, `&amp;`,
/// `&quot;`, `&apos;`.
pub fn decode_entities(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

/// Collapse every run of whitespace into a single space.
pub fn normalize_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                normalized.push(' ');
            }
            in_whitespace = true;
        } else {
            normalized.push(ch);
            in_whitespace = false;
        }
    }

    normalized
}

/// Inner HTML of every `<p>` element in document order.
///
/// Inline formatting tags are kept so each paragraph can be rendered on its own.
pub fn paragraph_html(html: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };

    Html::parse_fragment(html)
        .select(&selector)
        .map(|paragraph| paragraph.inner_html())
        .collect()
}
