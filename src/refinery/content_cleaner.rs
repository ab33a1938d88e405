// * Body Text Cleaning
// * Shakes boilerplate subtrees out of the document body and yields collapsed,
// * length-capped plain text.

use regex::Regex;
use scraper::{Html, Node, Selector};
use std::sync::LazyLock;

static SELECTOR_BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// * Subtrees skipped entirely during text collection.
const STRIPPED_CONTAINERS: &[&str] = &[
    "script", "style", "noscript", "nav", "footer", "header", "aside",
];

/// Extracts visible body text from parsed markup.
pub struct ContentCleaner;

impl ContentCleaner {
    /// Collects text from the `<body>` subtree, skipping boilerplate
    /// containers, collapsing whitespace runs, and capping the length.
    pub fn body_text(document: &Html, cap_chars: usize) -> String {
        let mut raw = String::new();

        if let Some(body) = document.select(&SELECTOR_BODY).next() {
            // * Depth-first walk in document order; stripped containers are
            // * never descended into.
            let mut stack: Vec<_> = body.children().collect();
            stack.reverse();

            while let Some(node) = stack.pop() {
                match node.value() {
                    Node::Text(text) => {
                        raw.push_str(text);
                        raw.push(' ');
                    }
                    Node::Element(element) => {
                        if !STRIPPED_CONTAINERS.contains(&element.name()) {
                            let mut children: Vec<_> = node.children().collect();
                            children.reverse();
                            stack.extend(children);
                        }
                    }
                    _ => {}
                }
            }
        }

        let collapsed = WHITESPACE_RUN.replace_all(&raw, " ");
        truncate_chars(collapsed.trim(), cap_chars)
    }
}

/// Truncates to at most `cap` characters on a char boundary.
pub fn truncate_chars(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
