//! Markdown rendering for the live preview pane and list rows.
//!
//! # Responsibility
//! - Render draft or note content to HTML for the preview pane.
//! - Derive a short plain-text excerpt for list rows without a summary.
//!
//! # Invariants
//! - Rendering is pure and never fails; invalid markdown renders as text.
//! - Excerpts hold at most `EXCERPT_MAX_CHARS` chars, whitespace collapsed.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

pub const EXCERPT_MAX_CHARS: usize = 100;
pub const EMPTY_SUMMARY_PLACEHOLDER: &str = "No summary yet";

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\([^)]+\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\*_`#>~\-\[\]\(\)!]+").expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders CommonMark (plus tables and strikethrough) to HTML.
pub fn render_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(content, options);

    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Plain-text excerpt of markdown `content`, or `None` when nothing is left.
///
/// Images are dropped, links keep their label, markdown symbols become
/// spaces and whitespace runs collapse.
pub fn excerpt(content: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(EXCERPT_MAX_CHARS).collect())
    }
}

/// Summary line for display, falling back to the placeholder.
pub fn summary_or_placeholder(summary: Option<&str>) -> &str {
    summary
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(EMPTY_SUMMARY_PLACEHOLDER)
}
