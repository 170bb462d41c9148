use regex::Regex;
use std::sync::LazyLock;

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\s*([A-Za-z0-9_]*)\s*\]\s*$").expect("section header pattern is valid")
});

/// What a single physical line of a topology file is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// `[ name ]`, carrying the bare section name.
    SectionHeader(&'a str),
    /// A line whose first non-blank character is `;`.
    Comment(&'a str),
    /// A preprocessor line such as `#include "x.itp"`.
    Directive(&'a str),
    Data {
        tokens: Vec<&'a str>,
        comment: Option<&'a str>,
    },
}

/// Splits a line at the first `;` into its content and the trimmed comment text.
pub fn split_inline_comment(line: &str) -> (&str, Option<&str>) {
    match line.split_once(';') {
        Some((content, comment)) => (content, Some(comment.trim())),
        None => (line, None),
    }
}

pub fn tokenize(content: &str) -> Vec<&str> {
    content.split_whitespace().collect()
}

pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if let Some(caps) = SECTION_HEADER.captures(line) {
        if let Some(name) = caps.get(1) {
            return Line::SectionHeader(name.as_str());
        }
    }
    if trimmed.starts_with(';') {
        return Line::Comment(line.trim_end());
    }
    if trimmed.starts_with('#') {
        return Line::Directive(line.trim_end());
    }
    let (content, comment) = split_inline_comment(line);
    Line::Data {
        tokens: tokenize(content),
        comment: comment.filter(|c| !c.is_empty()),
    }
}
