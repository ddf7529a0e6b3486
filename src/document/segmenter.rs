//! Splitting raw text into title and paragraph segments.
//!
//! A line becomes a title when it starts with a number and is set off from
//! its neighbours by blank lines. Blank lines only separate blocks; they never
//! become elements themselves.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::ElementKind;

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("leading number pattern is valid"));

/// One classified, non-blank line of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The trimmed line content.
    pub text: String,
    pub kind: ElementKind,
}

impl Segment {
    fn new(text: &str, kind: ElementKind) -> Self {
        Self {
            text: text.to_string(),
            kind,
        }
    }
}

/// Classify every non-blank line of `raw` in source order.
///
/// Blank-line context is measured on the unfiltered line list, so a run of
/// blank lines in the source counts even though none of them are emitted.
///
/// # Example
///
/// ```
/// use textblocks::document::{segment, ElementKind};
///
/// let segments = segment("1. Intro\n\nBody text.");
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].kind, ElementKind::Title);
/// assert_eq!(segments[1].kind, ElementKind::Paragraph);
/// ```
pub fn segment(raw: &str) -> Vec<Segment> {
    let lines: Vec<&str> = raw.split('\n').collect();
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let text = line.trim();
            if text.is_empty() {
                return None;
            }
            let kind = if is_title(text, index, &lines) {
                ElementKind::Title
            } else {
                ElementKind::Paragraph
            };
            Some(Segment::new(text, kind))
        })
        .collect()
}

/// Decide whether the line at `index` of `lines` is a title.
///
/// `text` is the trimmed content of that line. A title starts with a decimal
/// number and has at least one blank line on both sides, except that the
/// first line only needs one after it and the last line only one before it.
pub fn is_title(text: &str, index: usize, lines: &[&str]) -> bool {
    if !LEADING_NUMBER.is_match(text) {
        return false;
    }

    let before = blank_lines_before(lines, index);
    let after = blank_lines_after(lines, index);
    let is_first = index == 0;
    let is_last = index + 1 == lines.len();

    (before >= 1 && after >= 1) || (is_first && after >= 1) || (is_last && before >= 1)
}

/// Whether the trimmed line starts with at least one decimal digit.
pub fn starts_with_number(text: &str) -> bool {
    LEADING_NUMBER.is_match(text.trim())
}

fn blank_lines_before(lines: &[&str], index: usize) -> usize {
    lines[..index]
        .iter()
        .rev()
        .take_while(|line| line.trim().is_empty())
        .count()
}

fn blank_lines_after(lines: &[&str], index: usize) -> usize {
    lines
        .get(index + 1..)
        .unwrap_or_default()
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count()
}
