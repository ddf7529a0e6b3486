//! Text segmentation and the block document model.
//!
//! This module handles:
//! - Splitting raw text into title and paragraph blocks
//! - Keeping titles and paragraphs numbered in document order
//! - Deriving which paragraphs belong to which title, and collapsing them

mod numbering;
pub mod outline;
mod segmenter;
mod stats;
mod types;

pub use numbering::renumber;
pub use outline::Section;
pub use segmenter::{Segment, is_title, segment, starts_with_number};
pub use stats::{DocumentStats, RunStats};
pub use types::{Document, ElementId, ElementKind, IdAllocator, TextElement};

/// Normalize pasted or loaded text before segmenting.
///
/// Converts CRLF and lone CR line endings to LF and drops a leading byte
/// order mark. Everything else is kept as-is.
pub fn normalize_input(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_input_line_endings() {
        assert_eq!(normalize_input("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_normalize_input_strips_bom() {
        assert_eq!(normalize_input("\u{feff}1. A"), "1. A");
    }

    #[test]
    fn test_paragraphs_follow_previous_title_after_delete() {
        let mut doc = Document::from_text("Intro\n\n1. A\n\na1\n\n2. B\n\nb1\n\nb2");
        let b = doc.get(3).map(TextElement::id).unwrap();
        doc.remove(b);

        let texts: Vec<&str> = outline::associated_run(doc.elements(), 1)
            .iter()
            .map(|el| el.text.as_str())
            .collect();
        assert_eq!(texts, vec!["a1", "b1", "b2"]);
        assert_eq!(doc.stats().titles, 1);
        assert_eq!(doc.stats().paragraphs, 4);
    }

    #[test]
    fn test_deleting_only_title_leaves_standalone_paragraphs() {
        let mut doc = Document::from_text("1. A\n\na\n\nb");
        let a = doc.get(0).map(TextElement::id).unwrap();
        doc.remove(a);
        assert_eq!(outline::sections(doc.elements()), vec![Section::Standalone(0..2)]);
    }

    #[test]
    fn test_collapse_through_document() {
        let mut doc = Document::from_text("1. A\n\na\n\n2. B\n\nb");
        let first = doc.get(0).map(TextElement::id).unwrap();
        doc.set_collapsed(first, true);
        let visible: Vec<usize> = doc.visible().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![0, 2, 3]);
        doc.collapse_all();
        assert_eq!(doc.visible().count(), 2);
        doc.expand_all();
        assert_eq!(doc.visible().count(), 4);
    }
}
