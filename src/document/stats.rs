//! Document statistics.

use super::outline::associated_run;
use super::types::TextElement;

/// Totals over a whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub blocks: usize,
    pub titles: usize,
    pub paragraphs: usize,
    pub words: usize,
    pub characters: usize,
    pub applied: usize,
}

impl DocumentStats {
    pub fn collect(elements: &[TextElement]) -> Self {
        elements.iter().fold(Self::default(), |mut acc, el| {
            acc.blocks += 1;
            if el.is_title() {
                acc.titles += 1;
            } else {
                acc.paragraphs += 1;
            }
            acc.words += el.word_count();
            acc.characters += el.char_count();
            acc.applied += usize::from(el.applied);
            acc
        })
    }
}

/// Size of the run owned by one title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub count: usize,
    pub words: usize,
    pub characters: usize,
}

impl RunStats {
    /// Statistics for the run of the title at `title_index`.
    pub fn for_title(elements: &[TextElement], title_index: usize) -> Self {
        Self::over(associated_run(elements, title_index))
    }

    /// Statistics over an arbitrary slice of elements.
    pub fn over<'a>(elements: impl IntoIterator<Item = &'a TextElement>) -> Self {
        elements.into_iter().fold(Self::default(), |mut acc, el| {
            acc.count += 1;
            acc.words += el.word_count();
            acc.characters += el.char_count();
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::{ElementKind, IdAllocator};

    fn sample() -> Vec<TextElement> {
        let mut ids = IdAllocator::new();
        let mut els = vec![
            TextElement::new(ids.allocate(), "1. Intro", ElementKind::Title),
            TextElement::new(ids.allocate(), "one two three", ElementKind::Paragraph),
            TextElement::new(ids.allocate(), "", ElementKind::Paragraph),
            TextElement::new(ids.allocate(), "2. Next", ElementKind::Title),
        ];
        els[1].applied = true;
        els
    }

    #[test]
    fn test_document_stats() {
        let stats = DocumentStats::collect(&sample());
        assert_eq!(
            stats,
            DocumentStats {
                blocks: 4,
                titles: 2,
                paragraphs: 2,
                words: 7,
                characters: 8 + 13 + 7,
                applied: 1,
            }
        );
    }

    #[test]
    fn test_run_stats_counts_empty_paragraphs() {
        let stats = RunStats::for_title(&sample(), 0);
        assert_eq!(
            stats,
            RunStats {
                count: 2,
                words: 3,
                characters: 13,
            }
        );
        assert_eq!(RunStats::for_title(&sample(), 3), RunStats::default());
    }
}
