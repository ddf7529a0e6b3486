//! Title/paragraph association and collapse propagation.
//!
//! Every relation here is derived from document order on each call. Nothing
//! is cached between calls, so inserts and deletes can never leave a stale
//! association behind.

use std::ops::Range;

use super::types::{ElementId, TextElement};

/// One group of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Paragraphs before the first title of a document that has titles.
    Intro(Range<usize>),
    /// A title and the run of elements it owns.
    Titled { title: usize, run: Range<usize> },
    /// Paragraphs of a document without any title.
    Standalone(Range<usize>),
}

/// Index of the first title, if the document has one.
pub fn first_title_index(elements: &[TextElement]) -> Option<usize> {
    elements.iter().position(TextElement::is_title)
}

/// Index range of the run owned by the title at `title_index`.
///
/// The run starts right after the title and stops before the next title or
/// at the end of the sequence. It is empty when `title_index` is not a title.
pub fn run_range(elements: &[TextElement], title_index: usize) -> Range<usize> {
    let Some(title) = elements.get(title_index) else {
        return elements.len()..elements.len();
    };
    let start = title_index + 1;
    if !title.is_title() {
        return start..start;
    }
    let end = elements[start..]
        .iter()
        .position(TextElement::is_title)
        .map_or(elements.len(), |offset| start + offset);
    start..end
}

/// The elements owned by the title at `title_index`, in order.
pub fn associated_run(elements: &[TextElement], title_index: usize) -> &[TextElement] {
    &elements[run_range(elements, title_index)]
}

/// Elements before the first title.
///
/// Empty when the document has no title: such paragraphs belong to no title
/// and are not an introduction to anything.
pub fn intro_run(elements: &[TextElement]) -> &[TextElement] {
    match first_title_index(elements) {
        Some(first) => &elements[..first],
        None => &[],
    }
}

/// Whether the element at `index` sits before the first title.
pub fn is_before_first_title(elements: &[TextElement], index: usize) -> bool {
    first_title_index(elements).is_some_and(|first| index < first)
}

/// Index of the title owning the element at `index`.
///
/// A title owns itself. Returns `None` for content before the first title.
pub fn owning_title(elements: &[TextElement], index: usize) -> Option<usize> {
    let upto = elements.get(..=index)?;
    upto.iter().rposition(TextElement::is_title)
}

/// Position of the element with `id` in document order.
pub fn index_of(elements: &[TextElement], id: ElementId) -> Option<usize> {
    elements.iter().position(|el| el.id() == id)
}

/// Show or hide the run owned by the title with `title_id`.
///
/// Unknown ids and ids of paragraphs are ignored. The title itself always
/// stays visible, and runs of other titles are not touched.
pub fn set_collapsed(elements: &mut [TextElement], title_id: ElementId, collapsed: bool) {
    let Some(title_index) = index_of(elements, title_id) else {
        return;
    };
    if !elements[title_index].is_title() {
        return;
    }
    let run = run_range(elements, title_index);
    for element in &mut elements[run] {
        element.visible = !collapsed;
    }
}

/// Make every element visible.
pub fn expand_all(elements: &mut [TextElement]) {
    for element in elements.iter_mut() {
        element.visible = true;
    }
}

/// Collapse every title in turn. Titles stay visible; intro content is not
/// owned by any title and keeps its visibility.
pub fn collapse_all(elements: &mut [TextElement]) {
    let title_ids: Vec<ElementId> = elements
        .iter()
        .filter(|el| el.is_title())
        .map(TextElement::id)
        .collect();
    for id in title_ids {
        set_collapsed(elements, id, true);
    }
}

/// Group the document into outline sections.
pub fn sections(elements: &[TextElement]) -> Vec<Section> {
    let Some(first) = first_title_index(elements) else {
        return if elements.is_empty() {
            Vec::new()
        } else {
            vec![Section::Standalone(0..elements.len())]
        };
    };

    let mut out = Vec::new();
    if first > 0 {
        out.push(Section::Intro(0..first));
    }
    let mut title = first;
    while title < elements.len() {
        let run = run_range(elements, title);
        let next = run.end;
        out.push(Section::Titled { title, run });
        title = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::{ElementKind, IdAllocator};

    fn doc(layout: &[(&str, ElementKind)]) -> Vec<TextElement> {
        let mut ids = IdAllocator::new();
        layout
            .iter()
            .map(|(text, kind)| TextElement::new(ids.allocate(), *text, *kind))
            .collect()
    }

    use ElementKind::{Paragraph as P, Title as T};

    fn sample() -> Vec<TextElement> {
        doc(&[
            ("1. Intro", T),
            ("Body text.", P),
            ("2. Next", T),
            ("More body.", P),
        ])
    }

    fn texts(run: &[TextElement]) -> Vec<&str> {
        run.iter().map(|el| el.text.as_str()).collect()
    }

    fn visibility(els: &[TextElement]) -> Vec<bool> {
        els.iter().map(|el| el.visible).collect()
    }

    #[test]
    fn test_associated_run_stops_at_next_title() {
        let els = sample();
        assert_eq!(texts(associated_run(&els, 0)), vec!["Body text."]);
        assert_eq!(texts(associated_run(&els, 2)), vec!["More body."]);
    }

    #[test]
    fn test_run_empty_for_adjacent_titles_and_last_title() {
        let els = doc(&[("1. A", T), ("2. B", T), ("x", P), ("3. C", T)]);
        assert!(associated_run(&els, 0).is_empty());
        assert_eq!(texts(associated_run(&els, 1)), vec!["x"]);
        assert!(associated_run(&els, 3).is_empty());
    }

    #[test]
    fn test_run_of_paragraph_or_out_of_range_is_empty() {
        let els = sample();
        assert!(associated_run(&els, 1).is_empty());
        assert!(associated_run(&els, 99).is_empty());
    }

    #[test]
    fn test_intro_is_separate_from_runs() {
        let els = doc(&[("Preface", P), ("Note", P), ("1. A", T), ("a", P)]);
        assert_eq!(texts(intro_run(&els)), vec!["Preface", "Note"]);
        assert!(is_before_first_title(&els, 1));
        assert!(!is_before_first_title(&els, 3));
        assert_eq!(owning_title(&els, 0), None);
        assert_eq!(owning_title(&els, 3), Some(2));
    }

    #[test]
    fn test_no_titles_means_no_intro() {
        let els = doc(&[("a", P), ("b", P)]);
        assert!(intro_run(&els).is_empty());
        assert!(!is_before_first_title(&els, 0));
        assert_eq!(sections(&els), vec![Section::Standalone(0..2)]);
    }

    #[test]
    fn test_collapse_hides_only_own_run() {
        let mut els = sample();
        let intro_id = els[0].id();
        set_collapsed(&mut els, intro_id, true);
        assert_eq!(visibility(&els), vec![true, false, true, true]);

        set_collapsed(&mut els, intro_id, false);
        assert_eq!(visibility(&els), vec![true, true, true, true]);
    }

    #[test]
    fn test_collapse_unknown_or_paragraph_id_is_noop() {
        let mut els = sample();
        let paragraph_id = els[1].id();
        set_collapsed(&mut els, ElementId::new(999), true);
        set_collapsed(&mut els, paragraph_id, true);
        assert_eq!(visibility(&els), vec![true; 4]);
    }

    #[test]
    fn test_collapse_all_keeps_titles_and_intro_visible() {
        let mut els = doc(&[("Preface", P), ("1. A", T), ("a", P), ("2. B", T), ("b", P)]);
        collapse_all(&mut els);
        assert_eq!(visibility(&els), vec![true, true, false, true, false]);

        expand_all(&mut els);
        assert_eq!(visibility(&els), vec![true; 5]);
    }

    #[test]
    fn test_deleting_title_reassigns_its_paragraphs() {
        let mut els = doc(&[("1. A", T), ("a", P), ("2. B", T), ("b", P)]);
        els.remove(2);
        assert_eq!(owning_title(&els, 2), Some(0));
        assert_eq!(texts(associated_run(&els, 0)), vec!["a", "b"]);

        els.remove(0);
        assert_eq!(owning_title(&els, 0), None);
    }

    #[test]
    fn test_sections_cover_document() {
        let els = doc(&[("Preface", P), ("1. A", T), ("a", P), ("b", P), ("2. B", T)]);
        assert_eq!(
            sections(&els),
            vec![
                Section::Intro(0..1),
                Section::Titled { title: 1, run: 2..4 },
                Section::Titled { title: 4, run: 5..5 },
            ]
        );
        assert!(sections(&[]).is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn collapse_never_hides_titles(
                kinds in prop::collection::vec(prop_oneof![Just(T), Just(P)], 0..60),
                pick in 0usize..60,
            ) {
                let layout: Vec<(&str, ElementKind)> = kinds.iter().map(|k| ("x", *k)).collect();
                let mut els = doc(&layout);
                if let Some(el) = els.get(pick % els.len().max(1)) {
                    let id = el.id();
                    set_collapsed(&mut els, id, true);
                }
                collapse_all(&mut els);
                for el in &els {
                    if el.is_title() {
                        prop_assert!(el.visible);
                    }
                }
            }

            #[test]
            fn sections_partition_elements(
                kinds in prop::collection::vec(prop_oneof![Just(T), Just(P)], 0..60),
            ) {
                let layout: Vec<(&str, ElementKind)> = kinds.iter().map(|k| ("x", *k)).collect();
                let els = doc(&layout);
                let mut covered = 0;
                for section in sections(&els) {
                    covered += match section {
                        Section::Intro(r) | Section::Standalone(r) => r.len(),
                        Section::Titled { run, .. } => run.len() + 1,
                    };
                }
                prop_assert_eq!(covered, els.len());
            }
        }
    }
}
