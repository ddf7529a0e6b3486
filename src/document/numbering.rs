//! Sequential numbering of titles and paragraphs.

use super::types::{ElementKind, TextElement};

/// Recompute title and paragraph numbers in one pass over `elements`.
///
/// Titles and paragraphs are counted independently, each from 1, in document
/// order. The number of the other kind is cleared on every element. Order,
/// text, visibility and applied state are untouched.
pub fn renumber(elements: &mut [TextElement]) {
    let mut next_title = 1;
    let mut next_paragraph = 1;

    for element in elements.iter_mut() {
        match element.kind() {
            ElementKind::Title => {
                element.title_number = Some(next_title);
                element.paragraph_number = None;
                next_title += 1;
            }
            ElementKind::Paragraph => {
                element.paragraph_number = Some(next_paragraph);
                element.title_number = None;
                next_paragraph += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::ElementId;

    fn build(kinds: &[ElementKind]) -> Vec<TextElement> {
        kinds
            .iter()
            .zip(1u64..)
            .map(|(kind, raw)| TextElement::new(ElementId::new(raw), format!("e{raw}"), *kind))
            .collect()
    }

    use ElementKind::{Paragraph as P, Title as T};

    #[test]
    fn test_counters_are_independent() {
        let mut els = build(&[P, T, P, P, T, P]);
        renumber(&mut els);
        let numbers: Vec<_> = els
            .iter()
            .map(|e| (e.title_number(), e.paragraph_number()))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (None, Some(1)),
                (Some(1), None),
                (None, Some(2)),
                (None, Some(3)),
                (Some(2), None),
                (None, Some(4)),
            ]
        );
    }

    #[test]
    fn test_stale_numbers_are_overwritten() {
        let mut els = build(&[T, P]);
        els[0].paragraph_number = Some(9);
        els[0].title_number = Some(7);
        els[1].title_number = Some(3);
        renumber(&mut els);
        assert_eq!(els[0].title_number(), Some(1));
        assert_eq!(els[0].paragraph_number(), None);
        assert_eq!(els[1].title_number(), None);
        assert_eq!(els[1].paragraph_number(), Some(1));
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut els = build(&[T, P]);
        els[1].visible = false;
        els[1].applied = true;
        let ids: Vec<_> = els.iter().map(TextElement::id).collect();
        renumber(&mut els);
        assert!(!els[1].visible);
        assert!(els[1].applied);
        assert_eq!(els.iter().map(TextElement::id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_renumber_after_removal_closes_gap() {
        let mut els = build(&[P, P, P]);
        renumber(&mut els);
        els.remove(1);
        renumber(&mut els);
        assert_eq!(els[1].paragraph_number(), Some(2));
    }

    #[test]
    fn test_empty_sequence() {
        let mut els: Vec<TextElement> = Vec::new();
        renumber(&mut els);
        assert!(els.is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn kinds() -> impl Strategy<Value = Vec<ElementKind>> {
            prop::collection::vec(prop_oneof![Just(T), Just(P)], 0..200)
        }

        proptest! {
            #[test]
            fn numbers_are_dense_per_kind(kinds in kinds()) {
                let mut els = build(&kinds);
                renumber(&mut els);

                let titles: Vec<usize> = els.iter().filter_map(TextElement::title_number).collect();
                let paragraphs: Vec<usize> =
                    els.iter().filter_map(TextElement::paragraph_number).collect();
                let title_count = kinds.iter().filter(|k| **k == T).count();

                prop_assert_eq!(titles, (1..=title_count).collect::<Vec<_>>());
                prop_assert_eq!(
                    paragraphs,
                    (1..=kinds.len() - title_count).collect::<Vec<_>>()
                );
            }

            #[test]
            fn exactly_one_number_per_element(kinds in kinds()) {
                let mut els = build(&kinds);
                renumber(&mut els);
                for el in &els {
                    prop_assert!(el.title_number().is_some() != el.paragraph_number().is_some());
                    prop_assert_eq!(el.title_number().is_some(), el.is_title());
                }
            }

            #[test]
            fn renumber_is_idempotent(kinds in kinds()) {
                let mut once = build(&kinds);
                renumber(&mut once);
                let mut twice = once.clone();
                renumber(&mut twice);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
