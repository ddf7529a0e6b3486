//! Core document types.

use std::fmt;

use serde::Serialize;

/// Opaque identifier of a text element.
///
/// Ids are handed out by the owning [`Document`](super::Document) and stay
/// attached to an element for its whole life. They carry no ordering
/// meaning: document order is the position in the element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// Hands out unique element ids for one document.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator whose first id is `block-1`.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id. Never returns the same id twice.
    pub const fn allocate(&mut self) -> ElementId {
        self.next += 1;
        ElementId(self.next)
    }
}

/// Whether an element is a section heading or body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Title,
    Paragraph,
}

impl ElementKind {
    /// Human-readable label used in the blocks pane.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Paragraph => "Paragraph",
        }
    }
}

/// One block of the document: a title or a paragraph.
///
/// `kind` is fixed at creation. Numbers are owned by the renumbering pass and
/// are only meaningful after it has run over the containing sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    id: ElementId,
    /// Line content; titles keep their numeral prefix.
    pub text: String,
    kind: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) paragraph_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title_number: Option<usize>,
    /// False while hidden by the collapse of the owning title.
    pub visible: bool,
    /// Marked for the outbound request.
    pub applied: bool,
}

impl TextElement {
    /// Create a visible, unapplied, unnumbered element.
    pub fn new(id: ElementId, text: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
            paragraph_number: None,
            title_number: None,
            visible: true,
            applied: false,
        }
    }

    pub const fn id(&self) -> ElementId {
        self.id
    }

    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    pub const fn is_title(&self) -> bool {
        matches!(self.kind, ElementKind::Title)
    }

    pub const fn is_paragraph(&self) -> bool {
        matches!(self.kind, ElementKind::Paragraph)
    }

    /// 1-based position among paragraphs, set for paragraphs only.
    pub const fn paragraph_number(&self) -> Option<usize> {
        self.paragraph_number
    }

    /// 1-based position among titles, set for titles only.
    pub const fn title_number(&self) -> Option<usize> {
        self.title_number
    }

    /// The number that matches this element's kind.
    pub const fn number(&self) -> Option<usize> {
        match self.kind {
            ElementKind::Title => self.title_number,
            ElementKind::Paragraph => self.paragraph_number,
        }
    }

    /// Label such as `Title 2` or `Paragraph 7`.
    pub fn display_label(&self) -> String {
        match self.number() {
            Some(n) => format!("{} {n}", self.kind.label()),
            None => self.kind.label().to_string(),
        }
    }

    /// Number of characters (not bytes) in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of whitespace-separated words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// An ordered sequence of text elements.
///
/// Every structural change (re-segmenting, inserting, deleting) goes through
/// this type and ends with a full renumbering pass, so the numbering
/// invariants hold whenever a `Document` is observed from outside.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<TextElement>,
    ids: IdAllocator,
}

impl Document {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Segment `raw` into a new document.
    pub fn from_text(raw: &str) -> Self {
        let mut doc = Self::empty();
        doc.load_text(raw);
        doc
    }

    /// Replace every element with a fresh segmentation of `raw`.
    ///
    /// Ids keep increasing across reloads, so an id from before the reload
    /// never matches an element after it.
    pub fn load_text(&mut self, raw: &str) {
        let elements = super::segment(raw)
            .into_iter()
            .map(|seg| TextElement::new(self.ids.allocate(), seg.text, seg.kind))
            .collect();
        self.elements = elements;
        super::renumber(&mut self.elements);
    }

    /// All elements in document order.
    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at a document position.
    pub fn get(&self, index: usize) -> Option<&TextElement> {
        self.elements.get(index)
    }

    /// Document position of the element with `id`.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        super::outline::index_of(&self.elements, id)
    }

    /// Element with `id`.
    pub fn find(&self, id: ElementId) -> Option<&TextElement> {
        self.index_of(id).map(|index| &self.elements[index])
    }

    fn find_mut(&mut self, id: ElementId) -> Option<&mut TextElement> {
        self.elements.iter_mut().find(|el| el.id() == id)
    }

    /// Append an empty paragraph and return its id.
    pub fn push_empty_paragraph(&mut self) -> ElementId {
        let id = self.ids.allocate();
        self.elements
            .push(TextElement::new(id, String::new(), ElementKind::Paragraph));
        super::renumber(&mut self.elements);
        id
    }

    /// Remove the element with `id`. Returns the removed element.
    ///
    /// Paragraphs owned by a removed title are kept; they fall to the
    /// previous title, or to no title at all.
    pub fn remove(&mut self, id: ElementId) -> Option<TextElement> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        super::renumber(&mut self.elements);
        Some(removed)
    }

    /// Replace the text of an element. Kind and numbering are unchanged.
    ///
    /// The element is no longer applied: what was sent is not what is there
    /// now.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        let Some(element) = self.find_mut(id) else {
            return false;
        };
        element.text = text.into();
        element.applied = false;
        true
    }

    /// Mark or unmark an element for the outbound request.
    pub fn set_applied(&mut self, id: ElementId, applied: bool) -> bool {
        let Some(element) = self.find_mut(id) else {
            return false;
        };
        element.applied = applied;
        true
    }

    /// Unmark every element.
    pub fn clear_applied(&mut self) {
        for element in &mut self.elements {
            element.applied = false;
        }
    }

    /// Mark every element as applied.
    pub fn apply_all(&mut self) {
        for element in &mut self.elements {
            element.applied = true;
        }
    }

    /// Applied elements in document order.
    pub fn applied(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter(|el| el.applied)
    }

    /// Elements currently shown (not hidden by a collapsed title).
    pub fn visible(&self) -> impl Iterator<Item = (usize, &TextElement)> {
        self.elements.iter().enumerate().filter(|(_, el)| el.visible)
    }

    /// Show or hide the run of the title with `title_id`.
    pub fn set_collapsed(&mut self, title_id: ElementId, collapsed: bool) {
        super::outline::set_collapsed(&mut self.elements, title_id, collapsed);
    }

    pub fn collapse_all(&mut self) {
        super::outline::collapse_all(&mut self.elements);
    }

    pub fn expand_all(&mut self) {
        super::outline::expand_all(&mut self.elements);
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Non-empty element texts separated by blank lines.
    pub fn to_plain_text(&self) -> String {
        self.elements
            .iter()
            .filter(|el| !el.text.trim().is_empty())
            .map(|el| el.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn stats(&self) -> super::DocumentStats {
        super::DocumentStats::collect(&self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "block-1");
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_new_element_is_visible_and_unapplied() {
        let el = TextElement::new(ElementId::new(1), "1. Intro", ElementKind::Title);
        assert!(el.visible);
        assert!(!el.applied);
        assert!(el.is_title());
        assert_eq!(el.number(), None);
        assert_eq!(el.display_label(), "Title");
    }

    #[test]
    fn test_counts_use_chars_and_words() {
        let el = TextElement::new(ElementId::new(1), "  añejo  vino ", ElementKind::Paragraph);
        assert_eq!(el.char_count(), 14);
        assert_eq!(el.word_count(), 2);
    }

    #[test]
    fn test_serializes_only_the_number_of_its_kind() {
        let mut el = TextElement::new(ElementId::new(3), "Body", ElementKind::Paragraph);
        el.paragraph_number = Some(4);
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["kind"], "paragraph");
        assert_eq!(json["paragraphNumber"], 4);
        assert!(json.get("titleNumber").is_none());
    }

    fn numbering(doc: &Document) -> Vec<(bool, Option<usize>)> {
        doc.elements()
            .iter()
            .map(|el| (el.is_title(), el.number()))
            .collect()
    }

    #[test]
    fn test_document_from_text_is_numbered() {
        let doc = Document::from_text("\n1. Intro\n\nBody text.\n\n2. Next\n\nMore body.");
        assert_eq!(
            numbering(&doc),
            vec![
                (true, Some(1)),
                (false, Some(1)),
                (true, Some(2)),
                (false, Some(2)),
            ]
        );
        assert!(doc.elements().iter().all(|el| el.visible && !el.applied));
    }

    #[test]
    fn test_reload_never_reuses_ids() {
        let mut doc = Document::from_text("a\nb");
        let old: Vec<_> = doc.elements().iter().map(TextElement::id).collect();
        doc.load_text("a\nb");
        assert!(doc.elements().iter().all(|el| !old.contains(&el.id())));
    }

    #[test]
    fn test_push_empty_paragraph_appends_and_numbers() {
        let mut doc = Document::from_text("1. A\n\nx");
        let id = doc.push_empty_paragraph();
        let last = doc.elements().last().unwrap();
        assert_eq!(last.id(), id);
        assert_eq!(last.text, "");
        assert_eq!(last.paragraph_number(), Some(2));
    }

    #[test]
    fn test_remove_title_keeps_paragraphs_and_renumbers() {
        let mut doc = Document::from_text("1. A\n\na\n\n2. B\n\nb\n\n3. C\n\nc");
        let b = doc.get(2).unwrap().id();
        let removed = doc.remove(b).unwrap();
        assert_eq!(removed.text, "2. B");
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.get(3).unwrap().title_number(), Some(2));
        assert_eq!(
            super::super::outline::owning_title(doc.elements(), 2),
            Some(0)
        );
        assert!(doc.remove(b).is_none());
    }

    #[test]
    fn test_set_text_resets_applied_but_not_numbers() {
        let mut doc = Document::from_text("x\ny");
        let id = doc.get(1).unwrap().id();
        doc.set_applied(id, true);
        assert!(doc.set_text(id, "changed"));
        let el = doc.find(id).unwrap();
        assert_eq!(el.text, "changed");
        assert!(!el.applied);
        assert_eq!(el.paragraph_number(), Some(2));
        assert!(!doc.set_text(ElementId::new(999), "nope"));
    }

    #[test]
    fn test_applied_in_document_order() {
        let mut doc = Document::from_text("a\nb\nc");
        let c = doc.get(2).unwrap().id();
        let a = doc.get(0).unwrap().id();
        doc.set_applied(c, true);
        doc.set_applied(a, true);
        let texts: Vec<_> = doc.applied().map(|el| el.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
        doc.clear_applied();
        assert_eq!(doc.applied().count(), 0);
    }

    #[test]
    fn test_plain_text_skips_empty_blocks() {
        let mut doc = Document::from_text("\n1. Intro\n\nBody");
        doc.push_empty_paragraph();
        assert_eq!(doc.to_plain_text(), "1. Intro\n\nBody");
        let again = Document::from_text(&doc.to_plain_text());
        assert!(again.get(0).unwrap().is_title());
    }
}
