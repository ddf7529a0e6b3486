//! Editing session: a document plus the view state around it.
//!
//! Collapsed titles and selected blocks are tracked by id, outside the
//! element sequence, so that renumbering and re-segmenting never have to
//! reason about them.

use std::collections::BTreeSet;

use crate::document::{Document, DocumentStats, ElementId, RunStats, TextElement, outline};

/// A document being edited and its view-state sets.
#[derive(Debug, Clone, Default)]
pub struct Session {
    document: Document,
    source: String,
    collapsed: BTreeSet<ElementId>,
    selected: BTreeSet<ElementId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from raw text.
    pub fn from_text(raw: &str) -> Self {
        let mut session = Self::new();
        session.load_text(raw);
        session
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub fn elements(&self) -> &[TextElement] {
        self.document.elements()
    }

    /// The raw text the current elements were segmented from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace everything with a fresh segmentation of `raw`.
    pub fn load_text(&mut self, raw: &str) {
        let raw = crate::document::normalize_input(raw);
        self.document.load_text(&raw);
        self.source = raw;
        self.collapsed.clear();
        self.selected.clear();
        tracing::debug!(
            blocks = self.document.len(),
            titles = self.document.stats().titles,
            "segmented text"
        );
    }

    /// Segment the stored source text again, dropping all edits.
    pub fn resegment(&mut self) {
        let raw = std::mem::take(&mut self.source);
        self.load_text(&raw);
    }

    /// Append an empty paragraph. A collapsed last title is expanded so the
    /// new block is on screen.
    pub fn insert_empty_paragraph(&mut self) -> ElementId {
        let id = self.document.push_empty_paragraph();
        let elements = self.document.elements();
        let owner = outline::owning_title(elements, elements.len() - 1).map(|i| elements[i].id());
        if let Some(title) = owner.filter(|title| self.collapsed.remove(title)) {
            self.document.set_collapsed(title, false);
        }
        tracing::debug!(%id, "inserted empty paragraph");
        id
    }

    /// Delete a block. Returns false if the id is unknown.
    pub fn delete(&mut self, id: ElementId) -> bool {
        if self.document.remove(id).is_none() {
            return false;
        }
        self.collapsed.remove(&id);
        self.selected.remove(&id);
        // The deleted title's run now belongs to the previous title.
        self.sync_visibility();
        tracing::debug!(%id, "deleted block");
        true
    }

    /// Replace a block's text. Numbering and kind do not change.
    pub fn update_text(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        self.document.set_text(id, text)
    }

    pub fn is_collapsed(&self, id: ElementId) -> bool {
        self.collapsed.contains(&id)
    }

    /// Collapse an expanded title or expand a collapsed one.
    ///
    /// Returns the new collapsed state, or `None` when `id` is not a title.
    pub fn toggle_collapse(&mut self, id: ElementId) -> Option<bool> {
        if !self.document.find(id)?.is_title() {
            return None;
        }
        let collapsed = !self.collapsed.remove(&id);
        if collapsed {
            self.collapsed.insert(id);
        }
        self.document.set_collapsed(id, collapsed);
        Some(collapsed)
    }

    pub fn collapse_all(&mut self) {
        self.collapsed = self
            .document
            .elements()
            .iter()
            .filter(|el| el.is_title())
            .map(TextElement::id)
            .collect();
        self.document.collapse_all();
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
        self.document.expand_all();
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Add a block to or remove it from the selection. Unknown ids are
    /// ignored and return false.
    pub fn toggle_selection(&mut self, id: ElementId) -> bool {
        if self.document.find(id).is_none() {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    /// Select every block of the document.
    pub fn select_all(&mut self) {
        self.selected = self
            .document
            .elements()
            .iter()
            .map(TextElement::id)
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected blocks in document order.
    pub fn selected(&self) -> impl Iterator<Item = &TextElement> {
        self.document
            .elements()
            .iter()
            .filter(|el| self.selected.contains(&el.id()))
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Mark every selected block as applied and return their joined text.
    ///
    /// The selection is cleared afterwards. Returns `None` when nothing is
    /// selected.
    pub fn apply_selected(&mut self) -> Option<String> {
        if self.selected.is_empty() {
            return None;
        }
        let ids: Vec<ElementId> = self.selected().map(TextElement::id).collect();
        let content = self
            .selected()
            .map(|el| el.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        for id in &ids {
            self.document.set_applied(*id, true);
        }
        self.selected.clear();
        tracing::info!(blocks = ids.len(), "applied selection");
        Some(content)
    }

    pub fn clear_applied(&mut self) {
        self.document.clear_applied();
    }

    /// Mark every block as applied.
    pub fn apply_all(&mut self) {
        self.document.apply_all();
    }

    /// Empty the document, the source text and both view sets.
    pub fn clear_all(&mut self) {
        self.document.clear();
        self.source.clear();
        self.collapsed.clear();
        self.selected.clear();
    }

    pub fn stats(&self) -> DocumentStats {
        self.document.stats()
    }

    /// Statistics over the current selection.
    pub fn selection_stats(&self) -> RunStats {
        RunStats::over(self.selected())
    }

    pub fn to_plain_text(&self) -> String {
        self.document.to_plain_text()
    }

    fn sync_visibility(&mut self) {
        self.collapsed
            .retain(|id| self.document.find(*id).is_some_and(TextElement::is_title));
        self.document.expand_all();
        for id in &self.collapsed {
            self.document.set_collapsed(*id, true);
        }
    }
}
