//! In-place editing of a single block's text.
//!
//! Provides a rope-backed text buffer with cursor management and the
//! editor state that ties it to the block being edited.

mod buffer;

pub use buffer::{Direction, TextBuffer};

use crate::document::ElementId;

/// An open edit of one block.
#[derive(Debug)]
pub struct BlockEditor {
    target: ElementId,
    label: String,
    original: String,
    pub buffer: TextBuffer,
}

impl BlockEditor {
    pub fn open(target: ElementId, label: impl Into<String>, text: &str) -> Self {
        Self {
            target,
            label: label.into(),
            original: text.to_string(),
            buffer: TextBuffer::from_text(text),
        }
    }

    /// Id of the block being edited.
    pub const fn target(&self) -> ElementId {
        self.target
    }

    /// Label of the block, e.g. `Paragraph 3`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The edited text, trimmed like segmented text is.
    ///
    /// `None` when the result matches the text the editor opened with.
    pub fn finish(self) -> Option<String> {
        if !self.buffer.is_dirty() {
            return None;
        }
        let text = self.buffer.text().trim().to_string();
        (text != self.original).then_some(text)
    }
}
