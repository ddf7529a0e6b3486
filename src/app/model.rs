use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::{ElementId, TextElement, outline};
use crate::editor::BlockEditor;
use crate::outbound::ApiSettings;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document and its view-state sets
    pub session: Session,
    /// File the text was loaded from, if any
    pub file_path: Option<PathBuf>,
    /// Index of the block under the cursor
    pub cursor: usize,
    /// First rendered row of the blocks pane
    pub scroll_offset: usize,
    /// Whether the outline pane is visible
    pub outline_visible: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Open block edit, if any
    pub editor: Option<BlockEditor>,
    /// Endpoint settings used for request export
    pub api: ApiSettings,
    /// Language used for the suggested audio file name
    pub language: String,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Block awaiting a second delete press
    pub pending_delete: Option<ElementId>,
    /// Set after the first clear-all press
    pub clear_confirmed: bool,
    /// Text waiting to be copied to the clipboard by the effects step
    pub pending_clipboard: Option<String>,
    /// Terminal size as last reported
    pub terminal_size: (u16, u16),
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("blocks", &self.session.elements().len())
            .field("cursor", &self.cursor)
            .field("outline_visible", &self.outline_visible)
            .field("editing", &self.editor.is_some())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for a session.
    pub fn new(session: Session, file_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            file_path,
            terminal_size,
            ..Self::default()
        }
    }

    pub fn elements(&self) -> &[TextElement] {
        self.session.elements()
    }

    /// The block under the cursor.
    pub fn current(&self) -> Option<&TextElement> {
        self.elements().get(self.cursor)
    }

    pub fn current_id(&self) -> Option<ElementId> {
        self.current().map(TextElement::id)
    }

    /// Indices of the blocks that are not hidden by a collapse.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.session
            .document()
            .visible()
            .map(|(index, _)| index)
            .collect()
    }

    /// Move the cursor by `delta` visible blocks.
    pub(super) fn move_cursor_by(&mut self, delta: isize) {
        let visible = self.visible_indices();
        let Some(pos) = visible.iter().position(|&i| i == self.cursor) else {
            self.clamp_cursor();
            return;
        };
        let target = pos.saturating_add_signed(delta).min(visible.len() - 1);
        self.cursor = visible[target];
    }

    pub(super) fn cursor_to_first(&mut self) {
        self.cursor = self.visible_indices().first().copied().unwrap_or(0);
    }

    pub(super) fn cursor_to_last(&mut self) {
        self.cursor = self.visible_indices().last().copied().unwrap_or(0);
    }

    /// Put the cursor back on a visible block after the document changed.
    ///
    /// A cursor on a hidden block moves to the title that owns it.
    pub(super) fn clamp_cursor(&mut self) {
        let elements = self.session.elements();
        if elements.is_empty() {
            self.cursor = 0;
            self.scroll_offset = 0;
            return;
        }
        self.cursor = self.cursor.min(elements.len() - 1);
        if !elements[self.cursor].visible {
            self.cursor = outline::owning_title(elements, self.cursor).unwrap_or(0);
        }
    }

    /// Move the cursor to the block with `id`, if it exists.
    pub(super) fn focus(&mut self, id: ElementId) {
        if let Some(index) = self.session.document().index_of(id) {
            self.cursor = index;
        }
    }

    pub const fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Display name of the loaded file.
    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map_or_else(
                || "untitled".to_string(),
                |name| name.to_string_lossy().to_string(),
            )
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            session: Session::new(),
            file_path: None,
            cursor: 0,
            scroll_offset: 0,
            outline_visible: true,
            help_visible: false,
            editor: None,
            api: ApiSettings::default(),
            language: "spanish".to_string(),
            config_global_path: None,
            config_local_path: None,
            pending_delete: None,
            clear_confirmed: false,
            pending_clipboard: None,
            terminal_size: (80, 24),
            toast: None,
            should_quit: false,
        }
    }
}
