use crate::app::{Model, ToastLevel};
use crate::document::normalize_input;
use crate::editor::{BlockEditor, Direction};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    CursorUp,
    CursorDown,
    /// Move the cursor by a page of blocks
    PageUp,
    PageDown,
    CursorTop,
    CursorBottom,

    // Outline
    ToggleOutline,
    /// Collapse or expand the title under the cursor
    ToggleCollapse,
    CollapseAll,
    ExpandAll,

    // Selection and apply
    ToggleSelection,
    SelectAll,
    ClearSelection,
    /// Mark the selection applied and copy its text
    ApplySelection,
    ClearApplied,

    // Structure
    InsertParagraph,
    /// Delete the block under the cursor (asks for a second press)
    DeleteBlock,
    /// Segment the source text again
    Resegment,
    /// Remove everything (asks for a second press)
    ClearAll,
    /// Text pasted while not editing replaces the source
    Paste(String),

    // Side effects (handled in effects)
    SaveText,
    ExportRequest,

    // Editor
    /// Open the editor on the block under the cursor
    StartEdit,
    /// Close the editor keeping the changes
    CommitEdit,
    /// Close the editor dropping the changes
    DiscardEdit,
    EditorInsertChar(char),
    EditorInsertStr(String),
    EditorNewline,
    EditorDeleteBack,
    EditorDeleteForward,
    EditorClear,
    EditorMoveCursor(Direction),
    EditorMoveHome,
    EditorMoveEnd,
    EditorMoveWordLeft,
    EditorMoveWordRight,

    // Window
    ToggleHelp,
    HideHelp,
    Resize(u16, u16),
    Redraw,

    // Application
    Quit,
}

/// Blocks moved by one page.
const PAGE_BLOCKS: isize = 10;

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File writes and clipboard access happen afterwards in the effects step.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Confirmations only survive a repeat of the same action.
    if !matches!(msg, Message::DeleteBlock) {
        model.pending_delete = None;
    }
    if !matches!(msg, Message::ClearAll) {
        model.clear_confirmed = false;
    }

    match msg {
        Message::CursorUp => model.move_cursor_by(-1),
        Message::CursorDown => model.move_cursor_by(1),
        Message::PageUp => model.move_cursor_by(-PAGE_BLOCKS),
        Message::PageDown => model.move_cursor_by(PAGE_BLOCKS),
        Message::CursorTop => model.cursor_to_first(),
        Message::CursorBottom => model.cursor_to_last(),

        Message::ToggleOutline => {
            model.outline_visible = !model.outline_visible;
        }
        Message::ToggleCollapse => toggle_collapse(&mut model),
        Message::CollapseAll => {
            model.session.collapse_all();
            model.clamp_cursor();
        }
        Message::ExpandAll => model.session.expand_all(),

        Message::ToggleSelection => {
            if let Some(id) = model.current_id() {
                model.session.toggle_selection(id);
            }
        }
        Message::SelectAll => model.session.select_all(),
        Message::ClearSelection => model.session.clear_selection(),
        Message::ApplySelection => match model.session.apply_selected() {
            Some(content) => model.pending_clipboard = Some(content),
            None => model.show_toast(ToastLevel::Warning, "Nothing selected"),
        },
        Message::ClearApplied => {
            model.session.clear_applied();
            model.show_toast(ToastLevel::Info, "Cleared applied blocks");
        }

        Message::InsertParagraph => {
            let id = model.session.insert_empty_paragraph();
            model.focus(id);
            open_editor(&mut model);
        }
        Message::DeleteBlock => delete_block(&mut model),
        Message::Resegment => {
            if model.session.source().trim().is_empty() {
                model.show_toast(ToastLevel::Warning, "No source text to segment");
            } else {
                model.session.resegment();
                model.cursor_to_first();
                announce_segmented(&mut model);
            }
        }
        Message::ClearAll => {
            if model.clear_confirmed {
                model.session.clear_all();
                model.clear_confirmed = false;
                model.cursor = 0;
                model.scroll_offset = 0;
                model.show_toast(ToastLevel::Info, "Cleared everything");
            } else {
                model.clear_confirmed = true;
                model.show_toast(ToastLevel::Warning, "Press X again to clear everything");
            }
        }
        Message::Paste(text) => {
            if let Some(editor) = model.editor.as_mut() {
                editor.buffer.insert_str(&normalize_input(&text));
            } else if text.trim().is_empty() {
                model.show_toast(ToastLevel::Warning, "Pasted text is empty");
            } else {
                model.session.load_text(&text);
                model.cursor_to_first();
                model.scroll_offset = 0;
                announce_segmented(&mut model);
            }
        }

        Message::StartEdit => open_editor(&mut model),
        Message::CommitEdit => {
            if let Some(editor) = model.editor.take() {
                let target = editor.target();
                let label = editor.label().to_string();
                if let Some(text) = editor.finish() {
                    model.session.update_text(target, text);
                    model.show_toast(ToastLevel::Info, format!("Updated {label}"));
                }
            }
        }
        Message::DiscardEdit => {
            if model.editor.take().is_some() {
                model.show_toast(ToastLevel::Info, "Edit discarded");
            }
        }
        Message::EditorInsertChar(ch) => edit(&mut model, |buf| buf.insert_char(ch)),
        Message::EditorInsertStr(text) => edit(&mut model, |buf| buf.insert_str(&text)),
        Message::EditorNewline => edit(&mut model, |buf| buf.insert_char('\n')),
        Message::EditorDeleteBack => edit(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::EditorDeleteForward => edit(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::EditorClear => edit(&mut model, crate::editor::TextBuffer::clear),
        Message::EditorMoveCursor(direction) => edit(&mut model, |buf| buf.move_cursor(direction)),
        Message::EditorMoveHome => edit(&mut model, crate::editor::TextBuffer::move_home),
        Message::EditorMoveEnd => edit(&mut model, crate::editor::TextBuffer::move_end),
        Message::EditorMoveWordLeft => edit(&mut model, crate::editor::TextBuffer::move_word_left),
        Message::EditorMoveWordRight => {
            edit(&mut model, crate::editor::TextBuffer::move_word_right);
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
        }
        // SaveText/ExportRequest: handled in effects (file I/O)
        // Redraw: no state change needed
        Message::SaveText | Message::ExportRequest | Message::Redraw => {}

        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}

fn edit(model: &mut Model, f: impl FnOnce(&mut crate::editor::TextBuffer)) {
    if let Some(editor) = model.editor.as_mut() {
        f(&mut editor.buffer);
    }
}

fn open_editor(model: &mut Model) {
    let Some(current) = model.current() else {
        return;
    };
    let editor = BlockEditor::open(current.id(), current.display_label(), &current.text);
    model.editor = Some(editor);
}

fn toggle_collapse(model: &mut Model) {
    let Some(current) = model.current() else {
        return;
    };
    let (id, label) = (current.id(), current.display_label());
    if model.session.toggle_collapse(id).is_none() {
        model.show_toast(ToastLevel::Info, format!("{label} is not a title"));
    }
}

fn delete_block(model: &mut Model) {
    let Some(current) = model.current() else {
        return;
    };
    let (id, label) = (current.id(), current.display_label());
    if model.pending_delete == Some(id) {
        model.session.delete(id);
        model.pending_delete = None;
        model.clamp_cursor();
        model.show_toast(ToastLevel::Info, format!("Deleted {label}"));
    } else {
        model.pending_delete = Some(id);
        model.show_toast(
            ToastLevel::Warning,
            format!("Press d again to delete {label}"),
        );
    }
}

fn announce_segmented(model: &mut Model) {
    let stats = model.session.stats();
    model.show_toast(
        ToastLevel::Info,
        format!(
            "Segmented {} blocks ({} titles, {} paragraphs)",
            stats.blocks, stats.titles, stats.paragraphs
        ),
    );
}
