use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model};
use crate::editor::Direction;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Paste(text) => Some(Message::Paste(text.clone())),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if model.is_editing() {
            return Self::handle_editor_key(key);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Message::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::CursorUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::CursorTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::CursorBottom),

            // Quit
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('c') if ctrl => Some(Message::Quit),

            // Outline
            KeyCode::Char('o') => Some(Message::ToggleOutline),
            KeyCode::Char('c') => Some(Message::ToggleCollapse),
            KeyCode::Char('C') => Some(Message::CollapseAll),
            KeyCode::Char('E') => Some(Message::ExpandAll),

            // Selection
            KeyCode::Char(' ') => Some(Message::ToggleSelection),
            KeyCode::Char('V') => Some(Message::SelectAll),
            KeyCode::Esc => Some(Message::ClearSelection),
            KeyCode::Char('a') => Some(Message::ApplySelection),
            KeyCode::Char('A') => Some(Message::ClearApplied),

            // Editing
            KeyCode::Enter | KeyCode::Char('e') => Some(Message::StartEdit),
            KeyCode::Char('n') => Some(Message::InsertParagraph),
            KeyCode::Char('d') => Some(Message::DeleteBlock),
            KeyCode::Char('R') => Some(Message::Resegment),
            KeyCode::Char('X') => Some(Message::ClearAll),

            // Files
            KeyCode::Char('s') => Some(Message::SaveText),
            KeyCode::Char('x') => Some(Message::ExportRequest),

            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            _ => None,
        }
    }

    fn handle_editor_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Message::CommitEdit),
            KeyCode::Char('c') if ctrl => Some(Message::DiscardEdit),
            KeyCode::Char('s') if ctrl => Some(Message::CommitEdit),
            KeyCode::Char('u') if ctrl => Some(Message::EditorClear),
            KeyCode::Char(c) if !ctrl => Some(Message::EditorInsertChar(c)),
            KeyCode::Enter => Some(Message::EditorNewline),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left if ctrl => Some(Message::EditorMoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::EditorMoveWordRight),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            _ => None,
        }
    }
}
