use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::style;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(status_text(model)).style(style::status_style());
    frame.render_widget(status, area);
}

/// File name, document totals and the selection, in one line.
pub(super) fn status_text(model: &Model) -> String {
    let stats = model.session.stats();
    let position = if stats.blocks == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", model.cursor + 1, stats.blocks)
    };

    let mut status = format!(
        " {}  [{position}]  {} titles \u{b7} {} paragraphs \u{b7} {} words \u{b7} {} chars",
        model.file_name(),
        stats.titles,
        stats.paragraphs,
        stats.words,
        stats.characters,
    );
    if stats.applied > 0 {
        status.push_str(&format!("  applied {}", stats.applied));
    }
    let selected = model.session.selection_stats();
    if selected.count > 0 {
        status.push_str(&format!(
            "  sel {} ({} chars)",
            selected.count, selected.characters
        ));
    }
    status.push_str("  ?:help");
    status
}

pub fn render_editor_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(editor) = &model.editor else {
        return;
    };
    let dirty_indicator = if editor.buffer.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let status = format!(
        " EDIT  {}{dirty_indicator}  Ln {}, Col {}  Esc:done  Ctrl+C:discard",
        editor.label(),
        editor.buffer.line() + 1,
        editor.buffer.column() + 1,
    );
    frame.render_widget(
        Paragraph::new(status).style(style::editor_status_style()),
        area,
    );
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, toast_style) = style::toast_style(level);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(toast_style);
    frame.render_widget(toast, area);
}
