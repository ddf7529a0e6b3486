use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::document::{RunStats, Section, TextElement, outline};

use super::{
    BLOCKS_LEFT_PADDING, BLOCKS_WIDTH_PERCENT, OUTLINE_WIDTH_PERCENT, overlays, status, style,
};

/// Indent of block text under its label line.
const BODY_INDENT: &str = "  ";

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(OUTLINE_WIDTH_PERCENT),
            Constraint::Percentage(BLOCKS_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
///
/// Takes the model mutably to keep `scroll_offset` following the cursor.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let content_area = if model.outline_visible {
        let chunks = split_main_columns(main_area);
        render_outline(model, frame, chunks[0]);
        chunks[1]
    } else {
        main_area
    };

    if model.is_editing() {
        render_editor(model, frame, content_area);
        status::render_editor_status_bar(model, frame, status_area);
    } else {
        render_blocks(model, frame, content_area);
        status::render_status_bar(model, frame, status_area);
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_outline(model: &Model, frame: &mut Frame, area: Rect) {
    let (rows, active) = outline_rows(model);
    let visible_rows = area.height.saturating_sub(2) as usize;
    let start = active.map_or(0, |row| {
        (row + 1).saturating_sub(visible_rows)
    });
    let items: Vec<Line> = rows.into_iter().skip(start).take(visible_rows).collect();

    let selected = model.session.selected_count();
    let title = if selected == 0 {
        "Outline".to_string()
    } else {
        format!("Outline ({selected} selected)")
    };
    let outline_block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(items).block(outline_block), area);
}

/// One line per outline section, and the row of the section holding the
/// cursor.
fn outline_rows(model: &Model) -> (Vec<Line<'static>>, Option<usize>) {
    let elements = model.elements();
    let mut rows = Vec::new();
    let mut active = None;

    for section in outline::sections(elements) {
        match section {
            Section::Intro(range) => {
                if range.contains(&model.cursor) {
                    active = Some(rows.len());
                }
                rows.push(untitled_row("Intro", &range, model.cursor));
            }
            Section::Standalone(range) => {
                if range.contains(&model.cursor) {
                    active = Some(rows.len());
                }
                rows.push(untitled_row("Untitled", &range, model.cursor));
            }
            Section::Titled { title, run } => {
                let element = &elements[title];
                let on_title = model.cursor == title;
                if on_title || run.contains(&model.cursor) {
                    active = Some(rows.len());
                }
                let marker = if model.session.is_collapsed(element.id()) {
                    "\u{25b8}"
                } else {
                    "\u{25be}"
                };
                let check = if model.session.is_selected(element.id()) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let count = RunStats::for_title(elements, title).count;
                let mut line_style = style::style_for_kind(element.kind());
                if on_title {
                    line_style = line_style.reversed();
                } else if run.contains(&model.cursor) {
                    line_style = line_style.underlined();
                }
                rows.push(Line::styled(
                    format!("{marker} {check} {} ({count})", element.text),
                    line_style,
                ));
            }
        }
    }
    (rows, active)
}

fn untitled_row(name: &str, range: &Range<usize>, cursor: usize) -> Line<'static> {
    let text = format!("  {name} ({})", range.len());
    let line_style = if range.contains(&cursor) {
        style::intro_style().reversed()
    } else {
        style::intro_style()
    };
    Line::styled(text, line_style)
}

fn render_blocks(model: &mut Model, frame: &mut Frame, area: Rect) {
    let stats = model.session.stats();
    let blocks_block = Block::default()
        .title(format!("Blocks ({})", stats.blocks))
        .borders(Borders::ALL)
        .padding(Padding::left(BLOCKS_LEFT_PADDING));
    let inner = blocks_block.inner(area);
    frame.render_widget(Clear, area);

    if model.elements().is_empty() {
        let hint = vec![
            Line::styled("No text loaded.", style::dim_style()),
            Line::styled(
                "Paste text to segment it, or press n to add a paragraph.",
                style::dim_style(),
            ),
        ];
        frame.render_widget(Paragraph::new(hint).block(blocks_block), area);
        return;
    }

    let (lines, cursor_rows) = block_lines(model, inner.width);
    let height = inner.height as usize;
    model.scroll_offset = scroll_to_show(model.scroll_offset, height, cursor_rows)
        .min(lines.len().saturating_sub(1));

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(model.scroll_offset)
        .take(height)
        .collect();
    frame.render_widget(Paragraph::new(visible).block(blocks_block), area);
}

/// Lay out every visible block and return the row range of the block
/// under the cursor.
fn block_lines(model: &Model, width: u16) -> (Vec<Line<'static>>, Range<usize>) {
    let text_width = (width as usize).saturating_sub(BODY_INDENT.len()).max(1);
    let mut lines = Vec::new();
    let mut cursor_rows = 0..0;

    for (index, element) in model.session.document().visible() {
        let start = lines.len();
        let under_cursor = index == model.cursor;
        lines.push(header_line(model, index, element, under_cursor));

        if element.text.trim().is_empty() {
            lines.push(Line::styled(
                format!("{BODY_INDENT}(empty)"),
                style::dim_style(),
            ));
        } else {
            let body_style = style::style_for_kind(element.kind());
            for row in wrap_text(&element.text, text_width) {
                lines.push(Line::styled(format!("{BODY_INDENT}{row}"), body_style));
            }
        }

        if under_cursor {
            cursor_rows = start..lines.len();
        }
        lines.push(Line::raw(""));
    }
    (lines, cursor_rows)
}

fn header_line(
    model: &Model,
    index: usize,
    element: &TextElement,
    under_cursor: bool,
) -> Line<'static> {
    let id = element.id();
    let mut spans = vec![
        Span::raw(if under_cursor { "\u{25b6} " } else { "  " }),
        if model.session.is_selected(id) {
            Span::styled("[x] ", style::selected_style())
        } else {
            Span::styled("[ ] ", style::dim_style())
        },
        Span::styled(
            element.display_label(),
            style::header_style(element.kind(), under_cursor),
        ),
    ];

    if element.is_title() {
        if model.session.is_collapsed(id) {
            let hidden = RunStats::for_title(model.elements(), index).count;
            spans.push(Span::raw(" \u{25b8}"));
            spans.push(Span::styled(
                format!(" {hidden} hidden"),
                style::dim_style(),
            ));
        } else {
            spans.push(Span::raw(" \u{25be}"));
        }
    } else if outline::is_before_first_title(model.elements(), index) {
        spans.push(Span::styled(" intro", style::intro_style()));
    }

    if element.applied {
        spans.push(Span::styled(" \u{2713} applied", style::applied_style()));
    }
    spans.push(Span::styled(
        format!(" \u{b7} {} chars", element.char_count()),
        style::dim_style(),
    ));
    if model.pending_delete == Some(id) {
        spans.push(Span::styled(" [d again to delete]", style::danger_style()));
    }
    Line::from(spans)
}

/// New scroll offset so that `target` rows are inside the window.
///
/// When the target is taller than the window its first row wins.
pub fn scroll_to_show(offset: usize, height: usize, target: Range<usize>) -> usize {
    if height == 0 || target.start < offset {
        return target.start;
    }
    if target.end > offset + height {
        return target.end.saturating_sub(height).min(target.start);
    }
    offset
}

/// Greedy word wrap measured in terminal columns.
///
/// Line breaks in `text` are kept. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in line.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());
            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        rows.push(current);
    }
    rows
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(editor) = &model.editor else {
        return;
    };
    let buf = &editor.buffer;

    let editor_block = Block::default()
        .title(format!("Editing {}", editor.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = editor_block.inner(area);

    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines) as usize;
    let visible_height = inner.height as usize;
    let cursor_line = buf.line();
    let start = (cursor_line + 1).saturating_sub(visible_height);
    let end = (start + visible_height).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>gutter_width$} ", line_idx + 1);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor_line {
            let col = buf.column();
            let before: String = line_text.chars().take(col).collect();
            let under: String = line_text
                .chars()
                .nth(col)
                .map_or_else(|| " ".to_string(), String::from);
            let after: String = line_text.chars().skip(col + 1).collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(
                under,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(line_text));
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(editor_block), area);
}

/// Digits needed to print line numbers up to `total_lines`.
pub const fn line_number_width(total_lines: usize) -> u16 {
    let mut width = 1;
    let mut rest = total_lines / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_short_lines() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_at_words() {
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_keeps_line_breaks() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_counts_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(wrap_text("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_scroll_keeps_visible_target() {
        assert_eq!(scroll_to_show(5, 10, 6..9), 5);
    }

    #[test]
    fn test_scroll_up_to_target() {
        assert_eq!(scroll_to_show(5, 10, 2..4), 2);
    }

    #[test]
    fn test_scroll_down_to_target() {
        assert_eq!(scroll_to_show(0, 10, 12..15), 5);
    }

    #[test]
    fn test_scroll_prefers_start_of_tall_target() {
        assert_eq!(scroll_to_show(0, 4, 6..20), 6);
    }

    #[test]
    fn test_line_number_width() {
        assert_eq!(line_number_width(0), 1);
        assert_eq!(line_number_width(9), 1);
        assert_eq!(line_number_width(10), 2);
        assert_eq!(line_number_width(12_345), 5);
    }
}
