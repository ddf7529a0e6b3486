//! Colors for blocks, markers and bars.
//!
//! Uses ANSI colors so the palette follows the terminal theme.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;
use crate::document::ElementKind;

/// Base style of a block's text.
pub fn style_for_kind(kind: ElementKind) -> Style {
    match kind {
        ElementKind::Title => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ElementKind::Paragraph => Style::default(),
    }
}

/// Style of the label line above a block.
pub fn header_style(kind: ElementKind, under_cursor: bool) -> Style {
    let base = match kind {
        ElementKind::Title => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ElementKind::Paragraph => Style::default().fg(Color::Indexed(250)),
    };
    if under_cursor {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

/// Paragraphs that come before the first title.
pub fn intro_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::ITALIC)
}

pub fn applied_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn danger_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn status_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn editor_status_style() -> Style {
    Style::default().bg(Color::Magenta).fg(Color::White)
}

/// Prefix and colors of a toast line.
pub fn toast_style(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", status_style()),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_are_bold() {
        let style = style_for_kind(ElementKind::Title);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(
            !style_for_kind(ElementKind::Paragraph)
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }

    #[test]
    fn test_cursor_header_is_reversed() {
        let style = header_style(ElementKind::Paragraph, true);
        assert!(style.add_modifier.contains(Modifier::REVERSED));
        let style = header_style(ElementKind::Paragraph, false);
        assert!(!style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_toast_prefixes() {
        assert_eq!(toast_style(ToastLevel::Info).0, "[info]");
        assert_eq!(toast_style(ToastLevel::Warning).0, "[warn]");
        assert_eq!(toast_style(ToastLevel::Error).0, "[error]");
    }
}
