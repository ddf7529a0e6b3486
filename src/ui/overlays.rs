use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::style;

const KEY_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Navigation",
        &[
            "  j/k or Up/Down      Previous / next block",
            "  PageUp/PageDown     Ten blocks",
            "  g / G, Home/End     First / last block",
        ],
    ),
    (
        "Outline",
        &[
            "  o                   Toggle outline pane",
            "  c                   Collapse / expand title",
            "  C / E               Collapse / expand all",
        ],
    ),
    (
        "Selection",
        &[
            "  Space               Select block",
            "  V                   Select all",
            "  Esc                 Clear selection",
            "  a                   Apply selection + copy",
            "  A                   Clear applied marks",
        ],
    ),
    (
        "Blocks",
        &[
            "  e / Enter           Edit block",
            "  n                   New paragraph",
            "  d d                 Delete block",
            "  R                   Segment source again",
            "  X X                 Clear everything",
            "  Paste               Load and segment text",
        ],
    ),
    (
        "Editor",
        &[
            "  Esc / Ctrl-s        Keep changes",
            "  Ctrl-c              Discard changes",
            "  Ctrl-u              Clear text",
            "  Ctrl+Left/Right     Word movement",
        ],
    ),
    (
        "Other",
        &[
            "  s                   Save text to <file>.blocks.txt",
            "  x                   Export request",
            "  q / Ctrl-c          Quit",
            "  ? / F1              Toggle help",
        ],
    ),
];

fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (section, keys) in KEY_SECTIONS {
        lines.push(Line::styled(*section, section_style));
        lines.extend(keys.iter().map(|key| Line::raw(*key)));
        lines.push(Line::raw(""));
    }

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    let endpoint = if model.api.url.trim().is_empty() {
        "<not set>".to_string()
    } else {
        format!("{} {}", model.api.method, model.api.url)
    };

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines.push(Line::raw(format!("  Endpoint: {endpoint}")));
    lines.push(Line::raw(format!("  Language: {}", model.language)));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Last row is the footer hint.
    let content_height = inner.height.saturating_sub(1);
    let lines: Vec<Line> = help_lines(model)
        .into_iter()
        .take(content_height as usize)
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(lines), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", style::dim_style());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
