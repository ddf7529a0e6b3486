//! JSON body sent for the applied blocks.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::document::{ElementId, TextElement};

/// One applied block as it appears in `elements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementEntry {
    pub id: ElementId,
    pub text: String,
    pub is_title: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_number: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleEntry {
    pub id: ElementId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_number: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphEntry {
    pub id: ElementId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
}

/// Request body describing every applied block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub content: String,
    pub elements: Vec<ElementEntry>,
    pub titles: Vec<TitleEntry>,
    pub paragraphs: Vec<ParagraphEntry>,
    pub total_elements: usize,
    pub total_titles: usize,
    pub total_paragraphs: usize,
    pub total_characters: usize,
    pub timestamp: String,
}

impl RequestBody {
    /// Build the body from the applied blocks of `elements`, in document
    /// order.
    pub fn build(elements: &[TextElement], now: DateTime<Utc>) -> Self {
        let applied: Vec<&TextElement> = elements.iter().filter(|el| el.applied).collect();

        let content = applied
            .iter()
            .map(|el| outbound_text(el))
            .collect::<Vec<_>>()
            .join("\n\n");

        let entries: Vec<ElementEntry> = applied
            .iter()
            .map(|el| ElementEntry {
                id: el.id(),
                text: outbound_text(el).to_string(),
                is_title: el.is_title(),
                number: el.paragraph_number(),
                title_number: el.title_number(),
            })
            .collect();

        let titles: Vec<TitleEntry> = applied
            .iter()
            .filter(|el| el.is_title())
            .map(|el| TitleEntry {
                id: el.id(),
                text: strip_title_prefix(&el.text).to_string(),
                title_number: el.title_number(),
            })
            .collect();

        let paragraphs: Vec<ParagraphEntry> = applied
            .iter()
            .filter(|el| el.is_paragraph())
            .map(|el| ParagraphEntry {
                id: el.id(),
                text: el.text.clone(),
                number: el.paragraph_number(),
            })
            .collect();

        Self {
            total_characters: content.chars().count(),
            total_elements: entries.len(),
            total_titles: titles.len(),
            total_paragraphs: paragraphs.len(),
            content,
            elements: entries,
            titles,
            paragraphs,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Drop the first two characters of a title, the assumed `N.` numeral.
///
/// Counts characters, not bytes. Titles shorter than two characters become
/// empty.
pub fn strip_title_prefix(text: &str) -> &str {
    text.char_indices()
        .nth(2)
        .map_or("", |(offset, _)| &text[offset..])
}

fn outbound_text(element: &TextElement) -> &str {
    if element.is_title() {
        strip_title_prefix(&element.text)
    } else {
        &element.text
    }
}
