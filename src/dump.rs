//! Non-interactive output of a segmented document.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::app::RequestExport;
use crate::document::{RunStats, Section, outline};
use crate::outbound::{ApiSettings, RequestPlan, audio_filename};
use crate::session::Session;

/// What `--dump` prints instead of starting the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// Titles with their runs, indented
    Outline,
    /// Every block as JSON
    Elements,
    /// Blocks separated by blank lines
    Text,
    /// The request that export would write, with every block applied
    Request,
}

/// Render `session` in `format`.
///
/// # Errors
///
/// Returns an error if a request cannot be planned from the settings or the
/// output cannot be serialized.
pub fn dump(
    session: &mut Session,
    format: DumpFormat,
    api: &ApiSettings,
    language: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    match format {
        DumpFormat::Outline => Ok(outline_text(session)),
        DumpFormat::Elements => serde_json::to_string_pretty(session.elements())
            .context("Failed to serialize elements"),
        DumpFormat::Text => Ok(session.to_plain_text()),
        DumpFormat::Request => {
            session.apply_all();
            let plan = RequestPlan::build(api, session.elements(), now)
                .context("Cannot build request")?;
            if let Some(warning) = &plan.warning {
                tracing::warn!(%warning, "request headers");
            }
            let export = RequestExport {
                request: &plan,
                audio_filename: audio_filename(session.elements(), language),
            };
            serde_json::to_string_pretty(&export).context("Failed to serialize request")
        }
    }
}

fn outline_text(session: &Session) -> String {
    let elements = session.elements();
    let mut out = String::new();
    for section in outline::sections(elements) {
        let (heading, run) = match section {
            Section::Intro(range) => (format!("Intro ({})", range.len()), range),
            Section::Standalone(range) => (format!("Untitled ({})", range.len()), range),
            Section::Titled { title, run } => {
                let count = RunStats::for_title(elements, title).count;
                (format!("{} ({count})", elements[title].text), run)
            }
        };
        let _ = writeln!(out, "{heading}");
        for element in &elements[run] {
            let _ = writeln!(out, "  {}: {}", element.display_label(), element.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SAMPLE: &str = "Preface\n\n1. Intro\n\nBody text.\n\n2. Next\n\nMore body.";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn run(format: DumpFormat, api: &ApiSettings) -> Result<String> {
        let mut session = Session::from_text(SAMPLE);
        dump(&mut session, format, api, "english", now())
    }

    #[test]
    fn test_outline_dump() {
        let out = run(DumpFormat::Outline, &ApiSettings::default()).unwrap();
        assert_eq!(
            out,
            "Intro (1)\n  Paragraph 1: Preface\n\
             1. Intro (1)\n  Paragraph 2: Body text.\n\
             2. Next (1)\n  Paragraph 3: More body.\n"
        );
    }

    #[test]
    fn test_text_dump() {
        let out = run(DumpFormat::Text, &ApiSettings::default()).unwrap();
        assert_eq!(out, SAMPLE);
    }

    #[test]
    fn test_elements_dump_is_json() {
        let out = run(DumpFormat::Elements, &ApiSettings::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(5));
        assert_eq!(json[1]["kind"], "title");
        assert_eq!(json[1]["titleNumber"], 1);
    }

    #[test]
    fn test_request_dump_applies_everything() {
        let api = ApiSettings {
            url: "http://localhost/tts".to_string(),
            ..ApiSettings::default()
        };
        let out = run(DumpFormat::Request, &api).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["request"]["body"]["totalElements"], 5);
        assert_eq!(json["request"]["body"]["totalTitles"], 2);
        assert_eq!(json["request"]["body"]["timestamp"], "2024-05-01T12:00:00.000Z");
        assert_eq!(json["audioFilename"], "english_contenido.mp3");
    }

    #[test]
    fn test_request_dump_without_url_fails() {
        let err = run(DumpFormat::Request, &ApiSettings::default()).unwrap_err();
        assert!(format!("{err:#}").contains("no API URL configured"));
    }
}
