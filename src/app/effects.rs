use std::io::{Write, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use chrono::Utc;
use serde::Serialize;

use crate::app::{App, Message, Model, ToastLevel};
use crate::outbound::{RequestPlan, audio_filename};

const DEFAULT_STEM: &str = "textblocks";
const DEFAULT_TEXT_FILE: &str = "textblocks.txt";
const TEXT_SUFFIX: &str = "blocks.txt";
const REQUEST_SUFFIX: &str = "request.json";

/// What "export request" writes to disk.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestExport<'a> {
    pub request: &'a RequestPlan,
    /// Name to store audio returned by the endpoint under
    pub audio_filename: String,
}

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::ApplySelection => Self::copy_applied(model),
            Message::SaveText => match save_text(model) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "saved text");
                    model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
                }
                Err(err) => {
                    tracing::warn!(%err, "save failed");
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                }
            },
            Message::ExportRequest => Self::export_request(model),
            _ => {}
        }
    }

    fn copy_applied(model: &mut Model) {
        let Some(text) = model.pending_clipboard.take() else {
            return;
        };
        let blocks = model.session.stats().applied;
        match copy_to_clipboard_osc52(&text) {
            Ok(()) => model.show_toast(
                ToastLevel::Info,
                format!("Applied {blocks} block(s), copied {} chars", text.chars().count()),
            ),
            Err(err) => {
                tracing::warn!(%err, "clipboard copy failed");
                model.show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
            }
        }
    }

    fn export_request(model: &mut Model) {
        let plan = match RequestPlan::build(&model.api, model.session.elements(), Utc::now()) {
            Ok(plan) => plan,
            Err(err) => {
                model.show_toast(ToastLevel::Warning, format!("Cannot build request: {err}"));
                return;
            }
        };
        let export = RequestExport {
            request: &plan,
            audio_filename: audio_filename(model.session.elements(), &model.language),
        };
        let path = request_path(model.file_path.as_deref());
        match write_json(&path, &export) {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    method = %plan.method,
                    url = %plan.url,
                    "exported request"
                );
                if let Some(warning) = &plan.warning {
                    model.show_toast(ToastLevel::Warning, warning.clone());
                } else {
                    model.show_toast(
                        ToastLevel::Info,
                        format!("Exported {} {} to {}", plan.method, plan.url, path.display()),
                    );
                }
            }
            Err(err) => {
                tracing::warn!(%err, "request export failed");
                model.show_toast(ToastLevel::Error, format!("Export failed: {err:#}"));
            }
        }
    }
}

/// Write the document as plain text next to the loaded file.
///
/// Never writes the loaded file itself: the saved blank lines would change
/// which lines segment as titles on reload.
pub(super) fn save_text(model: &Model) -> Result<PathBuf> {
    let path = text_path(model.file_path.as_deref());
    let mut text = model.session.to_plain_text();
    text.push('\n');
    std::fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// `notes.txt` saves to `notes.blocks.txt` next to it.
pub(super) fn text_path(file_path: Option<&Path>) -> PathBuf {
    match file_path {
        Some(_) => sibling_path(file_path, TEXT_SUFFIX),
        None => PathBuf::from(DEFAULT_TEXT_FILE),
    }
}

/// `notes.txt` exports to `notes.request.json` next to it.
pub(super) fn request_path(file_path: Option<&Path>) -> PathBuf {
    sibling_path(file_path, REQUEST_SUFFIX)
}

fn sibling_path(file_path: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = file_path
        .and_then(Path::file_stem)
        .map_or_else(|| DEFAULT_STEM.to_string(), |s| s.to_string_lossy().to_string());
    let name = format!("{stem}.{suffix}");
    file_path
        .and_then(Path::parent)
        .map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize request")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
