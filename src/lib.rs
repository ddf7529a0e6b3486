// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. outbound::OutboundError)
    clippy::module_name_repetitions
)]

//! # Textblocks
//!
//! A terminal editor that splits plain text into numbered titles and
//! paragraphs, lets you collapse, select and edit them, and prepares the
//! applied blocks for a text-to-speech endpoint.
//!
//! A line is a title when it starts with a number and stands alone between
//! blank lines. Everything else is a paragraph.
//!
//! ## Architecture
//!
//! Textblocks uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Segmentation, numbering and the outline
//! - [`session`]: A document with its collapse and selection state
//! - [`editor`]: Rope-backed buffer for editing one block
//! - [`outbound`]: Request payload, endpoint settings and audio file names
//! - [`config`]: Saved command-line defaults
//! - [`dump`]: Non-interactive output
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod document;
pub mod dump;
pub mod editor;
pub mod outbound;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Document, ElementId, ElementKind, TextElement};
    pub use crate::session::Session;
}
