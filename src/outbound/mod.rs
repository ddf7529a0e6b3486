//! Outbound request construction for applied blocks.
//!
//! This module handles:
//! - Building the JSON body from the applied blocks
//! - Resolving URL, method and headers into a request plan
//! - Naming the audio file an endpoint sends back

mod filename;
mod payload;
mod request;

pub use filename::{audio_filename, language_stem};
pub use payload::{ElementEntry, ParagraphEntry, RequestBody, TitleEntry, strip_title_prefix};
pub use request::{ApiSettings, HttpMethod, OutboundError, RequestPlan, parse_headers};
