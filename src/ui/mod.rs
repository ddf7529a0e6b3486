//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: The outline pane, the blocks pane and the block editor
//! - [`style`]: Colors for blocks and bars

pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::centered_popup_rect;
pub use render::{line_number_width, render, scroll_to_show, split_main_columns, wrap_text};

pub const BLOCKS_LEFT_PADDING: u16 = 1;
pub const OUTLINE_WIDTH_PERCENT: u16 = 30;
pub const BLOCKS_WIDTH_PERCENT: u16 = 70;
