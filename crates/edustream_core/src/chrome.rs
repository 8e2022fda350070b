//! crates/edustream_core/src/chrome.rs
//!
//! Header and sidebar visibility, driven by viewport events.

use serde::Serialize;

/// Below this offset the header always shows.
pub const HEADER_REVEAL_OFFSET: f64 = 100.0;
/// Viewports at least this wide keep the sidebar docked open.
pub const WIDE_VIEWPORT: u32 = 1280;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChromeState {
    pub header_visible: bool,
    pub sidebar_open: bool,
    #[serde(skip)]
    last_scroll_y: f64,
}

impl Default for ChromeState {
    fn default() -> Self {
        Self { header_visible: true, sidebar_open: false, last_scroll_y: 0.0 }
    }
}

impl ChromeState {
    /// Scrolling down past the reveal offset hides the header; anything else shows it.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.header_visible = !(scroll_y > self.last_scroll_y && scroll_y > HEADER_REVEAL_OFFSET);
        self.last_scroll_y = scroll_y;
    }

    pub fn on_resize(&mut self, viewport_width: u32) {
        self.sidebar_open = viewport_width >= WIDE_VIEWPORT;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }
}
