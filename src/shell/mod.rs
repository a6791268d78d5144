//! Tabbed popup shell
//!
//! Presents one HTML fragment per tab in a frameless, always-on-top window
//! and closes on loss of engagement: focus loss, a non-navigation key, a
//! click outside the window, or a 60-second timeout. The state machine in
//! `state` is GUI-free; `window` binds it to the tao event loop and wry web
//! views.

pub mod state;
pub mod window;

pub use state::{KeyOutcome, PopupKey, PopupState, ShellState};
pub use window::run;

/// Content for one popup tab
///
/// Produced once by the rendering layer, consumed once by the shell at
/// startup, immutable thereafter.
#[derive(Debug, Clone)]
pub struct TabSpec {
    /// Self-contained HTML fragment the tab displays
    pub html: String,
    /// Label shown in the tab strip
    pub label: String,
    /// Initial content scale; a non-1.0 scale is reset on first link click
    pub scale: f64,
}

impl TabSpec {
    /// Creates a tab from its content, label and scale
    pub fn new(html: impl Into<String>, label: impl Into<String>, scale: f64) -> Self {
        Self {
            html: html.into(),
            label: label.into(),
            scale,
        }
    }

    /// Whether the tab starts at a non-default scale
    pub fn is_scaled(&self) -> bool {
        (self.scale - 1.0).abs() > f64::EPSILON
    }
}
