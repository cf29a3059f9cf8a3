//! Full-screen busy indicator.

/// Spinner frames, advanced by the render loop.
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Loading overlay state.
///
/// There is no nesting: a second `show` only replaces the message, and a
/// `hide` without a preceding `show` does nothing.
#[derive(Debug, Clone, Default)]
pub struct LoadingOverlay {
    message: Option<String>,
    frame: usize,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn hide(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Advances the spinner and returns the frame to draw.
    pub fn spin(&mut self) -> &'static str {
        self.frame = (self.frame + 1) % SPINNER.len();
        SPINNER[self.frame]
    }
}
