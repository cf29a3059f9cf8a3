//! Transient notification shown in a corner of the screen.
//!
//! A toast has a message, a severity that picks its colour, and a deadline
//! after which it hides itself. Showing a new toast replaces the current one
//! and restarts the timer.

use std::time::{Duration, Instant};

/// How long a toast stays up unless told otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Toast severity determines the visual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Neutral style
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    /// Get the icon character for this severity
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✕",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
struct Shown {
    message: String,
    severity: Severity,
    hide_at: Instant,
}

/// Toast notification state.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    current: Option<Shown>,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a message for the default duration.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_for(message, severity, DEFAULT_TOAST_DURATION);
    }

    /// Shows a message for `duration`, replacing any toast already visible.
    pub fn show_for(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        self.show_at(message, severity, duration, Instant::now());
    }

    /// Same as `show_for`, with an explicit notion of "now".
    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        now: Instant,
    ) {
        self.current = Some(Shown {
            message: message.into(),
            severity,
            hide_at: now + duration,
        });
    }

    /// Hides the toast immediately.
    pub fn hide(&mut self) {
        self.current = None;
    }

    /// Drops the toast once its deadline has passed. Returns true if it was hidden.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(shown) if now >= shown.hide_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a toast would be on screen at `now`.
    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.current.as_ref().is_some_and(|shown| now < shown.hide_at)
    }

    /// The current message, even if its deadline has passed but `tick` has not run.
    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|shown| shown.message.as_str())
    }

    pub fn severity(&self) -> Option<Severity> {
        self.current.as_ref().map(|shown| shown.severity)
    }
}
