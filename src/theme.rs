//! Light/dark theme preference.
//!
//! The preference is read once at startup and written on every toggle. A
//! missing or unreadable file means light.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::warn;

use crate::utils::ensure_parent_directory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Notification shown after switching to this theme.
    pub fn activated_message(self) -> &'static str {
        match self {
            Self::Light => "Light theme activated",
            Self::Dark => "Dark theme activated",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => anyhow::bail!("Unknown theme: {other:?}"),
        }
    }
}

/// Where the theme preference lives.
pub trait ThemeStore {
    /// Reads the saved preference, defaulting to light.
    fn load(&self) -> Theme;

    /// Persists the preference.
    fn save(&self, theme: Theme) -> Result<()>;
}

/// Stores the preference as a one-word text file.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Theme {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.parse().unwrap_or_else(|err| {
                warn!(path = %self.path.display(), error = %err, "ignoring theme preference");
                Theme::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Theme::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read theme preference");
                Theme::default()
            }
        }
    }

    fn save(&self, theme: Theme) -> Result<()> {
        ensure_parent_directory(&self.path)?;
        fs::write(&self.path, theme.to_string())
            .with_context(|| format!("Failed to save theme to {}", self.path.display()))
    }
}

/// Toggles the theme and persists it, returning the new theme.
///
/// A failed write is logged; the toggle still takes effect for this session.
pub fn toggle(store: &dyn ThemeStore, current: Theme) -> Theme {
    let next = current.toggled();
    if let Err(err) = store.save(next) {
        warn!(error = %err, "failed to persist theme preference");
    }
    next
}
