use std::fmt;

/// Which partition of notes is on screen.
///
/// Every note belongs to exactly one partition, decided by its archived flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Notes that are not archived.
    #[default]
    Active,
    /// Archived notes.
    Archived,
}

impl ViewMode {
    /// Returns the partition a note with the given archived flag belongs to.
    pub fn of(archived: bool) -> Self {
        if archived { Self::Archived } else { Self::Active }
    }

    /// Returns the other partition.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Archived,
            Self::Archived => Self::Active,
        }
    }

    /// Short label used in tab headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "All notes",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Archived => write!(f, "archived"),
        }
    }
}
