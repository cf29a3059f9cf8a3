use thiserror::Error;

/// Minimum number of characters in a note title.
pub const MIN_TITLE_LENGTH: usize = 3;
/// Minimum number of characters in a note body.
pub const MIN_BODY_LENGTH: usize = 5;
/// Maximum number of characters in a note body.
pub const MAX_BODY_LENGTH: usize = 200;
/// Remaining-character count below which the counter turns to a warning.
pub const LOW_REMAINING_THRESHOLD: i64 = 20;

/// Local validation failures for a note draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Title must be at least 3 characters")]
    TitleTooShort,

    #[error("Content must be at least 5 characters")]
    BodyTooShort,

    #[error("Content exceeds maximum length of 200 characters")]
    BodyTooLong,
}

/// Per-field validation result of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraftValidation {
    pub title: Option<DraftError>,
    pub body: Option<DraftError>,
}

impl DraftValidation {
    /// Returns true when neither field has an error.
    pub fn is_valid(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    /// Returns the first error, title before body.
    pub fn first_error(&self) -> Option<DraftError> {
        self.title.or(self.body)
    }
}

/// How close the body is to its length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingLevel {
    Normal,
    Low,
    Over,
}

/// User input for a note that has not been sent yet.
///
/// Lengths are counted in characters after trimming surrounding whitespace,
/// which is also what gets sent to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
}

impl NoteDraft {
    /// Creates a draft from raw field values.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Title as it will be submitted.
    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    /// Body as it will be submitted.
    pub fn trimmed_body(&self) -> &str {
        self.body.trim()
    }

    /// Validates both fields independently.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill::models::{DraftError, NoteDraft};
    ///
    /// let draft = NoteDraft::new("ab", "short");
    /// let validation = draft.validation();
    /// assert_eq!(validation.title, Some(DraftError::TitleTooShort));
    /// assert_eq!(validation.body, None);
    /// ```
    pub fn validation(&self) -> DraftValidation {
        let title_len = self.trimmed_title().chars().count();
        let body_len = self.trimmed_body().chars().count();

        let title = (title_len < MIN_TITLE_LENGTH).then_some(DraftError::TitleTooShort);
        let body = if body_len < MIN_BODY_LENGTH {
            Some(DraftError::BodyTooShort)
        } else if body_len > MAX_BODY_LENGTH {
            Some(DraftError::BodyTooLong)
        } else {
            None
        };

        DraftValidation { title, body }
    }

    /// Returns `Ok(())` if the draft may be submitted, or the first error.
    pub fn validate(&self) -> Result<(), DraftError> {
        match self.validation().first_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Characters left before the body limit. Negative when over.
    pub fn remaining_body_chars(&self) -> i64 {
        let used = i64::try_from(self.body.chars().count()).unwrap_or(i64::MAX);
        MAX_BODY_LENGTH as i64 - used
    }

    /// Classifies the remaining-character counter.
    pub fn remaining_level(&self) -> RemainingLevel {
        let remaining = self.remaining_body_chars();
        if remaining < 0 {
            RemainingLevel::Over
        } else if remaining < LOW_REMAINING_THRESHOLD {
            RemainingLevel::Low
        } else {
            RemainingLevel::Normal
        }
    }

    /// Empties both fields.
    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}
