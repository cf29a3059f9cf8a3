mod draft;
mod ids;
mod note;
mod view_mode;

pub use draft::{
    DraftError, DraftValidation, LOW_REMAINING_THRESHOLD, MAX_BODY_LENGTH, MIN_BODY_LENGTH,
    MIN_TITLE_LENGTH, NoteDraft, RemainingLevel,
};
pub use ids::NoteId;
pub use note::{Note, NoteBuilder};
pub use view_mode::ViewMode;
