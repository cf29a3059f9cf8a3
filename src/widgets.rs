//! Presentation widgets.
//!
//! These hold display state only. Drawing happens in `tui::ui`; the
//! controller drives them through the methods here.

mod loading;
mod modal;
mod note_card;
mod toast;

pub use loading::LoadingOverlay;
pub use modal::{ClickTarget, ConfirmModal, Dismissal, ModalEvent};
pub use note_card::{
    ARCHIVED_BADGE, Affordance, CardAction, CardField, CardIntent, NoteCard, NoteCardModel,
    format_card_date,
};
pub use toast::{DEFAULT_TOAST_DURATION, Severity, Toast};
