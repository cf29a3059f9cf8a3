//! Confirmation dialog.
//!
//! Two states, closed and open. While open it locks background scrolling.
//! Observers learn about transitions through `take_events`; calls that do not
//! change the state (closing a closed modal) emit nothing.

/// Transition notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    Opened,
    Closed,
}

/// Ways the user can dismiss the dialog without confirming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    CancelButton,
    OverlayClick,
    Escape,
}

/// Where a click landed relative to the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed background around the dialog
    Overlay,
    /// Anywhere inside the dialog box
    Dialog,
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmModal {
    open: bool,
    scroll_locked: bool,
    events: Vec<ModalEvent>,
}

impl ConfirmModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the background should ignore scrolling.
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn open(&mut self) {
        self.scroll_locked = true;
        if !self.open {
            self.open = true;
            self.events.push(ModalEvent::Opened);
        }
    }

    pub fn close(&mut self) {
        self.scroll_locked = false;
        if self.open {
            self.open = false;
            self.events.push(ModalEvent::Closed);
        }
    }

    /// Closes the dialog in response to a user dismissal.
    ///
    /// Returns true if the dialog was open.
    pub fn dismiss(&mut self, _how: Dismissal) -> bool {
        let was_open = self.open;
        self.close();
        was_open
    }

    /// Escape only matters while the dialog is open.
    pub fn handle_escape(&mut self) -> bool {
        self.open && self.dismiss(Dismissal::Escape)
    }

    /// Clicks on the background close the dialog; clicks inside do not.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Overlay => self.open && self.dismiss(Dismissal::OverlayClick),
            ClickTarget::Dialog => false,
        }
    }

    /// Drains pending transition notifications.
    pub fn take_events(&mut self) -> Vec<ModalEvent> {
        std::mem::take(&mut self.events)
    }
}
