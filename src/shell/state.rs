//! Popup lifecycle state machine
//!
//! Two states: `Open(tab_index)` and `Closed`. Navigation keys cycle the tab
//! index with wrap-around and reset the auto-close timer; every other key,
//! focus loss, and timer expiry all close. No transition leaves `Closed`.

/// Classified keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKey {
    /// Advance to the next tab (Right, Tab, Space)
    Next,
    /// Go back to the previous tab (Left, Backspace, Delete)
    Prev,
    /// Any other key: close the popup
    Dismiss,
}

/// Shell lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    /// Window is up, showing the tab at the given index
    Open(usize),
    /// Terminal state; the process exits once reached
    Closed,
}

/// What a keypress did, for the caller to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Navigation: show the tab at this index and reset the timer
    Switched(usize),
    /// The key closed the popup
    Dismissed,
    /// The popup was already closed; nothing to do
    Ignored,
}

/// The popup's mutable state: current tab and liveness
#[derive(Debug)]
pub struct ShellState {
    state: PopupState,
    tab_count: usize,
}

impl ShellState {
    /// Creates the state machine in `Open(0)`
    pub fn new(tab_count: usize) -> Self {
        debug_assert!(tab_count > 0, "shell needs at least one tab");
        Self {
            state: PopupState::Open(0),
            tab_count,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PopupState {
        self.state
    }

    /// Index of the visible tab while open
    pub fn current_tab(&self) -> Option<usize> {
        match self.state {
            PopupState::Open(index) => Some(index),
            PopupState::Closed => None,
        }
    }

    /// Whether the terminal state has been reached
    pub fn is_closed(&self) -> bool {
        self.state == PopupState::Closed
    }

    /// Applies a classified keypress
    pub fn on_key(&mut self, key: PopupKey) -> KeyOutcome {
        let PopupState::Open(index) = self.state else {
            return KeyOutcome::Ignored;
        };
        match key {
            PopupKey::Next => {
                let next = (index + 1) % self.tab_count;
                self.state = PopupState::Open(next);
                KeyOutcome::Switched(next)
            }
            PopupKey::Prev => {
                let prev = (index + self.tab_count - 1) % self.tab_count;
                self.state = PopupState::Open(prev);
                KeyOutcome::Switched(prev)
            }
            PopupKey::Dismiss => {
                self.state = PopupState::Closed;
                KeyOutcome::Dismissed
            }
        }
    }

    /// Selects a tab directly (mouse click on the strip); out-of-range
    /// indices are ignored
    pub fn on_select(&mut self, index: usize) -> Option<usize> {
        if self.is_closed() || index >= self.tab_count {
            return None;
        }
        self.state = PopupState::Open(index);
        Some(index)
    }

    /// Window focus was lost: close
    pub fn on_focus_lost(&mut self) {
        self.state = PopupState::Closed;
    }

    /// The host windowing system dismissed the popup (close request, click
    /// outside): close
    pub fn on_host_close(&mut self) {
        self.state = PopupState::Closed;
    }

    /// The auto-close timer fired: close
    pub fn on_timeout(&mut self) {
        self.state = PopupState::Closed;
    }
}
