//! Dropdown open/closed state and highlight movement.
//!
//! States: `Closed`, `Open { highlight: None }`, `Open { highlight: Some(i) }`.
//! The highlight never wraps: moving down stops at the last candidate and
//! moving up stops at "no highlight".

use iocraft::prelude::KeyCode;

/// Visible state of the suggestion dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropdownState {
    #[default]
    Closed,
    Open {
        highlight: Option<usize>,
    },
}

/// Keyboard-level actions on the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    MoveDown,
    MoveUp,
    Confirm,
    Dismiss,
}

/// Highlight state machine over the current candidate list
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: DropdownState,
    len: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DropdownState::Open { .. })
    }

    /// Highlighted candidate index; `None` means no highlight
    pub fn selected_index(&self) -> Option<usize> {
        match self.state {
            DropdownState::Open { highlight } => highlight,
            DropdownState::Closed => None,
        }
    }

    /// The candidate list was replaced with `len` entries
    pub fn on_results(&mut self, len: usize) {
        self.len = len;
        self.state = if len > 0 {
            DropdownState::Open { highlight: None }
        } else {
            DropdownState::Closed
        };
    }

    pub fn move_down(&mut self) {
        if let DropdownState::Open { highlight } = &mut self.state {
            if self.len == 0 {
                return;
            }
            let next = highlight.map_or(0, |i| i + 1);
            *highlight = Some(next.min(self.len - 1));
        }
    }

    pub fn move_up(&mut self) {
        if let DropdownState::Open { highlight } = &mut self.state {
            *highlight = match *highlight {
                Some(0) | None => None,
                Some(i) => Some(i - 1),
            };
        }
    }

    /// Take the highlighted index and close the dropdown.
    ///
    /// Without a highlight nothing happens and the dropdown stays as it is.
    pub fn confirm(&mut self) -> Option<usize> {
        let index = self.selected_index()?;
        self.state = DropdownState::Closed;
        Some(index)
    }

    /// Close without selecting
    pub fn dismiss(&mut self) {
        self.state = DropdownState::Closed;
    }

    /// Show the current results again, e.g. when the input regains focus
    pub fn reopen(&mut self) {
        if !self.is_open() && self.len > 0 {
            self.state = DropdownState::Open { highlight: None };
        }
    }
}

/// Map a key to a widget action (pure function)
///
/// Returns `None` for keys the text input should receive.
pub fn key_to_action(code: KeyCode) -> Option<WidgetAction> {
    match code {
        KeyCode::Down => Some(WidgetAction::MoveDown),
        KeyCode::Up => Some(WidgetAction::MoveUp),
        KeyCode::Enter => Some(WidgetAction::Confirm),
        KeyCode::Esc => Some(WidgetAction::Dismiss),
        _ => None,
    }
}
