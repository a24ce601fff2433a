//! Keyboard shortcuts bar component
//!
//! Displays available keyboard shortcuts at the bottom of the screen.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// A single keyboard shortcut entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// The key or key combination (e.g., "Enter", "C-q")
    pub key: String,
    /// Description of the action
    pub action: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Props for the Footer component
#[derive(Default, Props)]
pub struct FooterProps {
    /// List of keyboard shortcuts to display
    pub shortcuts: Vec<Shortcut>,
}

/// Keyboard shortcuts bar at the bottom of the screen
#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            min_height: 1,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 2,
            background_color: theme.border,
        ) {
            #(props.shortcuts.iter().map(|shortcut| {
                let key = shortcut.key.clone();
                let action = shortcut.action.clone();
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(
                            content: format!("[{}]", key),
                            color: theme.highlight,
                            weight: Weight::Bold,
                        )
                        Text(
                            content: format!(" {}", action),
                            color: theme.text,
                        )
                    }
                }
            }))
        }
    }
}

/// Shortcuts while the dropdown is showing candidates
pub fn dropdown_shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new("Up/Down", "Highlight"),
        Shortcut::new("Enter", "Add to Shelf"),
        Shortcut::new("Esc", "Close"),
        Shortcut::new("C-q", "Quit"),
    ]
}

/// Shortcuts while typing with the dropdown closed
pub fn typing_shortcuts(can_retry: bool) -> Vec<Shortcut> {
    let mut shortcuts = vec![Shortcut::new("Down", "Show Results")];
    if can_retry {
        shortcuts.push(Shortcut::new("C-r", "Retry Add"));
    }
    shortcuts.push(Shortcut::new("C-q", "Quit"));
    shortcuts
}
