//! One-line status notice under the search box
//!
//! Picks the most relevant message for the current widget snapshot: failed
//! registration, failed lookup, a book just added, an empty result, or a
//! typing hint.

use iocraft::prelude::*;

use crate::tui::theme::theme;
use crate::widget::WidgetSnapshot;

/// Severity level for notices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A message to show under the search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Notice for the given snapshot, if any
    pub fn from_snapshot(snapshot: &WidgetSnapshot, min_chars: usize) -> Option<Self> {
        if snapshot.is_registering {
            let title = snapshot
                .pending
                .as_ref()
                .map(|c| c.title.as_str())
                .unwrap_or("book");
            return Some(Self::new(NoticeLevel::Info, format!("Adding '{title}'...")));
        }

        if let Some(error) = &snapshot.registration_error {
            let message = match &snapshot.pending {
                Some(candidate) => format!("Could not add '{}': {error}", candidate.title),
                None => error.clone(),
            };
            return Some(Self::new(NoticeLevel::Error, message));
        }

        if let Some(error) = &snapshot.lookup_error {
            return Some(Self::new(
                NoticeLevel::Warning,
                format!("Lookup failed: {error}"),
            ));
        }

        if let Some(item) = &snapshot.last_registered
            && !snapshot.is_open
        {
            return Some(Self::new(
                NoticeLevel::Success,
                format!("Added '{}' to your shelf", item.title),
            ));
        }

        if snapshot.is_empty_result(min_chars) {
            return Some(Self::new(
                NoticeLevel::Info,
                format!("No books found for '{}'", snapshot.query.trim()),
            ));
        }

        if snapshot.query.trim().chars().count() < min_chars {
            return Some(Self::new(
                NoticeLevel::Info,
                format!("Type at least {min_chars} characters to search"),
            ));
        }

        None
    }
}

/// Props for the NoticeLine component
#[derive(Default, Props)]
pub struct NoticeLineProps {
    pub notice: Option<Notice>,
}

/// Single status line; renders an empty row when there is nothing to say
#[component]
pub fn NoticeLine(props: &NoticeLineProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let (content, color) = match &props.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => theme.text_dimmed,
                NoticeLevel::Success => theme.success,
                NoticeLevel::Warning => theme.warning,
                NoticeLevel::Error => theme.error,
            };
            (notice.message.clone(), color)
        }
        None => (String::new(), theme.text_dimmed),
    };

    element! {
        View(height: 1, padding_left: 1, overflow: Overflow::Hidden) {
            Text(content: content, color: color)
        }
    }
}
