//! Suggestion dropdown component
//!
//! Renders the visible window of candidates with the highlight and an
//! "on shelf" marker for books the user already owns.

use std::ops::Range;

use iocraft::prelude::*;

use crate::catalog::{Candidate, CandidateList};
use crate::tui::theme::theme;

/// Props for the SuggestionList component
#[derive(Default, Props)]
pub struct SuggestionListProps {
    pub suggestions: CandidateList,
    /// Per-suggestion "already owned" flags
    pub registered: Vec<bool>,
    pub selected_index: Option<usize>,
    /// First visible candidate index
    pub scroll_offset: usize,
    /// Candidate rows inside the border
    pub visible_rows: usize,
}

/// Indices of the candidates shown for a given scroll offset
pub fn visible_window(total: usize, scroll_offset: usize, rows: usize) -> Range<usize> {
    let start = scroll_offset.min(total);
    start..(start + rows).min(total)
}

/// Bordered dropdown of candidates
#[component]
pub fn SuggestionList(props: &SuggestionListProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let total = props.suggestions.len();
    let window = visible_window(total, props.scroll_offset, props.visible_rows);
    let above = window.start;
    let below = total - window.end;

    let rows: Vec<(Candidate, bool, bool)> = window
        .clone()
        .map(|i| {
            (
                props.suggestions[i].clone(),
                props.selected_index == Some(i),
                props.registered.get(i).copied().unwrap_or(false),
            )
        })
        .collect();

    let position = match (above, below) {
        (0, 0) => format!(" {} found ", total),
        _ => format!(" {}-{} of {} ", window.start + 1, window.end, total),
    };

    element! {
        View(
            width: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
        ) {
            #(rows.into_iter().map(|(candidate, is_selected, owned)| {
                element! {
                    SuggestionRow(candidate: candidate, is_selected: is_selected, owned: owned)
                }
            }))
            View(height: 1, padding_left: 1) {
                Text(content: position, color: theme.text_dimmed)
            }
        }
    }
}

/// Props for a single suggestion row
#[derive(Default, Props)]
pub struct SuggestionRowProps {
    pub candidate: Candidate,
    pub is_selected: bool,
    pub owned: bool,
}

/// One candidate: title, authors and the owned marker
#[component]
pub fn SuggestionRow(props: &SuggestionRowProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let candidate = &props.candidate;

    let bg_color = if props.is_selected {
        Some(theme.highlight)
    } else {
        None
    };
    let text_color = if props.is_selected {
        theme.highlight_text
    } else {
        theme.text
    };
    let indicator = if props.is_selected { ">" } else { " " };

    let title = match &candidate.subtitle {
        Some(subtitle) => format!("{}: {}", candidate.title, subtitle),
        None => candidate.title.clone(),
    };

    element! {
        View(
            height: 1,
            width: 100pct,
            flex_direction: FlexDirection::Row,
            padding_left: 1,
            padding_right: 1,
            background_color: bg_color,
        ) {
            View(width: 2, flex_shrink: 0.0) {
                Text(content: indicator, color: text_color)
            }

            View(flex_grow: 1.0, overflow: Overflow::Hidden) {
                Text(content: title, color: text_color)
            }

            View(margin_left: 1, flex_shrink: 0.0, max_width: 30, overflow: Overflow::Hidden) {
                Text(
                    content: candidate.author_line(),
                    color: if props.is_selected { theme.highlight_text } else { theme.author },
                )
            }

            #(if props.owned {
                Some(element! {
                    View(margin_left: 1, flex_shrink: 0.0) {
                        Text(content: "[on shelf]", color: theme.owned_marker)
                    }
                })
            } else {
                None
            })
        }
    }
}
