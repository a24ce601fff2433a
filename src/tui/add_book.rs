//! Add-a-book screen (`shelfnote add`)
//!
//! Hosts a [`BookSearchWidget`] in the terminal. The widget owns all search,
//! navigation and registration state; this component only forwards input,
//! reports layout, and renders snapshots.

use std::sync::Arc;
use std::time::Duration;

use iocraft::prelude::*;

use crate::catalog::GoogleBooksCatalog;
use crate::library::HttpLibrary;
use crate::tui::components::{
    Footer, Notice, NoticeLine, SearchBox, SuggestionList, dropdown_shortcuts, typing_shortcuts,
};
use crate::tui::theme::theme;
use crate::widget::controller::DEFAULT_DROPDOWN_ROWS;
use crate::widget::{BookSearchWidget, Point, Rect, WidgetAction, key_to_action};

/// The widget wired to the real catalog and library
pub type AppWidget = BookSearchWidget<GoogleBooksCatalog, HttpLibrary>;

/// How often the screen re-reads the widget while idle
const REFRESH_INTERVAL: Duration = Duration::from_millis(50);

/// How often the shelf listing is checked for pending re-fetches
const SHELF_SYNC_INTERVAL: Duration = Duration::from_millis(250);

const HEADER_ROWS: u16 = 1;
const SEARCH_BOX_ROWS: u16 = 3;
/// Border top, position line, border bottom
const DROPDOWN_CHROME_ROWS: u16 = 3;
/// Notice line and footer
const BOTTOM_ROWS: u16 = 2;

/// Screen regions the widget needs for pointer and scroll handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub input: Rect,
    pub dropdown: Rect,
    pub visible_rows: usize,
}

/// Compute where the search box and dropdown are drawn for a terminal size
pub fn compute_layout(width: u16, height: u16) -> ScreenLayout {
    let input = Rect::new(0, HEADER_ROWS, width, SEARCH_BOX_ROWS);

    let below_input = HEADER_ROWS + SEARCH_BOX_ROWS;
    let room = height
        .saturating_sub(below_input)
        .saturating_sub(BOTTOM_ROWS)
        .saturating_sub(DROPDOWN_CHROME_ROWS);
    let visible_rows = (room as usize).clamp(1, DEFAULT_DROPDOWN_ROWS);

    let dropdown = Rect::new(
        0,
        below_input,
        width,
        visible_rows as u16 + DROPDOWN_CHROME_ROWS,
    );

    ScreenLayout {
        input,
        dropdown,
        visible_rows,
    }
}

/// Props for the AddBookScreen component
#[derive(Default, Props)]
pub struct AddBookScreenProps {
    pub widget: Option<Arc<AppWidget>>,
}

/// Interactive book search with add-to-shelf
///
/// Layout:
/// ```text
/// +------------------------------------------+
/// | Header                                    |
/// +------------------------------------------+
/// | SearchBox                                 |
/// +------------------------------------------+
/// | SuggestionList (only while open)          |
/// +------------------------------------------+
/// | Notice                                    |
/// | Footer                                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn AddBookScreen<'a>(props: &AddBookScreenProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let query = hooks.use_state(String::new);
    let mut tick = hooks.use_state(|| 0u64);
    let mut should_exit = hooks.use_state(|| false);

    let widget = props.widget.clone();

    // Lookups settle on background tasks; re-render so they show up
    hooks.use_future(async move {
        loop {
            tokio::time::sleep(REFRESH_INTERVAL).await;
            tick.set(tick.get().wrapping_add(1));
        }
    });

    // Keep "on shelf" markers current after lookups and registrations
    hooks.use_future({
        let widget = widget.clone();
        async move {
            let Some(widget) = widget else {
                return;
            };
            loop {
                tokio::time::sleep(SHELF_SYNC_INTERVAL).await;
                if let Err(e) = widget.sync_shelf().await {
                    tracing::warn!("Could not refresh your shelf: {}", e);
                }
            }
        }
    });

    let register_handler: Handler<()> = hooks.use_async_handler({
        let widget = widget.clone();
        move |()| {
            let widget = widget.clone();
            async move {
                if let Some(widget) = widget
                    && let Some(Err(e)) = widget.confirm_and_register().await
                {
                    tracing::debug!("Add from search screen failed: {}", e);
                }
            }
        }
    });

    let retry_handler: Handler<()> = hooks.use_async_handler({
        let widget = widget.clone();
        move |()| {
            let widget = widget.clone();
            async move {
                if let Some(widget) = widget
                    && let Some(Err(e)) = widget.retry_registration().await
                {
                    tracing::debug!("Retry from search screen failed: {}", e);
                }
            }
        }
    });

    hooks.use_terminal_events({
        let widget = widget.clone();
        move |event| {
            let Some(widget) = widget.as_ref() else {
                return;
            };

            match event {
                TerminalEvent::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) if kind != KeyEventKind::Release => {
                    if modifiers.contains(KeyModifiers::CONTROL) {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('c') => should_exit.set(true),
                            KeyCode::Char('r') if !widget.is_registering() => retry_handler(()),
                            _ => {}
                        }
                        return;
                    }

                    match key_to_action(code) {
                        Some(WidgetAction::Confirm) => {
                            if !widget.is_registering() {
                                register_handler(());
                            }
                        }
                        Some(WidgetAction::MoveDown) if !widget.is_open() => widget.reopen(),
                        Some(action) => {
                            widget.apply(action);
                        }
                        None => {}
                    }
                    tick.set(tick.get().wrapping_add(1));
                }
                TerminalEvent::FullscreenMouse(mouse_event) => {
                    if let MouseEventKind::Down(_) = mouse_event.kind
                        && widget.on_pointer_down(Point::new(mouse_event.column, mouse_event.row))
                    {
                        tick.set(tick.get().wrapping_add(1));
                    }
                }
                _ => {}
            }
        }
    });

    let theme = theme();

    let Some(widget) = widget else {
        return element! {
            View(width, height, justify_content: JustifyContent::Center, align_items: AlignItems::Center) {
                Text(content: "Search widget not initialized", color: theme.error)
            }
        };
    };

    if should_exit.get() {
        widget.unmount();
        system.exit();
    }

    // Forward typed text; the widget decides whether to look anything up
    let typed = query.to_string();
    if typed != widget.query() {
        widget.set_query(typed);
    }

    let layout = compute_layout(width, height);
    widget.set_layout(layout.input, layout.dropdown, layout.visible_rows);

    let min_chars = widget.settings().min_chars;
    let snapshot = widget.snapshot();
    let notice = Notice::from_snapshot(&snapshot, min_chars);
    let shortcuts = if snapshot.is_open {
        dropdown_shortcuts()
    } else {
        typing_shortcuts(snapshot.pending.is_some() && snapshot.registration_error.is_some())
    };
    let shelf_count = widget
        .store()
        .cached()
        .map(|items| format!("{} on shelf", items.len()))
        .unwrap_or_default();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
        ) {
            View(
                width: 100pct,
                height: 1,
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding_left: 1,
                padding_right: 1,
            ) {
                Text(content: "shelfnote - add a book", color: theme.text, weight: Weight::Bold)
                Text(content: shelf_count, color: theme.text_dimmed)
            }

            SearchBox(
                value: Some(query),
                has_focus: true,
                loading: snapshot.is_loading,
            )

            #(if snapshot.is_open {
                Some(element! {
                    SuggestionList(
                        suggestions: snapshot.suggestions.clone(),
                        registered: snapshot.registered.clone(),
                        selected_index: snapshot.selected_index,
                        scroll_offset: snapshot.scroll_offset,
                        visible_rows: layout.visible_rows,
                    )
                })
            } else {
                None
            })

            View(flex_grow: 1.0)

            NoticeLine(notice: notice)
            Footer(shortcuts: shortcuts)
        }
    }
}
