mod common;

use std::time::Duration;

use common::fakes::{FakeCatalog, FakeLibrary, candidate, widget};
use shelfnote::ShelfError;
use shelfnote::widget::{DropdownState, Point, Rect, WidgetAction};
use tokio::time::sleep;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn three_cleans() -> Vec<shelfnote::catalog::Candidate> {
    vec![
        candidate("v1", "Clean Code"),
        candidate("v2", "Clean Architecture"),
        candidate("v3", "The Clean Coder"),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_lookup_after_quiet_period_opens_without_highlight() {
    let catalog = FakeCatalog::new().with_results("Clean", 100, three_cleans());
    let (catalog, _, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    assert!(widget.is_loading());
    sleep(ms(999)).await;
    assert_eq!(catalog.call_count(), 0);

    sleep(ms(200)).await;
    assert_eq!(catalog.calls(), vec!["Clean".to_string()]);
    assert_eq!(widget.suggestions().len(), 3);
    assert!(!widget.is_loading());
    assert_eq!(
        widget.dropdown_state(),
        DropdownState::Open { highlight: None }
    );
    assert_eq!(widget.selected_index(), None);
}

#[tokio::test(start_paused = true)]
async fn test_highlight_clamps_at_last_candidate() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (_, _, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    assert_eq!(widget.suggestions().len(), 3);
    assert_eq!(widget.selected_index(), None);

    widget.apply(WidgetAction::MoveDown);
    assert_eq!(widget.selected_index(), Some(0));

    widget.apply(WidgetAction::MoveDown);
    assert_eq!(widget.selected_index(), Some(1));
    widget.apply(WidgetAction::MoveDown);
    assert_eq!(widget.selected_index(), Some(2));

    widget.apply(WidgetAction::MoveDown);
    assert_eq!(widget.selected_index(), Some(2));

    widget.apply(WidgetAction::MoveUp);
    widget.apply(WidgetAction::MoveUp);
    widget.apply(WidgetAction::MoveUp);
    assert_eq!(widget.selected_index(), None);
    assert!(widget.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_issues_single_lookup() {
    let catalog = FakeCatalog::new().with_results("Dune", 0, vec![candidate("d", "Dune")]);
    let (catalog, _, widget) = widget(catalog, FakeLibrary::new()).await;

    for prefix in ["D", "Du", "Dun", "Dune"] {
        widget.set_query(prefix);
        sleep(ms(300)).await;
    }
    sleep(ms(1000)).await;

    assert_eq!(catalog.calls(), vec!["Dune".to_string()]);
    assert_eq!(widget.suggestions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_short_query_never_looks_up() {
    let (catalog, _, widget) = widget(FakeCatalog::new(), FakeLibrary::new()).await;

    widget.set_query(" a ");
    assert!(!widget.is_loading());
    sleep(ms(2000)).await;

    assert_eq!(catalog.call_count(), 0);
    assert!(widget.suggestions().is_empty());
    assert!(!widget.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_confirm_without_highlight_creates_nothing() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (_, library, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;

    assert!(widget.confirm_and_register().await.is_none());
    assert_eq!(library.create_calls(), 0);
    assert!(widget.is_open(), "dropdown stays open");
    assert!(widget.pending_candidate().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_confirm_registers_with_defaults() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (_, library, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    widget.move_down();
    widget.move_down();

    let item = widget
        .confirm_and_register()
        .await
        .expect("a candidate was highlighted")
        .expect("registration succeeds");

    assert_eq!(item.external_id.as_deref(), Some("v2"));
    assert_eq!(library.create_calls(), 1);
    assert!(!widget.is_open());
    assert!(widget.is_already_registered("v2"));

    let snapshot = widget.snapshot();
    assert!(snapshot.pending.is_none());
    assert_eq!(snapshot.registered, vec![false, true, false]);
    assert_eq!(
        snapshot.last_registered.map(|i| i.title),
        Some("Clean Architecture".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_already_registered_tracks_collection_changes() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (_, library, widget) = widget(catalog, FakeLibrary::new().owning("v1")).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    assert_eq!(widget.snapshot().registered, vec![true, false, false]);
    assert!(widget.sync_shelf().await.unwrap());
    assert!(!widget.sync_shelf().await.unwrap(), "nothing changed since");

    // Another client shelves v3; picked up once the next lookup settles
    library.add_owned("v3");
    assert!(!widget.is_already_registered("v3"));
    assert!(!widget.sync_shelf().await.unwrap());

    widget.set_query("Clean ");
    sleep(ms(1100)).await;
    assert!(widget.sync_shelf().await.unwrap());
    assert!(widget.is_already_registered("v3"));
    assert_eq!(widget.snapshot().registered, vec![true, false, true]);
}

#[tokio::test(start_paused = true)]
async fn test_registration_triggers_shelf_refetch() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (_, library, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    widget.sync_shelf().await.unwrap();

    widget.move_down();
    widget.move_down();
    widget.confirm_and_register().await.unwrap().unwrap();

    // Shelved elsewhere while our create was in flight
    library.add_owned("v9");
    assert!(!widget.is_already_registered("v9"));

    assert!(widget.sync_shelf().await.unwrap());
    assert!(widget.is_already_registered("v9"));
    assert!(widget.is_already_registered("v2"));
    assert_eq!(widget.store().cached().map(|items| items.len()), Some(2));
    assert!(!widget.sync_shelf().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_registering_known_book_is_refused() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (_, library, widget) = widget(catalog, FakeLibrary::new().owning("v1")).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    widget.move_down();

    let result = widget.confirm_and_register().await.unwrap();
    assert!(matches!(result, Err(ShelfError::AlreadyRegistered(_))));
    assert_eq!(library.create_calls(), 0);
    assert_eq!(
        widget.registration_error().as_deref(),
        Some("'Clean Code' is already on your shelf")
    );
    assert!(widget.retry_registration().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_unmount_during_quiet_period_cancels_lookup() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (catalog, _, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    sleep(ms(200)).await;
    widget.unmount();
    sleep(ms(2000)).await;

    assert_eq!(catalog.call_count(), 0);
    assert!(widget.suggestions().is_empty());
    assert!(!widget.is_loading());

    // Input after teardown is ignored
    widget.set_query("Clean Code");
    sleep(ms(2000)).await;
    assert_eq!(catalog.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_slow_stale_response_never_overwrites_newer_one() {
    let catalog = FakeCatalog::new()
        .with_results("ab", 2000, vec![candidate("old", "Stale")])
        .with_results("abc", 50, vec![candidate("new1", "Fresh"), candidate("new2", "Fresh 2")]);
    let (catalog, _, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("ab");
    sleep(ms(1010)).await;
    // "ab" is now in flight; typing supersedes it
    widget.set_query("abc");
    sleep(ms(1100)).await;
    assert_eq!(widget.suggestions()[0].id, "new1");

    // Let the slow "ab" response land
    sleep(ms(1500)).await;
    assert_eq!(catalog.call_count(), 2);
    let ids: Vec<_> = widget.suggestions().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec!["new1", "new2"]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_reports_and_clears() {
    let catalog = FakeCatalog::new()
        .with_results("Clean", 0, three_cleans())
        .with_failure("Cleanx", "quota exceeded");
    let (_, _, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    assert_eq!(widget.suggestions().len(), 3);

    widget.set_query("Cleanx");
    sleep(ms(1100)).await;
    assert!(widget.suggestions().is_empty());
    assert!(!widget.is_loading());
    assert!(widget.lookup_error().unwrap().contains("quota exceeded"));

    // The next successful lookup clears the notice
    widget.set_query("Clean");
    sleep(ms(1100)).await;
    assert!(widget.lookup_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_registration_failure_keeps_candidate_for_retry() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let library = FakeLibrary::new().failing(1, "Book already exists");
    let (_, library, widget) = widget(catalog, library).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    widget.move_down();

    let err = widget.confirm_and_register().await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "Book already exists");
    assert!(!widget.is_registering());
    assert_eq!(
        widget.registration_error().as_deref(),
        Some("Book already exists")
    );
    assert_eq!(widget.pending_candidate().map(|c| c.id), Some("v1".to_string()));
    assert!(!widget.is_already_registered("v1"));

    let item = widget.retry_registration().await.unwrap().unwrap();
    assert_eq!(item.external_id.as_deref(), Some("v1"));
    assert_eq!(library.create_calls(), 2);
    assert!(widget.pending_candidate().is_none());
    assert!(widget.registration_error().is_none());
    assert_eq!(library.items().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_outside_click_listener_only_while_open() {
    let catalog = FakeCatalog::new().with_results("Clean", 0, three_cleans());
    let (_, _, widget) = widget(catalog, FakeLibrary::new()).await;
    widget.set_layout(Rect::new(0, 0, 40, 3), Rect::new(0, 3, 40, 8), 8);

    assert!(!widget.is_listening_for_outside_clicks());
    assert!(!widget.on_pointer_down(Point::new(60, 20)));

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    assert!(widget.is_listening_for_outside_clicks());

    // Clicks on the input or inside the dropdown keep it open
    assert!(!widget.on_pointer_down(Point::new(5, 1)));
    assert!(!widget.on_pointer_down(Point::new(5, 6)));
    assert!(widget.is_open());

    assert!(widget.on_pointer_down(Point::new(60, 20)));
    assert!(!widget.is_open());
    assert!(!widget.is_listening_for_outside_clicks());

    widget.reopen();
    assert!(widget.is_listening_for_outside_clicks());
    widget.unmount();
    assert!(!widget.is_listening_for_outside_clicks());
}

#[tokio::test(start_paused = true)]
async fn test_scroll_follows_highlight_to_nearest_edge() {
    let many: Vec<_> = (0..10)
        .map(|i| candidate(&format!("v{i}"), &format!("Book {i}")))
        .collect();
    let catalog = FakeCatalog::new().with_results("Books", 0, many);
    let (_, _, widget) = widget(catalog, FakeLibrary::new()).await;
    widget.set_layout(Rect::new(0, 0, 40, 3), Rect::new(0, 3, 40, 3), 3);

    widget.set_query("Books");
    sleep(ms(1100)).await;

    for _ in 0..3 {
        widget.move_down();
    }
    assert_eq!(widget.scroll_offset(), 0);

    widget.move_down();
    widget.move_down();
    assert_eq!(widget.selected_index(), Some(4));
    assert_eq!(widget.scroll_offset(), 2);

    for _ in 0..4 {
        widget.move_up();
    }
    assert_eq!(widget.selected_index(), Some(0));
    assert_eq!(widget.scroll_offset(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_escape_dismisses_and_typing_reopens_with_new_results() {
    let catalog = FakeCatalog::new()
        .with_results("Clean", 0, three_cleans())
        .with_results("Clean Code", 0, vec![candidate("v1", "Clean Code")]);
    let (_, _, widget) = widget(catalog, FakeLibrary::new()).await;

    widget.set_query("Clean");
    sleep(ms(1100)).await;
    widget.move_down();
    widget.apply(WidgetAction::Dismiss);
    assert_eq!(widget.dropdown_state(), DropdownState::Closed);
    assert_eq!(widget.suggestions().len(), 3, "dismiss keeps the results");

    widget.set_query("Clean Code");
    sleep(ms(1100)).await;
    assert_eq!(
        widget.dropdown_state(),
        DropdownState::Open { highlight: None }
    );
}
