//! Interactive add-a-book command (`shelfnote add`)

use std::sync::Arc;

use iocraft::prelude::*;

use crate::catalog::GoogleBooksCatalog;
use crate::config::Config;
use crate::error::{Result, ShelfError};
use crate::library::{HttpLibrary, LibraryStore};
use crate::tui::AddBookScreen;
use crate::widget::{BookSearchWidget, SearchSettings};

/// Launch the add-a-book TUI
pub async fn cmd_add() -> Result<()> {
    let config = Config::load()?;
    let catalog = Arc::new(GoogleBooksCatalog::from_config(&config)?);
    let library = Arc::new(HttpLibrary::from_config(&config)?);

    // Owned markers are advisory; the screen still works without them
    let store = Arc::new(LibraryStore::new(library));
    if let Err(e) = store.refresh().await {
        tracing::warn!("Could not load your shelf: {}", e);
    }

    let widget = Arc::new(BookSearchWidget::new(
        catalog,
        store,
        SearchSettings::from(&config.search),
    ));

    let result = element!(AddBookScreen(widget: Some(widget.clone())))
        .fullscreen()
        .await
        .map_err(|e| ShelfError::Other(format!("TUI error: {e}")));

    widget.unmount();
    result
}
