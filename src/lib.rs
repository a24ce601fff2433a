pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod tui;
pub mod widget;

pub use catalog::{Candidate, CandidateList, CatalogProvider, GoogleBooksCatalog};
pub use config::Config;
pub use error::{Result, ShelfError};
pub use library::{HttpLibrary, LibraryBackend, LibraryStore, NewBook, OwnedItem};
pub use widget::{BookSearchWidget, SearchSettings, WidgetSnapshot};
