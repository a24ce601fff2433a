//! TUI module for the interactive add-a-book screen

pub mod add_book;
pub mod components;
pub mod theme;

pub use add_book::{AddBookScreen, AddBookScreenProps, AppWidget, ScreenLayout, compute_layout};
pub use theme::Theme;
