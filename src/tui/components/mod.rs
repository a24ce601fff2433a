//! Reusable TUI components

pub mod footer;
pub mod notice;
pub mod search_box;
pub mod suggestion_list;

pub use footer::{Footer, Shortcut, dropdown_shortcuts, typing_shortcuts};
pub use notice::{Notice, NoticeLevel, NoticeLine};
pub use search_box::SearchBox;
pub use suggestion_list::{SuggestionList, SuggestionRow, visible_window};
