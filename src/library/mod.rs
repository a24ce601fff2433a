//! The user's book collection.
//!
//! Books on the shelf live in a separate backend service. This module holds
//! the owned-item types, the [`LibraryBackend`] seam, the HTTP client for the
//! backend, and [`LibraryStore`], an explicit cache of the owned listing that
//! is shared between the search widget and anything else showing the shelf.

pub mod http;
pub mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Candidate;
use crate::error::{Result, ShelfError};

pub use http::HttpLibrary;
pub use store::LibraryStore;

pub const VALID_STATUSES: &[&str] = &["unread", "reading", "finished"];

/// Reading progress of an owned book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[default]
    Unread,
    Reading,
    Finished,
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingStatus::Unread => write!(f, "unread"),
            ReadingStatus::Reading => write!(f, "reading"),
            ReadingStatus::Finished => write!(f, "finished"),
        }
    }
}

impl FromStr for ReadingStatus {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "unread" => Ok(ReadingStatus::Unread),
            "reading" => Ok(ReadingStatus::Reading),
            "finished" => Ok(ReadingStatus::Finished),
            _ => Err(ShelfError::InvalidStatus(s.to_string())),
        }
    }
}

/// Who can see an owned book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

/// A book already persisted on the user's shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedItem {
    pub id: String,
    /// Catalog volume ID the book was registered from, if any
    #[serde(default)]
    pub external_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ReadingStatus,
    #[serde(default)]
    pub visibility: Visibility,
}

/// Create payload for a new owned book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub external_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub isbn: Option<String>,
    pub category_id: Option<String>,
    pub tags: Vec<String>,
    pub status: ReadingStatus,
    pub visibility: Visibility,
}

impl NewBook {
    /// Build the payload for a catalog candidate with shelf defaults:
    /// no category, no tags, unread, private.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            external_id: candidate.id.clone(),
            title: candidate.title.clone(),
            subtitle: candidate.subtitle.clone(),
            authors: candidate.authors.clone(),
            thumbnail: candidate.thumbnail.clone(),
            isbn: candidate.isbn.clone(),
            category_id: None,
            tags: Vec::new(),
            status: ReadingStatus::Unread,
            visibility: Visibility::Private,
        }
    }
}

/// Common interface for the collection backend
pub trait LibraryBackend: Send + Sync {
    /// List every book on the user's shelf
    fn list_owned(&self) -> impl std::future::Future<Output = Result<Vec<OwnedItem>>> + Send;

    /// Persist a new book; either the whole record is created or nothing is
    fn create_owned(
        &self,
        book: NewBook,
    ) -> impl std::future::Future<Output = Result<OwnedItem>> + Send;
}
