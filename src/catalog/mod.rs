//! Book catalog lookup.
//!
//! This module provides the read-only search side of book discovery: a
//! provider trait for metadata catalogs, the strict parse boundary that turns
//! loosely-typed catalog payloads into immutable [`Candidate`] values, and a
//! Google Books implementation.

pub mod google_books;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use google_books::GoogleBooksCatalog;

/// Number of candidates requested per lookup unless configured otherwise
pub const DEFAULT_LOOKUP_LIMIT: usize = 20;

/// Largest `maxResults` the volumes endpoint accepts
pub const MAX_LOOKUP_LIMIT: usize = 40;

/// A search result from the catalog that is not yet on the shelf
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Catalog-specific volume ID
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Author names in catalog order
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    /// ISBN, 13-digit form when available
    pub isbn: Option<String>,
}

impl Candidate {
    /// Authors joined for single-line display
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }
}

/// Ordered candidates in catalog relevance order.
///
/// Shared behind an `Arc` so snapshots handed to the view never copy the
/// whole batch; the list is replaced wholesale, never edited in place.
pub type CandidateList = Arc<[Candidate]>;

/// Common interface for book metadata catalogs
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog for up to `limit` candidates matching `query`.
    ///
    /// A query with no matches yields an empty list, not an error.
    fn lookup(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<CandidateList>> + Send;
}

// ============================================================================
// Raw payload
// ============================================================================

/// Top-level volume search response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVolumeList {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub items: Option<Vec<RawVolume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVolume {
    pub id: Option<String>,
    pub volume_info: Option<RawVolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub image_links: Option<RawImageLinks>,
    #[serde(default)]
    pub industry_identifiers: Vec<RawIndustryIdentifier>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// Pick the ISBN from a volume's identifier list.
///
/// `ISBN_13` wins over `ISBN_10` regardless of order; other identifier types
/// (`ISSN`, `OTHER`) are ignored.
pub fn extract_isbn(identifiers: &[RawIndustryIdentifier]) -> Option<String> {
    let find = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind == kind && !id.identifier.trim().is_empty())
            .map(|id| id.identifier.trim().to_string())
    };

    find("ISBN_13").or_else(|| find("ISBN_10"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawVolume {
    /// Validate and convert into a candidate.
    ///
    /// Returns `None` for entries without an ID or title.
    pub fn into_candidate(self) -> Option<Candidate> {
        let id = non_blank(self.id)?;
        let info = self.volume_info?;
        let title = non_blank(info.title)?;

        let thumbnail = info
            .image_links
            .and_then(|links| non_blank(links.thumbnail).or(non_blank(links.small_thumbnail)));

        let authors = info
            .authors
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        Some(Candidate {
            id,
            title,
            subtitle: non_blank(info.subtitle),
            authors,
            thumbnail,
            isbn: extract_isbn(&info.industry_identifiers),
        })
    }
}

impl RawVolumeList {
    /// Convert the response into candidates, keeping catalog order and
    /// dropping malformed entries.
    pub fn into_candidates(self) -> CandidateList {
        let raw = self.items.unwrap_or_default();
        let total = raw.len();
        let candidates: Vec<Candidate> = raw
            .into_iter()
            .filter_map(RawVolume::into_candidate)
            .collect();

        if candidates.len() < total {
            tracing::debug!(
                "Dropped {} malformed catalog entries",
                total - candidates.len()
            );
        }

        candidates.into()
    }
}
