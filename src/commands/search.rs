//! One-shot catalog lookup (`shelfnote search`)

use std::collections::HashSet;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::catalog::{Candidate, CatalogProvider, GoogleBooksCatalog, MAX_LOOKUP_LIMIT};
use crate::commands::print_json;
use crate::config::Config;
use crate::error::{Result, ShelfError};
use crate::library::{HttpLibrary, LibraryBackend};

/// A row in the search results table
#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Authors")]
    authors: String,
    #[tabled(rename = "ISBN")]
    isbn: String,
    #[tabled(rename = "Owned")]
    owned: String,
}

/// Render candidates as a table, marking those already on the shelf
pub fn render_candidates(candidates: &[Candidate], owned: &HashSet<String>) -> String {
    let rows: Vec<CandidateRow> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| CandidateRow {
            position: i + 1,
            title: match &c.subtitle {
                Some(subtitle) => format!("{}: {}", c.title, subtitle),
                None => c.title.clone(),
            },
            authors: c.author_line(),
            isbn: c.isbn.clone().unwrap_or_else(|| "-".to_string()),
            owned: if owned.contains(&c.id) {
                "yes".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// External IDs already on the shelf, or nothing when the backend is not
/// configured or unreachable
async fn owned_ids(config: &Config) -> HashSet<String> {
    let library = match HttpLibrary::from_config(config) {
        Ok(library) => library,
        Err(e) => {
            tracing::debug!("Skipping owned markers: {}", e);
            return HashSet::new();
        }
    };

    match library.list_owned().await {
        Ok(items) => items.into_iter().filter_map(|i| i.external_id).collect(),
        Err(e) => {
            tracing::warn!("Could not load your shelf: {}", e);
            HashSet::new()
        }
    }
}

/// Look up books in the catalog once, without debouncing
pub async fn cmd_search(query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let min_chars = config.search.min_chars.max(1);

    let trimmed = query.trim();
    if trimmed.chars().count() < min_chars {
        return Err(ShelfError::Other(format!(
            "search query must be at least {min_chars} characters"
        )));
    }

    let limit = limit.unwrap_or(config.search.limit);
    if !(1..=MAX_LOOKUP_LIMIT).contains(&limit) {
        return Err(ShelfError::Other(format!(
            "result limit must be between 1 and {MAX_LOOKUP_LIMIT}"
        )));
    }
    let catalog = GoogleBooksCatalog::from_config(&config)?;
    let (candidates, owned) = tokio::join!(catalog.lookup(trimmed, limit), owned_ids(&config));
    let candidates = candidates?;

    if json {
        let results: Vec<serde_json::Value> = candidates
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "title": c.title,
                    "subtitle": c.subtitle,
                    "authors": c.authors,
                    "thumbnail": c.thumbnail,
                    "isbn": c.isbn,
                    "owned": owned.contains(&c.id),
                })
            })
            .collect();
        return print_json(&serde_json::json!(results));
    }

    if candidates.is_empty() {
        println!("No books found for \"{trimmed}\".");
        return Ok(());
    }

    println!("{}", render_candidates(&candidates, &owned));
    println!("\n{} result(s)", candidates.len());
    Ok(())
}
