use std::sync::Arc;

use owo_colors::OwoColorize;

use crate::commands::print_json;
use crate::config::Config;
use crate::error::Result;
use crate::library::{HttpLibrary, LibraryStore, OwnedItem, ReadingStatus};

/// Format an owned book for single-line display
pub fn format_owned_line(item: &OwnedItem) -> String {
    let id_padded = format!("{:8}", item.id);
    let status_str = format!("[{}]", item.status);

    let colored_status = match item.status {
        ReadingStatus::Unread => status_str.yellow().to_string(),
        ReadingStatus::Reading => status_str.cyan().to_string(),
        ReadingStatus::Finished => status_str.green().to_string(),
    };

    let authors = if item.authors.is_empty() {
        String::new()
    } else {
        format!(" - {}", item.authors.join(", ").dimmed())
    };

    format!(
        "{} {} {}{}",
        id_padded.cyan(),
        colored_status,
        item.title,
        authors
    )
}

/// List books on the shelf, optionally filtered by reading status
pub async fn cmd_ls(status: Option<&str>, json: bool) -> Result<()> {
    let status: Option<ReadingStatus> = status.map(str::parse).transpose()?;

    let config = Config::load()?;
    let store = LibraryStore::new(Arc::new(HttpLibrary::from_config(&config)?));
    let items: Vec<OwnedItem> = store
        .items()
        .await?
        .into_iter()
        .filter(|item| status.is_none_or(|s| item.status == s))
        .collect();

    if json {
        return print_json(&serde_json::to_value(&items)?);
    }

    if items.is_empty() {
        println!("Your shelf is empty.");
        return Ok(());
    }

    for item in &items {
        println!("{}", format_owned_line(item));
    }
    Ok(())
}
