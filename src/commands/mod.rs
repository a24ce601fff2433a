//! CLI command implementations

mod add;
mod config;
mod ls;
mod search;

pub use add::cmd_add;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use ls::cmd_ls;
pub use search::{cmd_search, render_candidates};

use serde_json::Value;

use crate::error::Result;

/// Print a JSON value, pretty-printed
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output of a command in both machine and human form
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print as JSON when requested (or when there is no text form)
    pub fn print(self, json: bool) -> Result<()> {
        match self.text {
            Some(text) if !json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}
