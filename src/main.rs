use clap::{Parser, Subcommand};
use std::process::ExitCode;

use shelfnote::commands::{
    cmd_add, cmd_config_get, cmd_config_set, cmd_config_show, cmd_ls, cmd_search,
};
use shelfnote::catalog::MAX_LOOKUP_LIMIT;
use shelfnote::config::VALID_KEYS;
use shelfnote::library::{ReadingStatus, VALID_STATUSES};
use shelfnote::logging::{self, LogTarget};

#[derive(Parser)]
#[command(name = "shelfnote")]
#[command(about = "Find books and keep them on your shelf")]
#[command(version)]
struct Cli {
    /// Log debug output (overridden by SHELFNOTE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up books in the catalog
    #[command(visible_alias = "s")]
    Search {
        /// Title, author or ISBN to search for
        query: String,

        /// Maximum number of results (default: search.limit)
        #[arg(short = 'n', long, value_parser = parse_limit)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search interactively and add a book to your shelf
    Add,

    /// List books on your shelf
    Ls {
        /// Only show books with this reading status
        #[arg(long, value_parser = parse_status)]
        status: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = parse_key)]
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_parser = parse_key)]
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_status(s: &str) -> Result<String, String> {
    s.parse::<ReadingStatus>()
        .map(|status| status.to_string())
        .map_err(|_| format!("must be one of: {}", VALID_STATUSES.join(", ")))
}

fn parse_limit(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(limit) if (1..=MAX_LOOKUP_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(format!("must be a number between 1 and {MAX_LOOKUP_LIMIT}")),
    }
}

fn parse_key(s: &str) -> Result<String, String> {
    if VALID_KEYS.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!("must be one of: {}", VALID_KEYS.join(", ")))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file
    let target = match cli.command {
        Commands::Add => LogTarget::tui_log_file().unwrap_or(LogTarget::Stderr),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(target, cli.verbose) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let result = match cli.command {
        Commands::Search { query, limit, json } => cmd_search(&query, limit, json).await,
        Commands::Add => cmd_add().await,
        Commands::Ls { status, json } => cmd_ls(status.as_deref(), json).await,
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(json),
            ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
            ConfigAction::Get { key, json } => cmd_config_get(&key, json),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
