//! CLI command definitions and dispatch.

pub mod item;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use packrat_client::ItemService;
use packrat_core::config::AppConfig;
use packrat_core::error::AppError;

/// Packrat — physical inventory tracking client
#[derive(Debug, Parser)]
#[command(name = "packrat", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (config/<env>.toml)
    #[arg(short, long, default_value = "local")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every item
    List,
    /// Show a single item
    Show {
        /// Item ID
        id: String,
    },
    /// Create an item
    Create(item::CreateArgs),
    /// Delete an item
    Delete {
        /// Item ID
        id: String,
    },
    /// Check an item out
    CheckOut {
        /// Item ID
        id: String,
    },
    /// Check an item back in
    CheckIn {
        /// Item ID
        id: String,
    },
    /// Set the item description
    Describe {
        /// Item ID
        id: String,
        /// New description
        description: String,
    },
    /// Place an item inside another item
    Move {
        /// Item ID
        id: String,
        /// ID of the containing item
        parent: String,
    },
    /// Make an item root-level again
    Unfile {
        /// Item ID
        id: String,
    },
    /// Tag editing
    Tag(item::TagArgs),
    /// Place an item into a random placeable container
    Roll {
        /// Item ID
        id: String,
    },
    /// List the direct contents of an item
    Contents {
        /// Item ID
        id: String,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let service = ItemService::from_config(&config.api)?;
        item::execute(&self.command, &service, self.format).await
    }
}
