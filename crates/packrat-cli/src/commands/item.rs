//! Item command execution.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use packrat_client::ItemService;
use packrat_core::error::AppError;
use packrat_core::types::ItemId;
use packrat_entity::{Item, PLACEABLE};

use crate::output::{self, OutputFormat};

use super::Commands;

/// Arguments for creating an item
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Item ID (a fresh UUID when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Human-readable label
    #[arg(short, long)]
    pub description: Option<String>,

    /// ID of the containing item
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Mark the item as a valid storage-container target
    #[arg(long)]
    pub placeable: bool,

    /// Additional tags as key=value pairs
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

/// Arguments for tag editing
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Tag subcommand
    #[command(subcommand)]
    pub command: TagCommand,
}

/// Tag subcommands
#[derive(Debug, Subcommand)]
pub enum TagCommand {
    /// Set a tag value
    Set {
        /// Item ID
        id: String,
        /// Tag key
        key: String,
        /// Tag value
        value: String,
    },
    /// Remove a tag
    Rm {
        /// Item ID
        id: String,
        /// Tag key
        key: String,
    },
}

/// Item display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    /// Item ID
    id: String,
    /// Description
    description: String,
    /// Checkout status
    status: String,
    /// Containing item
    parent: String,
}

impl ItemRow {
    fn from_item(item: &Item) -> Self {
        let status = match item.tag("_checked_out_at") {
            Some(stamp) => format!("OUT since {stamp}"),
            None => "IN".to_string(),
        };
        Self {
            id: item.id().to_string(),
            description: item.description().unwrap_or("").to_string(),
            status,
            parent: item.parent().map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

/// Execute an item command
pub async fn execute(
    command: &Commands,
    service: &ItemService,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        Commands::List => {
            let inventory = service.fetch_all().await?;
            let mut rows: Vec<ItemRow> = inventory.iter().map(ItemRow::from_item).collect();
            rows.sort_by(|a, b| a.id.to_lowercase().cmp(&b.id.to_lowercase()));
            output::print_list(&rows, format);
        }
        Commands::Show { id } => {
            let item = service.load(&ItemId::parse(id.clone())?).await?;
            output::print_item(&item, format);
        }
        Commands::Create(args) => {
            let id = match &args.id {
                Some(raw) => ItemId::parse(raw.clone())?,
                None => ItemId::parse(Uuid::new_v4().to_string())?,
            };
            let mut item = Item::empty(id);
            if let Some(description) = &args.description {
                item.set_description(description);
            }
            if let Some(parent) = &args.parent {
                item.set_parent(ItemId::parse(parent.clone())?);
            }
            if args.placeable {
                item.set_tag(PLACEABLE, "1")?;
            }
            for pair in &args.tags {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    AppError::validation(format!("tag `{pair}` is not of the form key=value"))
                })?;
                item.set_tag(key, value)?;
            }
            service.save(&item).await?;
            output::print_success(&format!("Created item {}", item.id()));
        }
        Commands::Delete { id } => {
            service.delete(&ItemId::parse(id.clone())?).await?;
            output::print_success(&format!("Deleted item {id}"));
        }
        Commands::CheckOut { id } => {
            let mut item = service.load(&ItemId::parse(id.clone())?).await?;
            service.check_out(&mut item).await?;
            let stamp = item.tag("_checked_out_at").unwrap_or_default();
            output::print_success(&format!("Checked out {id} at {stamp}"));
        }
        Commands::CheckIn { id } => {
            let mut item = service.load(&ItemId::parse(id.clone())?).await?;
            service.check_in(&mut item).await?;
            output::print_success(&format!("Checked in {id}"));
        }
        Commands::Describe { id, description } => {
            let mut item = service.load(&ItemId::parse(id.clone())?).await?;
            service.set_description(&mut item, description).await?;
            output::print_success(&format!("Updated description of {id}"));
        }
        Commands::Move { id, parent } => {
            let mut item = service.load(&ItemId::parse(id.clone())?).await?;
            service
                .set_parent(&mut item, ItemId::parse(parent.clone())?)
                .await?;
            output::print_success(&format!("Moved {id} into {parent}"));
        }
        Commands::Unfile { id } => {
            let mut item = service.load(&ItemId::parse(id.clone())?).await?;
            service.remove_parent(&mut item).await?;
            output::print_success(&format!("{id} is now root-level"));
        }
        Commands::Tag(args) => match &args.command {
            TagCommand::Set { id, key, value } => {
                let mut item = service.load(&ItemId::parse(id.clone())?).await?;
                service.update_tag(&mut item, key, value).await?;
                output::print_success(&format!("Set {key} on {id}"));
            }
            TagCommand::Rm { id, key } => {
                let mut item = service.load(&ItemId::parse(id.clone())?).await?;
                service.delete_tag(&mut item, key).await?;
                output::print_success(&format!("Removed {key} from {id}"));
            }
        },
        Commands::Roll { id } => {
            let mut item = service.load(&ItemId::parse(id.clone())?).await?;
            let target = service.roll_storage(&mut item).await?;
            output::print_success(&format!("Rolled {id} into {target}"));
        }
        Commands::Contents { id } => {
            let item = service.load(&ItemId::parse(id.clone())?).await?;
            let contents = service.contents(&item).await?;
            let rows: Vec<ItemRow> = contents.iter().map(ItemRow::from_item).collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}
