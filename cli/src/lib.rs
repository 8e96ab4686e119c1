//! Terminal view over `items-core`.
//!
//! Plays the part of the page: it always performs the initial fetch, then
//! optionally submits a new item, and renders whatever state results.

use clap::{Parser, Subcommand};
use items_core::{ItemsController, ItemsState, Transport};

#[derive(Parser, Debug)]
#[command(name = "items")]
#[command(version)]
#[command(about = "List and create items on an items backend")]
pub struct Cli {
    /// Backend base URL (falls back to ITEMS_API_BASE_URL, then http://localhost:8000)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show all items
    List,
    /// Create an item, then show all items
    Add {
        /// Name of the new item
        name: String,
    },
}

/// Drive the controller the way the page does and return the final state.
pub async fn run<T: Transport>(controller: &ItemsController<T>, command: &Command) -> ItemsState {
    controller.fetch_items().await;
    if let Command::Add { name } = command {
        if controller.create_new_item(name).await {
            tracing::debug!(name = %name.trim(), "item added");
        }
    }
    controller.state()
}

pub fn render(state: &ItemsState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        out.push_str(&format!("error: {error}\n"));
    }
    if state.loading && state.items.is_empty() {
        out.push_str("Loading items...\n");
    } else if state.items.is_empty() {
        out.push_str("No items yet. Create your first one!\n");
    } else {
        for item in &state.items {
            out.push_str(&format!("#{} {}\n", item.id, item.name));
        }
        let count = state.items.len();
        let plural = if count == 1 { "" } else { "s" };
        out.push_str(&format!("{count} item{plural}\n"));
    }
    out
}
