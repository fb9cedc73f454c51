//! @acp:module "Collection Command"
//! @acp:summary "Drive the file-backed wishlist and cart stores"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::collection::{CollectionKind, PersistentCollectionStore};
use crate::config::Config;
use crate::storage::FileStorage;

/// Collection operations
#[derive(Debug, Clone)]
pub enum CollectionOp {
    List,
    Add { id: String },
    Remove { id: String },
    Toggle { id: String },
    Contains { id: String },
    Count,
    Clear,
}

/// Options for the collection command
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    pub kind: CollectionKind,
    pub op: CollectionOp,
    /// Output as JSON
    pub json: bool,
}

/// Execute the collection command
pub fn execute_collection(options: CollectionOptions, config: &Config) -> Result<()> {
    let local = FileStorage::open(config.local_path());
    let mut store = PersistentCollectionStore::for_kind(options.kind, &local);
    store.hydrate();

    let kind = options.kind;
    match options.op {
        CollectionOp::List => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(store.items())?);
            } else if store.count() == 0 {
                println!("{} {} is empty", style("→").cyan(), kind);
            } else {
                println!("{} {} ({}):", style("→").cyan(), kind, store.count());
                for id in store.items() {
                    println!("  {}", id);
                }
            }
        }

        CollectionOp::Add { id } => {
            store.add(id.clone());
            println!("{} Added {} to {}", style("✓").green(), id, kind);
        }

        CollectionOp::Remove { id } => {
            store.remove(&id);
            println!("{} Removed {} from {}", style("✓").green(), id, kind);
        }

        CollectionOp::Toggle { id } => {
            if store.toggle(id.clone()) {
                println!("{} Added {} to {}", style("✓").green(), id, kind);
            } else {
                println!("{} Removed {} from {}", style("✓").green(), id, kind);
            }
        }

        CollectionOp::Contains { id } => {
            println!("{}", store.contains(&id));
        }

        CollectionOp::Count => {
            println!("{}", store.count());
        }

        CollectionOp::Clear => {
            store.clear();
            println!("{} Cleared {}", style("✓").green(), kind);
        }
    }

    Ok(())
}
