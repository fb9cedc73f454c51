//! @acp:module "Init Command"
//! @acp:summary "Write a default .fg.config.json"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;

use crate::config::Config;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Config file to write
    pub path: PathBuf,
    /// Overwrite an existing config
    pub force: bool,
    /// Access codes to seed the file with
    pub access_codes: Vec<String>,
    /// Storage directory override
    pub storage_dir: Option<PathBuf>,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.path.exists() && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            options.path.display()
        );
    }

    let mut config = Config {
        access_codes: options.access_codes,
        ..Config::default()
    };
    if let Some(dir) = options.storage_dir {
        config.storage_dir = dir;
    }

    config.save(&options.path)?;
    println!(
        "{} Created {}",
        style("✓").green(),
        options.path.display()
    );
    if config.access_codes.is_empty() {
        println!(
            "  {} No access codes configured: the gate is open",
            style("!").yellow()
        );
    } else {
        println!("  Access codes: {}", config.access_codes.len());
    }
    println!("  Storage: {}", config.storage_dir.display());

    Ok(())
}
