//! CLI module for geoscene.
//!
//! Subcommands:
//! - `migrate`: Connect to the store, prepare indexes and apply pending migrations
//! - `status`: Report the applied migration version

mod migrate;
mod status;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use crate::config::Config;
use crate::store::{self, Store};

/// geoscene - scene editor data layer
#[derive(Parser)]
#[command(name = "geoscene")]
#[command(about = "Scene editor backend - repository container and data migrations")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the repository container, applying pending migrations
    Migrate,

    /// Show the applied and latest migration versions
    Status,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        tracing::debug!(backend = ?config.store.backend, "Loaded configuration");

        match self.command {
            Command::Migrate => self.run_migrate(&config).await,
            Command::Status => self.run_status(&config).await,
        }
    }
}

/// Opens the configured store.
async fn connect(config: &Config) -> Result<Store> {
    store::connect(&config.store)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect: {}", e))
}
