//! CLI for the kvmgr kubectl version manager.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kvmgr_core::config;
use kvmgr_core::store::DiskStore;

use commands::{run_install, run_list, run_remove};

/// Top-level CLI for the kvmgr kubectl version manager.
#[derive(Debug, Parser)]
#[command(name = "kvmgr")]
#[command(about = "kvmgr: install and manage kubectl versions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download and install a kubectl version into the store.
    Install {
        /// Release version to install (e.g. "1.18.0").
        version: String,
    },

    /// Show installed kubectl versions.
    List,

    /// Remove an installed kubectl version.
    Remove {
        /// Release version to remove.
        version: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let store = match &cfg.store_dir {
            Some(dir) => DiskStore::at_root(dir.clone())?,
            None => DiskStore::open_default()?,
        };

        match cli.command {
            CliCommand::Install { version } => run_install(&cfg, store, &version)?,
            CliCommand::List => run_list(&store)?,
            CliCommand::Remove { version } => run_remove(&store, &version)?,
        }

        Ok(())
    }
}
