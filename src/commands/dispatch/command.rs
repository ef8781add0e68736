//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::paths::resolve_against;
use crate::cli::Cli;
use vetai_core::compaction::Compactor;
use vetai_core::config::ServiceConfig;
use vetai_core::error::Result;
use vetai_core::store::RecordStore;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// `vetai.toml` under the root with environment overrides, validated
    pub fn config(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::load_or_default(self.root)?;
        config.apply_process_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Store directory: `--store` wins over the configured location
    pub fn store_path(&self, config: &ServiceConfig) -> PathBuf {
        match &self.cli.store {
            Some(path) => resolve_against(self.root, path),
            None => config.store_path(self.root),
        }
    }

    pub fn open_store(&self, config: &ServiceConfig) -> Result<RecordStore> {
        let store = RecordStore::open(&self.store_path(config))?;
        tracing::debug!(elapsed = ?self.start.elapsed(), "open_store");
        Ok(store)
    }

    /// Compactor over the opened store, rate limited per `[rate_limit]`
    pub fn compactor(&self, config: &ServiceConfig) -> Result<Compactor> {
        Ok(Compactor::new(
            self.open_store(config)?,
            config.rate_limiter(),
        ))
    }

    pub fn root(&self) -> &Path {
        self.root
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("vetai {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Veterinary consultation store with duplicate compaction.");
        println!();
        println!("Run `vetai --help` for usage information.");
        Ok(())
    }
}
