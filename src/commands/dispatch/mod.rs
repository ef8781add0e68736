//! Command dispatch logic for vetai

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::Cli;
use tracing::debug;
use vetai_core::error::Result;

mod command;
mod commands;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());

    debug!(elapsed = ?start.elapsed(), root = %root.display(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    let result = match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    };

    debug!(elapsed = ?start.elapsed(), ok = result.is_ok(), "execute_command");
    result
}
