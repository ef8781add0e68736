//! Command implementations for all vetai commands

use crate::cli::{Commands, GraphCommands};
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use vetai_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init => commands::init::execute(ctx),
            Commands::Save(args) => commands::save::execute(ctx, args),
            Commands::List(args) => commands::list::execute(ctx, args),
            Commands::Compact(args) => commands::compact::execute(ctx, args),
            Commands::Stats => commands::stats::execute(ctx),
            Commands::Start => commands::start::execute(ctx),
            Commands::Graph { command } => match command {
                GraphCommands::Health => commands::graph::execute_health(ctx),
                GraphCommands::Patient { name } => commands::graph::execute_patient(ctx, name),
                GraphCommands::Search { query, limit } => {
                    commands::graph::execute_search(ctx, query, *limit)
                }
                GraphCommands::Stats => commands::graph::execute_stats(ctx),
            },
        }
    }
}
