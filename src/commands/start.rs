//! `vetai start` command - startup health report and auto-compaction

use crate::commands::dispatch::CommandContext;
use crate::commands::print_json;
use crate::output_by_format_result;
use vetai_core::error::Result;
use vetai_core::graph::{OfflineKnowledgeGraph, OfflineLanguageModel};
use vetai_core::startup::{run_startup, AutoCompactOutcome};
use vetai_core::store::RecordStore;

/// Execute the start command
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.config()?;
    // The service creates its store on first start
    RecordStore::init(&ctx.store_path(&config))?;
    let compactor = ctx.compactor(&config)?;

    let graph = OfflineKnowledgeGraph::new(config.graph.clone());
    let model = OfflineLanguageModel::new(config.graph.api_key_present);
    let report = run_startup(&config, &compactor, &graph, &model);

    output_by_format_result!(ctx.cli.format,
        json => print_json(&report),
        human => {
            for port in &report.ports {
                let state = if port.available { "available" } else { "unavailable" };
                println!("{}: {} ({})", port.name, state, port.detail);
            }
            match &report.auto_compact {
                AutoCompactOutcome::Disabled => println!("auto-compaction: disabled"),
                AutoCompactOutcome::Unconfirmed => {
                    println!("auto-compaction: enabled but not confirmed, skipped")
                }
                AutoCompactOutcome::Ran { result } => println!(
                    "auto-compaction: removed {} duplicates{}",
                    result.duplicates_removed,
                    if result.dry_run { " (dry run)" } else { "" }
                ),
                AutoCompactOutcome::Failed { error } => {
                    println!("auto-compaction: failed: {}", error)
                }
            }
        }
    )
}
