//! `vetai compact` command - remove duplicate consultations
//!
//! Without `--dry-run` this moves (or with `--no-backup` deletes) every
//! duplicate except the newest of its group. Destructive runs are rate
//! limited per `--client`.

use crate::cli::CompactArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::print_json;
use crate::output_by_format_result;
use vetai_core::compaction::{CompactionRequest, CompactionResult};
use vetai_core::error::Result;

/// Execute the compact command
pub fn execute(ctx: &CommandContext, args: &CompactArgs) -> Result<()> {
    let config = ctx.config()?;
    let compactor = ctx.compactor(&config)?;

    let request = CompactionRequest {
        dry_run: args.dry_run,
        backup: !args.no_backup,
        backup_dir: args.backup_dir.clone(),
    };

    let result = compactor.compact(&ctx.cli.client, &request)?;

    output_by_format_result!(ctx.cli.format,
        json => print_json(&result),
        human => {
            print_human(&result, ctx.cli.quiet);
        }
    )
}

fn print_human(result: &CompactionResult, quiet: bool) {
    if result.duplicates_removed == 0 && result.files_failed.is_empty() {
        if !quiet {
            println!(
                "No duplicates found ({} consultations)",
                result.remaining_consultations
            );
        }
        return;
    }

    if result.dry_run {
        println!(
            "Dry run: would remove {} duplicate consultations ({:.2} MB)",
            result.duplicates_removed, result.space_saved_mb
        );
        return;
    }

    println!(
        "Removed {} duplicate consultations ({:.2} MB)",
        result.duplicates_removed, result.space_saved_mb
    );
    if let Some(dir) = &result.backup_dir {
        println!("Backed up to {}", dir.display());
    }
    if !quiet {
        for name in result.files_backed_up.iter().chain(&result.files_deleted) {
            println!("  {}", name);
        }
    }
    if !result.files_failed.is_empty() {
        println!(
            "Failed to remove {} duplicate consultations:",
            result.files_failed.len()
        );
        for name in &result.files_failed {
            println!("  {}", name);
        }
    }
    println!("{} consultations remaining", result.remaining_consultations);
}
