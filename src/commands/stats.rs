//! `vetai stats` command - read-only compaction estimate

use crate::commands::dispatch::CommandContext;
use crate::commands::print_json;
use crate::output_by_format_result;
use vetai_core::error::Result;

/// Execute the stats command
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.config()?;
    let stats = ctx.compactor(&config)?.stats()?;

    output_by_format_result!(ctx.cli.format,
        json => print_json(&stats),
        human => {
            println!("Files:          {} ({:.2} MB)", stats.total_files, stats.total_size_mb);
            println!("Consultations:  {}", stats.consultation_count);
            println!("Duplicates:     {}", stats.potential_duplicates);
            println!(
                "Recoverable:    {} bytes ({:.2} MB)",
                stats.potential_space_recovery_bytes, stats.potential_space_recovery_mb
            );
        }
    )
}
