//! `vetai list` command - show stored consultations, newest first

use crate::cli::ListArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::print_json;
use crate::output_by_format_result;
use vetai_core::error::Result;

/// Execute the list command
pub fn execute(ctx: &CommandContext, args: &ListArgs) -> Result<()> {
    let config = ctx.config()?;
    let store = ctx.open_store(&config)?;

    let mut records = store.list()?;
    if let Some(patient) = &args.patient {
        let wanted = patient.trim().to_lowercase();
        records.retain(|r| r.patient_name.trim().to_lowercase() == wanted);
    }
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    output_by_format_result!(ctx.cli.format,
        json => print_json(&records),
        human => {
            if records.is_empty() {
                if !ctx.cli.quiet {
                    println!("No consultations found");
                }
            } else {
                for record in &records {
                    println!(
                        "{}  {}  {} ({})  {}",
                        record.id,
                        record.timestamp,
                        display_or_dash(&record.patient_name),
                        display_or_dash(&record.species),
                        display_or_dash(&record.vet_name),
                    );
                }
            }
        }
    )
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
