//! `vetai init` command - create the record store
//!
//! Idempotent: an existing store and config are left as they are.

use crate::commands::dispatch::CommandContext;
use crate::commands::print_json;
use crate::output_by_format_result;
use vetai_core::config::ServiceConfig;
use vetai_core::error::Result;
use vetai_core::store::paths::CONFIG_FILE;
use vetai_core::store::RecordStore;

/// Execute the init command
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.config()?;
    let store = RecordStore::init(&ctx.store_path(&config))?;

    let config_path = ctx.root().join(CONFIG_FILE);
    let config_created = !config_path.exists();
    if config_created {
        ServiceConfig::default().save(&config_path)?;
        tracing::info!(path = %config_path.display(), "Wrote default config");
    }

    output_by_format_result!(ctx.cli.format,
        json => print_json(&serde_json::json!({
            "status": "ok",
            "store": store.root().display().to_string(),
            "config": config_path.display().to_string(),
            "config_created": config_created,
            "message": "Store initialized"
        })),
        human => {
            if !ctx.cli.quiet {
                println!("Initialized vetai store at {}", store.root().display());
                if config_created {
                    println!("Wrote default config to {}", config_path.display());
                }
            }
        }
    )
}
