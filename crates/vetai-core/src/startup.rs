//! Service startup: port health report and confirmed auto-compaction

use serde::Serialize;

use crate::compaction::{CompactionRequest, CompactionResult, Compactor};
use crate::config::{ServiceConfig, AUTO_COMPACT_CONFIRMATION};
use crate::graph::{KnowledgeGraphPort, LanguageModelPort, PortHealth};

/// Client id auto-compaction is rate limited under
pub const STARTUP_CLIENT: &str = "startup";

/// What happened to auto-compaction at startup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AutoCompactOutcome {
    Disabled,
    /// Enabled without the confirmation value
    Unconfirmed,
    Ran { result: CompactionResult },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupReport {
    pub ports: Vec<PortHealth>,
    pub auto_compact: AutoCompactOutcome,
}

/// Probe each port, then run auto-compaction if it is enabled and confirmed.
///
/// Never fails: an unhealthy port or a rejected compaction is reported, not
/// returned as an error.
#[tracing::instrument(skip_all)]
pub fn run_startup(
    config: &ServiceConfig,
    compactor: &Compactor,
    graph: &dyn KnowledgeGraphPort,
    model: &dyn LanguageModelPort,
) -> StartupReport {
    let ports = vec![graph.health_check(), model.health_check()];
    for health in &ports {
        if health.available {
            tracing::info!(port = %health.name, detail = %health.detail, "Port available");
        } else {
            tracing::warn!(port = %health.name, detail = %health.detail, "Port unavailable");
        }
    }

    let auto = &config.auto_compact;
    let auto_compact = if !auto.enabled {
        AutoCompactOutcome::Disabled
    } else if !auto.is_confirmed() {
        tracing::warn!(
            "Auto-compaction is enabled but not confirmed; set auto_compact.confirm = \"{}\" to run it",
            AUTO_COMPACT_CONFIRMATION
        );
        AutoCompactOutcome::Unconfirmed
    } else {
        let request = CompactionRequest {
            dry_run: auto.dry_run,
            backup: auto.backup,
            backup_dir: None,
        };
        match compactor.compact(STARTUP_CLIENT, &request) {
            Ok(result) => {
                tracing::info!(
                    removed = result.duplicates_removed,
                    dry_run = result.dry_run,
                    "Startup compaction finished"
                );
                AutoCompactOutcome::Ran { result }
            }
            Err(e) => {
                tracing::error!(error = %e, "Startup compaction failed");
                AutoCompactOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    };

    StartupReport {
        ports,
        auto_compact,
    }
}
