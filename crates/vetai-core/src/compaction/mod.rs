//! Duplicate compaction for the consultation store
//!
//! A compaction run loads every record, groups records whose semantic
//! content is identical, keeps the newest record of each group and moves
//! the rest to a backup directory (or deletes them). Destructive runs pass
//! through the rate limiter and backup-path allow-list in [`gate`] first.

mod engine;
pub mod gate;
mod grouping;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::bytes_to_mb;

pub use engine::Compactor;
pub use gate::{BackupRoots, RateLimiter};
pub use grouping::{group_duplicates, recency_cmp, DuplicateGroup};

/// Parameters of one compaction invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactionRequest {
    /// Compute victims and savings without touching the filesystem
    #[serde(default, alias = "dry_run")]
    pub dry_run: bool,
    /// Move victims to a backup directory instead of deleting them
    #[serde(default = "default_backup")]
    pub backup: bool,
    /// Caller-chosen backup directory; must resolve inside an allowed root
    #[serde(default, alias = "backup_dir")]
    pub backup_dir: Option<PathBuf>,
}

fn default_backup() -> bool {
    true
}

impl Default for CompactionRequest {
    fn default() -> Self {
        CompactionRequest {
            dry_run: false,
            backup: true,
            backup_dir: None,
        }
    }
}

/// Summary of one compaction invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompactionResult {
    pub duplicates_removed: usize,
    pub files_deleted: Vec<String>,
    pub files_backed_up: Vec<String>,
    /// Duplicates that could not be moved or deleted; left in the store
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files_failed: Vec<String>,
    pub backup_dir: Option<PathBuf>,
    pub space_saved_bytes: u64,
    pub space_saved_mb: f64,
    pub remaining_consultations: usize,
    pub dry_run: bool,
}

impl CompactionResult {
    fn record_saving(&mut self, bytes: u64) {
        self.duplicates_removed += 1;
        self.space_saved_bytes += bytes;
        self.space_saved_mb = bytes_to_mb(self.space_saved_bytes);
    }
}

/// Read-only view of how much compaction could reclaim
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub total_size_mb: f64,
    pub consultation_count: usize,
    pub potential_duplicates: usize,
    pub potential_space_recovery_bytes: u64,
    pub potential_space_recovery_mb: f64,
}
