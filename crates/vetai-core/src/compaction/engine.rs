use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use chrono::Local;

use super::gate::{BackupRoots, RateLimiter};
use super::grouping::group_duplicates;
use super::{CompactionRequest, CompactionResult, StoreStats};
use crate::error::{Result, VetaiError};
use crate::format::bytes_to_mb;
use crate::store::paths::BACKUP_DIR;
use crate::store::{LoadedRecords, RecordStore};
use crate::trace_time;

/// Upper bound on same-second backup directories before giving up
const MAX_BACKUP_DIR_ATTEMPTS: u32 = 100;

/// A record selected for removal
#[derive(Debug, Clone)]
struct Victim {
    id: String,
    path: PathBuf,
    size: u64,
}

impl Victim {
    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Victims of one run, decided before anything is touched
#[derive(Debug, Default)]
struct CompactionPlan {
    groups: usize,
    victims: Vec<Victim>,
    projected_bytes: u64,
}

impl CompactionPlan {
    fn build(loaded: &LoadedRecords) -> Self {
        let groups = group_duplicates(&loaded.records);
        let mut plan = CompactionPlan {
            groups: groups.len(),
            ..Default::default()
        };

        for group in groups.values() {
            tracing::debug!(
                digest = %group.digest,
                survivor = %group.survivor().id,
                victims = group.victims().len(),
                "duplicate_group"
            );

            for record in group.victims() {
                let Some(path) = loaded.path_of(&record.id) else {
                    continue;
                };
                let size = fs::metadata(path).map(|m| m.len()).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to stat duplicate");
                    0
                });
                plan.projected_bytes += size;
                plan.victims.push(Victim {
                    id: record.id.clone(),
                    path: path.to_path_buf(),
                    size,
                });
            }
        }

        plan
    }

    fn preview(&self, loaded: usize) -> CompactionResult {
        CompactionResult {
            duplicates_removed: self.victims.len(),
            space_saved_bytes: self.projected_bytes,
            space_saved_mb: bytes_to_mb(self.projected_bytes),
            remaining_consultations: loaded,
            dry_run: true,
            ..Default::default()
        }
    }
}

/// Compaction service for one record store.
///
/// Holds the rate-limit table and the run lock for the store, so a single
/// instance should be shared (e.g. behind an `Arc`) by every caller.
#[derive(Debug)]
pub struct Compactor {
    store: RecordStore,
    limiter: RateLimiter,
    backup_roots: BackupRoots,
    run_lock: Mutex<()>,
}

impl Compactor {
    /// Create a compactor using the standard backup allow-list
    pub fn new(store: RecordStore, limiter: RateLimiter) -> Self {
        let backup_roots = BackupRoots::standard(store.parent_dir());
        Compactor {
            store,
            limiter,
            backup_roots,
            run_lock: Mutex::new(()),
        }
    }

    /// Replace the backup allow-list
    pub fn with_backup_roots(mut self, backup_roots: BackupRoots) -> Self {
        self.backup_roots = backup_roots;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn backup_roots(&self) -> &BackupRoots {
        &self.backup_roots
    }

    /// Remove duplicate consultations, keeping the newest of each group.
    ///
    /// Input checks (backup path, then rate limit) run before the store is
    /// read. Real runs are serialized per compactor; dry runs are not and
    /// never consume rate-limit budget.
    #[tracing::instrument(skip(self, request), fields(dry_run = request.dry_run, backup = request.backup))]
    pub fn compact(&self, client: &str, request: &CompactionRequest) -> Result<CompactionResult> {
        let start = Instant::now();
        let custom_dir = self.resolve_requested_backup_dir(request)?;

        if request.dry_run {
            let loaded = self.store.load_all()?;
            let plan = CompactionPlan::build(&loaded);
            trace_time!(start, "compact_preview", victims = plan.victims.len());
            return Ok(plan.preview(loaded.len()));
        }

        self.limiter.check(client)?;

        let _guard = self
            .run_lock
            .lock()
            .map_err(|_| VetaiError::lock_poisoned("compaction run"))?;

        let loaded = self.store.load_all()?;
        let plan = CompactionPlan::build(&loaded);

        if plan.victims.is_empty() {
            tracing::info!(records = loaded.len(), "No duplicate consultations found");
            return Ok(CompactionResult {
                remaining_consultations: loaded.len(),
                ..Default::default()
            });
        }

        let backup_dir = if request.backup {
            Some(self.prepare_backup_dir(custom_dir)?)
        } else {
            None
        };

        let result = apply_plan(&plan, loaded.len(), backup_dir);
        trace_time!(start, "compact", removed = result.duplicates_removed);
        Ok(result)
    }

    /// Report what a compaction could reclaim, without touching anything
    #[tracing::instrument(skip(self))]
    pub fn stats(&self) -> Result<StoreStats> {
        let files = self.store.scan_files()?;
        let loaded = self.store.load_all()?;

        let total_files = files.len();
        let total_size_bytes: u64 = files.iter().map(|f| f.size).sum();
        let potential_duplicates: usize = group_duplicates(&loaded.records)
            .values()
            .map(|group| group.len() - 1)
            .sum();

        let average_size = if total_files == 0 {
            0
        } else {
            total_size_bytes / total_files as u64
        };
        let potential_space_recovery_bytes = potential_duplicates as u64 * average_size;

        Ok(StoreStats {
            total_files,
            total_size_bytes,
            total_size_mb: bytes_to_mb(total_size_bytes),
            consultation_count: loaded.len(),
            potential_duplicates,
            potential_space_recovery_bytes,
            potential_space_recovery_mb: bytes_to_mb(potential_space_recovery_bytes),
        })
    }

    fn resolve_requested_backup_dir(&self, request: &CompactionRequest) -> Result<Option<PathBuf>> {
        match (&request.backup_dir, request.backup) {
            (Some(dir), true) => self
                .backup_roots
                .resolve(dir, self.store.parent_dir())
                .map(Some),
            (Some(dir), false) => {
                tracing::warn!(backup_dir = %dir.display(), "Backup disabled; ignoring backup directory");
                Ok(None)
            }
            (None, _) => Ok(None),
        }
    }

    /// Create the directory victims are moved into.
    ///
    /// Without a caller choice this is a fresh
    /// `<store parent>/consultation_backup/<YYYYmmdd_HHMMSS>` directory.
    fn prepare_backup_dir(&self, custom: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = custom {
            fs::create_dir_all(&dir).map_err(|e| {
                VetaiError::io_operation("create backup directory", dir.display(), e)
            })?;
            return Ok(dir);
        }

        let base = self.store.parent_dir().join(BACKUP_DIR);
        fs::create_dir_all(&base)
            .map_err(|e| VetaiError::io_operation("create backup directory", base.display(), e))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        for attempt in 0..MAX_BACKUP_DIR_ATTEMPTS {
            let candidate = if attempt == 0 {
                base.join(&stamp)
            } else {
                base.join(format!("{}_{}", stamp, attempt))
            };
            match fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(VetaiError::io_operation(
                        "create backup directory",
                        candidate.display(),
                        e,
                    ))
                }
            }
        }

        Err(VetaiError::FailedOperation {
            operation: "create backup directory".to_string(),
            reason: format!("too many backup runs stamped {}", stamp),
        })
    }
}

/// Move or delete every victim; failures are logged and left out of the tallies.
fn apply_plan(plan: &CompactionPlan, loaded: usize, backup_dir: Option<PathBuf>) -> CompactionResult {
    let mut result = CompactionResult {
        backup_dir: backup_dir.clone(),
        ..Default::default()
    };

    for victim in &plan.victims {
        let file_name = victim.file_name();
        let outcome = match &backup_dir {
            Some(dir) => move_file(&victim.path, &dir.join(&file_name)),
            None => fs::remove_file(&victim.path),
        };

        match outcome {
            Ok(()) => {
                result.record_saving(victim.size);
                if backup_dir.is_some() {
                    result.files_backed_up.push(file_name);
                } else {
                    result.files_deleted.push(file_name);
                }
            }
            Err(e) => {
                tracing::error!(
                    id = %victim.id,
                    path = %victim.path.display(),
                    error = %e,
                    "Failed to remove duplicate consultation"
                );
                result.files_failed.push(file_name);
            }
        }
    }

    result.remaining_consultations = loaded - result.duplicates_removed;

    tracing::info!(
        groups = plan.groups,
        removed = result.duplicates_removed,
        failed = result.files_failed.len(),
        bytes = result.space_saved_bytes,
        "Compaction finished"
    );

    result
}

/// Move a file, never overwriting an existing destination.
fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    if dest.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display()),
        ));
    }

    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !src.exists() {
                return Err(rename_err);
            }
            // rename cannot cross filesystems; fall back to copy + remove
            if let Err(e) = fs::copy(src, dest) {
                let _ = fs::remove_file(dest);
                return Err(e);
            }
            if let Err(e) = fs::remove_file(src) {
                let _ = fs::remove_file(dest);
                return Err(e);
            }
            Ok(())
        }
    }
}
