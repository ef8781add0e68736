//! File-backed consultation store
//!
//! The store is a single flat directory holding one `<id>.json` file per
//! consultation. Default location: `consultation_data/`.

pub mod paths;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, VetaiError};
use crate::record::{validate_id, ConsultationRecord};
use paths::{RECORD_EXT, TMP_SUFFIX};

/// A record file found on disk, parsed or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Result of loading every record in the store
#[derive(Debug, Default)]
pub struct LoadedRecords {
    /// Valid records in file-name order
    pub records: Vec<ConsultationRecord>,
    /// Record id to the file it was loaded from
    pub paths: HashMap<String, PathBuf>,
    /// Files that could not be read or parsed
    pub skipped: usize,
}

impl LoadedRecords {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path_of(&self, id: &str) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }
}

/// The consultation record store
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Canonical path of the store directory
    root: PathBuf,
}

impl RecordStore {
    /// Open an existing store directory
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(VetaiError::StoreNotFound {
                path: path.to_path_buf(),
            });
        }

        let root = path
            .canonicalize()
            .map_err(|e| VetaiError::io_operation("resolve store path", path.display(), e))?;

        Ok(RecordStore { root })
    }

    /// Create the store directory if needed and open it
    pub fn init(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;
        Self::open(path)
    }

    /// Get the store root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory containing the store; default parent for backups
    pub fn parent_dir(&self) -> &Path {
        self.root.parent().unwrap_or(&self.root)
    }

    /// Path a record with this id is persisted under
    pub fn record_path(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.root.join(format!("{}.{}", id, RECORD_EXT)))
    }

    /// Enumerate record files without parsing them.
    ///
    /// Only regular `*.json` files directly inside the store count; hidden
    /// files, in-flight writes and sub-directories are ignored.
    pub fn scan_files(&self) -> Result<Vec<RecordFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                VetaiError::io_operation("scan record store", self.root.display(), e)
            })?;

            if !entry.file_type().is_file() || !is_record_file_name(entry.file_name()) {
                continue;
            }

            match entry.metadata() {
                Ok(meta) => files.push(RecordFile {
                    path: entry.path().to_path_buf(),
                    size: meta.len(),
                }),
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "Failed to stat record file");
                }
            }
        }

        Ok(files)
    }

    /// Load every record in the store.
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> Result<LoadedRecords> {
        let mut loaded = LoadedRecords::default();

        for file in self.scan_files()? {
            match self.load_file(&file.path) {
                Ok(record) => {
                    loaded.paths.insert(record.id.clone(), file.path);
                    loaded.records.push(record);
                }
                Err(e) => {
                    tracing::warn!(path = %file.path.display(), error = %e, "Skipping unreadable consultation");
                    loaded.skipped += 1;
                }
            }
        }

        tracing::debug!(
            records = loaded.records.len(),
            skipped = loaded.skipped,
            "load_all"
        );

        Ok(loaded)
    }

    fn load_file(&self, path: &Path) -> Result<ConsultationRecord> {
        let content = fs::read_to_string(path)?;
        let record = ConsultationRecord::parse(&content, path)?;

        // One file per id: the file stem must be the record's own id
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem != record.id {
            return Err(VetaiError::InvalidRecord {
                path: path.to_path_buf(),
                reason: format!("file name does not match record id {:?}", record.id),
            });
        }

        Ok(record)
    }

    /// List all valid records, newest first
    pub fn list(&self) -> Result<Vec<ConsultationRecord>> {
        let mut records = self.load_all()?.records;
        records.sort_by(|a, b| {
            b.parsed_timestamp()
                .cmp(&a.parsed_timestamp())
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    /// Persist a record, replacing any existing record with the same id.
    ///
    /// The document is written to a hidden temporary file first and renamed
    /// into place, so a concurrent `load_all` never sees a partial file.
    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    pub fn save(&self, record: &ConsultationRecord) -> Result<PathBuf> {
        let path = self.record_path(&record.id)?;
        let tmp_path = self
            .root
            .join(format!(".{}{}", record.file_name(), TMP_SUFFIX));

        let content = serde_json::to_string_pretty(record)?;
        fs::write(&tmp_path, content)
            .map_err(|e| VetaiError::io_operation("write", tmp_path.display(), e))?;

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(VetaiError::io_operation("write", path.display(), e));
        }

        tracing::info!(path = %path.display(), "Saved consultation");
        Ok(path)
    }
}

fn is_record_file_name(name: &std::ffi::OsStr) -> bool {
    let Some(name) = name.to_str() else {
        return false;
    };
    !name.starts_with('.')
        && !name.ends_with(TMP_SUFFIX)
        && Path::new(name).extension().is_some_and(|e| e == RECORD_EXT)
}
