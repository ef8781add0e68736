//! Safety checks that run before any destructive compaction
//!
//! Two guards live here: a per-client sliding-window rate limiter and the
//! allow-list that every caller-supplied backup directory must resolve into.

use std::collections::{HashMap, VecDeque};
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::{Result, VetaiError};

/// Sliding-window rate limiter keyed by client id
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    history: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        RateLimiter {
            window,
            max_requests,
            history: Mutex::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Admit one request from `client` or reject it with `RateLimited`.
    pub fn check(&self, client: &str) -> Result<()> {
        self.check_at(client, Instant::now())
    }

    /// Admission decision at an explicit instant.
    ///
    /// Prune, compare and record happen under one lock, so concurrent
    /// callers for the same client cannot both take the last slot. A
    /// rejection leaves the history untouched.
    pub fn check_at(&self, client: &str, now: Instant) -> Result<()> {
        let mut history = self
            .history
            .lock()
            .map_err(|_| VetaiError::lock_poisoned("rate limit"))?;

        let stamps = history.entry(client.to_string()).or_default();
        while stamps
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) >= self.window)
        {
            stamps.pop_front();
        }

        if stamps.len() >= self.max_requests {
            let retry_after = stamps
                .front()
                .map(|oldest| self.window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or(self.window);
            tracing::warn!(client, retry_after = ?retry_after, "Destructive request rate limited");
            return Err(VetaiError::RateLimited {
                client: client.to_string(),
                retry_after_secs: retry_after.as_secs_f64().ceil() as u64,
            });
        }

        stamps.push_back(now);
        Ok(())
    }
}

/// Directories a backup location must resolve into
#[derive(Debug, Clone)]
pub struct BackupRoots {
    roots: Vec<PathBuf>,
}

impl BackupRoots {
    /// Build from candidate roots; each is canonicalized, and roots that do
    /// not exist or are the filesystem root are dropped.
    pub fn new(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut roots = Vec::new();
        for candidate in candidates {
            match candidate.canonicalize() {
                Ok(root) if root.parent().is_some() => {
                    if !roots.contains(&root) {
                        roots.push(root);
                    }
                }
                Ok(root) => {
                    tracing::warn!(root = %root.display(), "Ignoring filesystem root as backup root");
                }
                Err(e) => {
                    tracing::debug!(root = %candidate.display(), error = %e, "Backup root unavailable");
                }
            }
        }
        BackupRoots { roots }
    }

    /// Standard allow-list: the store's parent, the temp dir and the home dir
    pub fn standard(store_parent: &Path) -> Self {
        let mut candidates = vec![store_parent.to_path_buf(), std::env::temp_dir()];
        candidates.extend(dirs::home_dir());
        Self::new(candidates)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolve a requested backup directory to a canonical, allowed path.
    ///
    /// Relative paths are taken from `base`. Symlinks are resolved through
    /// the deepest existing ancestor; the missing tail may not contain `..`.
    pub fn resolve(&self, requested: &Path, base: &Path) -> Result<PathBuf> {
        if requested.as_os_str().is_empty() {
            return Err(VetaiError::invalid_backup_path(requested, "path is empty"));
        }

        if requested
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(VetaiError::invalid_backup_path(
                requested,
                "parent directory components are not allowed",
            ));
        }

        let absolute = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            base.join(requested)
        };

        let resolved = canonicalize_existing_prefix(&absolute)
            .map_err(|e| VetaiError::invalid_backup_path(requested, e.to_string()))?;

        if resolved.exists() && !resolved.is_dir() {
            return Err(VetaiError::invalid_backup_path(
                requested,
                "path exists and is not a directory",
            ));
        }

        if !self.roots.iter().any(|root| resolved.starts_with(root)) {
            return Err(VetaiError::invalid_backup_path(
                requested,
                format!(
                    "resolves to {} which is outside the allowed backup roots",
                    resolved.display()
                ),
            ));
        }

        Ok(resolved)
    }
}

/// Canonicalize the longest existing ancestor of `path` and re-attach the rest.
fn canonicalize_existing_prefix(path: &Path) -> std::io::Result<PathBuf> {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() || !ancestor.exists() {
            continue;
        }
        let canonical = ancestor.canonicalize()?;
        let rest = path.strip_prefix(ancestor).unwrap_or_else(|_| Path::new(""));
        return Ok(if rest.as_os_str().is_empty() {
            canonical
        } else {
            canonical.join(rest)
        });
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no existing ancestor",
    ))
}
