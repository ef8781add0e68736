//! On-disk layout constants

/// Extension of persisted consultation files
pub const RECORD_EXT: &str = "json";

/// Default record store directory name (relative to the project root)
pub const DEFAULT_STORE_DIR: &str = "consultation_data";

/// Directory under the store's parent that receives per-run backups
pub const BACKUP_DIR: &str = "consultation_backup";

/// Optional configuration file under the project root
pub const CONFIG_FILE: &str = "vetai.toml";

/// Suffix used for in-flight writes; such files are never loaded
pub const TMP_SUFFIX: &str = ".tmp";
