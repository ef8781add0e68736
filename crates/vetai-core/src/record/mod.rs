//! Consultation records
//!
//! A consultation is persisted as one JSON document per `id`. Keys use the
//! camelCase names the front end sends (`vetName`, `extractedData`, ...).

mod fingerprint;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, VetaiError};

pub use fingerprint::{fingerprint, ContentFingerprint, SEMANTIC_FIELDS};

/// A single veterinary consultation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vet_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub species: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub extracted_data: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<BTreeMap<String, String>>,
}

/// Read an explicit `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConsultationRecord {
    /// Create a record with the given identity and no content
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        ConsultationRecord {
            id: id.into(),
            timestamp: timestamp.into(),
            vet_name: String::new(),
            owner_name: String::new(),
            patient_name: String::new(),
            species: String::new(),
            summary: String::new(),
            transcription: None,
            extracted_data: None,
            attachments: Vec::new(),
        }
    }

    /// Parse a record from JSON text
    ///
    /// `path` is only used to label the error.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let record: ConsultationRecord =
            serde_json::from_str(content).map_err(|e| VetaiError::InvalidRecord {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        validate_id(&record.id).map_err(|e| VetaiError::InvalidRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(record)
    }

    /// File name this record is persisted under
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id, crate::store::paths::RECORD_EXT)
    }

    /// Parsed event time, if the timestamp is valid ISO-8601
    ///
    /// Timestamps without an offset are taken as UTC.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    /// Value of a nested `extractedData` string field, e.g. `("clinical", "diagnosis")`
    pub fn extracted_str(&self, section: &str, field: &str) -> Option<&str> {
        self.extracted_data
            .as_ref()?
            .get(section)?
            .get(field)?
            .as_str()
            .filter(|s| !s.trim().is_empty())
    }
}

/// Validate a record id before it is used to build a path.
pub fn validate_id(id: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(VetaiError::InvalidRecordId {
            id: id.to_string(),
            reason: reason.to_string(),
        })
    };

    if id.trim().is_empty() {
        return reject("id is empty");
    }
    if id.contains('/') || id.contains('\\') {
        return reject("id contains a path separator");
    }
    if id.contains('\0') {
        return reject("id contains a null byte");
    }
    if id.contains("..") {
        return reject("id contains '..'");
    }
    if id.starts_with('.') {
        return reject("id starts with '.'");
    }
    Ok(())
}
