use std::collections::BTreeMap;
use std::fmt;

use sha2::{Digest, Sha256};

use super::ConsultationRecord;

/// Fields that define what a consultation says, sorted by name.
///
/// `id` and `timestamp` never participate.
pub const SEMANTIC_FIELDS: [&str; 6] = [
    "ownerName",
    "patientName",
    "species",
    "summary",
    "transcription",
    "vetName",
];

/// Content fingerprint of a consultation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentFingerprint {
    /// Every semantic field is empty; never a duplicate candidate
    Empty,
    /// Lowercase hex SHA-256 of the canonical semantic fields
    Digest(String),
}

impl ContentFingerprint {
    pub fn is_empty(&self) -> bool {
        matches!(self, ContentFingerprint::Empty)
    }

    /// Hex digest, or `None` for the empty sentinel
    pub fn digest(&self) -> Option<&str> {
        match self {
            ContentFingerprint::Empty => None,
            ContentFingerprint::Digest(hex) => Some(hex),
        }
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentFingerprint::Empty => write!(f, "empty"),
            ContentFingerprint::Digest(hex) => write!(f, "{}", hex),
        }
    }
}

fn semantic_fields(record: &ConsultationRecord) -> BTreeMap<&'static str, &str> {
    BTreeMap::from([
        ("ownerName", record.owner_name.as_str()),
        ("patientName", record.patient_name.as_str()),
        ("species", record.species.as_str()),
        ("summary", record.summary.as_str()),
        (
            "transcription",
            record.transcription.as_deref().unwrap_or_default(),
        ),
        ("vetName", record.vet_name.as_str()),
    ])
}

/// Compute the content fingerprint of a record.
///
/// The canonical form is a JSON object whose keys are the semantic field
/// names in sorted order; an absent transcription is the empty string.
pub fn fingerprint(record: &ConsultationRecord) -> ContentFingerprint {
    let fields = semantic_fields(record);

    if fields.values().all(|v| v.trim().is_empty()) {
        return ContentFingerprint::Empty;
    }

    // BTreeMap serializes keys in order, and string escaping is deterministic
    let canonical = serde_json::to_string(&fields).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let hash = hasher.finalize();

    ContentFingerprint::Digest(hex::encode(hash))
}
