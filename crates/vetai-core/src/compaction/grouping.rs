use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::record::{fingerprint, ConsultationRecord, ContentFingerprint};

/// Records sharing one non-empty content fingerprint
#[derive(Debug, Clone)]
pub struct DuplicateGroup<'a> {
    /// Hex digest shared by every member
    pub digest: String,
    /// Members ordered newest first; the first one survives
    pub members: Vec<&'a ConsultationRecord>,
}

impl<'a> DuplicateGroup<'a> {
    /// The record that is kept
    pub fn survivor(&self) -> &'a ConsultationRecord {
        self.members[0]
    }

    /// Every member except the survivor
    pub fn victims(&self) -> &[&'a ConsultationRecord] {
        &self.members[1..]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Compare two records by recency: `(timestamp, id)`.
///
/// Parsed timestamps compare by instant and rank above unparseable ones,
/// which compare as raw text. Equal times fall back to the id.
pub fn recency_cmp(a: &ConsultationRecord, b: &ConsultationRecord) -> Ordering {
    let by_time = match (a.parsed_timestamp(), b.parsed_timestamp()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.timestamp.cmp(&b.timestamp),
    };
    by_time.then_with(|| a.id.cmp(&b.id))
}

/// Partition records into duplicate groups keyed by digest.
///
/// Only groups with two or more members are returned; records with empty
/// content are never grouped. Members are sorted newest first, so the
/// survivor does not depend on input order.
pub fn group_duplicates(records: &[ConsultationRecord]) -> BTreeMap<String, DuplicateGroup<'_>> {
    let mut by_digest: BTreeMap<String, Vec<&ConsultationRecord>> = BTreeMap::new();

    for record in records {
        if let ContentFingerprint::Digest(digest) = fingerprint(record) {
            by_digest.entry(digest).or_default().push(record);
        }
    }

    by_digest
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(digest, mut members)| {
            members.sort_by(|a, b| recency_cmp(b, a));
            let group = DuplicateGroup {
                digest: digest.clone(),
                members,
            };
            (digest, group)
        })
        .collect()
}
