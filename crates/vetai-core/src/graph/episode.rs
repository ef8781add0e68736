//! Plain-text episode rendering of a consultation

use serde_json::Value;

use crate::record::ConsultationRecord;

/// Transcription characters kept in an episode body
pub const TRANSCRIPTION_EXCERPT_CHARS: usize = 500;

const UNKNOWN: &str = "Unknown";

/// Episode title for a consultation
pub fn episode_name(record: &ConsultationRecord) -> String {
    format!("Consultation: {}", or_unknown(&record.patient_name))
}

/// Render the text body submitted to the knowledge graph.
///
/// One `Label: value` line per known fact; optional facts are omitted
/// when empty.
pub fn build_episode_text(record: &ConsultationRecord) -> String {
    let mut parts = vec![
        format!("Patient: {}", or_unknown(&record.patient_name)),
        format!("Species: {}", or_unknown(&record.species)),
        format!("Owner: {}", or_unknown(&record.owner_name)),
        format!("Veterinarian: {}", or_unknown(&record.vet_name)),
    ];

    if let Some(date) = record.extracted_str("administrative", "date") {
        parts.push(format!("Date: {}", date));
    }

    for (field, label) in [
        ("chiefComplaint", "Chief Complaint"),
        ("diagnosis", "Diagnosis"),
        ("treatment", "Treatment"),
    ] {
        if let Some(value) = record.extracted_str("clinical", field) {
            parts.push(format!("{}: {}", label, value));
        }
    }

    if let Some(medications) = medications(record) {
        parts.push(format!("Medications: {}", medications));
    }

    if let Some(transcription) = record
        .transcription
        .as_deref()
        .filter(|t| !t.trim().is_empty())
    {
        let excerpt: String = transcription
            .chars()
            .take(TRANSCRIPTION_EXCERPT_CHARS)
            .collect();
        parts.push(format!("Transcription: {}...", excerpt));
    }

    if !record.summary.trim().is_empty() {
        parts.push(format!("Summary: {}", record.summary));
    }

    parts.join("\n")
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN
    } else {
        value
    }
}

/// `extractedData.clinical.medications`, either a list or a single string
fn medications(record: &ConsultationRecord) -> Option<String> {
    let value = record
        .extracted_data
        .as_ref()?
        .get("clinical")?
        .get("medications")?;

    match value {
        Value::Array(items) => {
            let names: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
