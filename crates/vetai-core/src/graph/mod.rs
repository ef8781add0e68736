//! Knowledge-graph and language-model ports
//!
//! The graph engine and the language model are external services. The
//! rest of the crate only talks to them through [`KnowledgeGraphPort`] and
//! [`LanguageModelPort`]; an unconfigured or unreachable backend answers
//! with `VetaiError::Unavailable` instead of panicking or raising.

pub mod episode;
pub mod offline;
pub mod patient;
pub mod types;

use crate::error::Result;
use crate::record::ConsultationRecord;

pub use episode::{build_episode_text, episode_name};
pub use offline::{OfflineKnowledgeGraph, OfflineLanguageModel};
pub use patient::{assemble_patient_graph, NodeProperties, PatientRow, PropertyNode};
pub use types::{
    Episode, GraphData, GraphLink, GraphNode, GraphStats, GraphStatus, IndexOutcome, NodeGroup,
    PortHealth,
};

/// Temporal knowledge graph the consultations are indexed into
pub trait KnowledgeGraphPort: Send + Sync {
    fn name(&self) -> &str;

    fn health_check(&self) -> PortHealth;

    /// Index one consultation as an episode
    fn add_consultation(&self, record: &ConsultationRecord) -> Result<IndexOutcome>;

    /// Episodes relevant to a free-text query
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Episode>>;

    /// Graph view centered on one patient
    fn patient_graph(&self, patient_name: &str) -> Result<GraphData>;

    fn statistics(&self) -> Result<GraphStats>;
}

/// Text completion service
pub trait LanguageModelPort: Send + Sync {
    fn name(&self) -> &str;

    fn health_check(&self) -> PortHealth;

    /// Answer a prompt; called by backend integrations that build
    /// retrieval-augmented answers on top of [`KnowledgeGraphPort::search`]
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Patient graph, or an empty graph when the port cannot provide one
pub fn patient_graph_or_empty(port: &dyn KnowledgeGraphPort, patient_name: &str) -> GraphData {
    match port.patient_graph(patient_name.trim()) {
        Ok(graph) => graph,
        Err(e) => {
            tracing::warn!(port = port.name(), patient = patient_name, error = %e, "Patient graph unavailable");
            GraphData::default()
        }
    }
}

/// Search results, or none when the port cannot answer
pub fn search_or_empty(port: &dyn KnowledgeGraphPort, query: &str, limit: usize) -> Vec<Episode> {
    match port.search(query.trim(), limit) {
        Ok(episodes) => episodes,
        Err(e) => {
            tracing::warn!(port = port.name(), query, error = %e, "Graph search unavailable");
            Vec::new()
        }
    }
}

/// Graph statistics; an unreachable port is reported, not returned as an error
pub fn statistics_or_unavailable(port: &dyn KnowledgeGraphPort, graph_name: &str) -> GraphStats {
    port.statistics()
        .unwrap_or_else(|e| GraphStats::unavailable(graph_name, e.to_string()))
}

/// Offer a saved consultation to the graph; failures are logged, never returned
pub fn index_consultation(
    port: &dyn KnowledgeGraphPort,
    record: &ConsultationRecord,
) -> Option<IndexOutcome> {
    match port.add_consultation(record) {
        Ok(outcome) => {
            tracing::info!(id = %record.id, episode = %outcome.episode_id, "Indexed consultation");
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!(id = %record.id, error = %e, "Consultation not indexed in graph");
            None
        }
    }
}
