//! Port implementations used when no backend client is linked in
//!
//! Every operation returns `VetaiError::Unavailable`; health reports say why.

use super::types::{Episode, GraphData, GraphStats, IndexOutcome, PortHealth};
use super::{KnowledgeGraphPort, LanguageModelPort};
use crate::config::GraphConfig;
use crate::error::{Result, VetaiError};
use crate::record::ConsultationRecord;

const NO_CLIENT: &str = "no client for this backend in this build";

/// Knowledge graph that is configured but never reachable
#[derive(Debug, Clone)]
pub struct OfflineKnowledgeGraph {
    config: GraphConfig,
}

impl OfflineKnowledgeGraph {
    pub fn new(config: GraphConfig) -> Self {
        OfflineKnowledgeGraph { config }
    }

    /// Backend location, e.g. `redis://localhost:6379/vetai_knowledge`
    pub fn target(&self) -> String {
        format!(
            "redis://{}:{}/{}",
            self.config.host, self.config.port, self.config.graph_name
        )
    }

    fn unavailable(&self) -> VetaiError {
        VetaiError::unavailable(self.name(), format!("{} ({})", NO_CLIENT, self.target()))
    }
}

impl KnowledgeGraphPort for OfflineKnowledgeGraph {
    fn name(&self) -> &str {
        "knowledge graph"
    }

    fn health_check(&self) -> PortHealth {
        PortHealth::unavailable(self.name(), format!("{}: {}", self.target(), NO_CLIENT))
    }

    fn add_consultation(&self, _record: &ConsultationRecord) -> Result<IndexOutcome> {
        Err(self.unavailable())
    }

    fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Episode>> {
        Err(self.unavailable())
    }

    fn patient_graph(&self, _patient_name: &str) -> Result<GraphData> {
        Err(self.unavailable())
    }

    fn statistics(&self) -> Result<GraphStats> {
        Err(self.unavailable())
    }
}

/// Language model that is never reachable
#[derive(Debug, Clone)]
pub struct OfflineLanguageModel {
    api_key_present: bool,
}

impl OfflineLanguageModel {
    pub fn new(api_key_present: bool) -> Self {
        OfflineLanguageModel { api_key_present }
    }

    fn reason(&self) -> &'static str {
        if self.api_key_present {
            NO_CLIENT
        } else {
            "API_KEY is not set"
        }
    }
}

impl LanguageModelPort for OfflineLanguageModel {
    fn name(&self) -> &str {
        "language model"
    }

    fn health_check(&self) -> PortHealth {
        PortHealth::unavailable(self.name(), self.reason())
    }

    fn complete(&self, _prompt: &str) -> Result<String> {
        Err(VetaiError::unavailable(self.name(), self.reason()))
    }
}
