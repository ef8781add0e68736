use serde::{Deserialize, Serialize};

/// Node group used by the patient graph view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeGroup {
    Patient,
    Owner,
    Vet,
    Diagnosis,
    Treatment,
}

impl NodeGroup {
    /// Numeric group id the visualization colors by
    pub fn id(self) -> u8 {
        match self {
            NodeGroup::Patient => 1,
            NodeGroup::Owner => 2,
            NodeGroup::Vet => 3,
            NodeGroup::Diagnosis => 4,
            NodeGroup::Treatment => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub group: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// Nodes and links of a graph view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// A consultation episode returned by a knowledge-graph search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_id: String,
    pub name: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Whether the graph backend answered a statistics request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphStatus {
    Active,
    Unavailable,
}

/// Summary of the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub graph_name: String,
    pub status: GraphStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GraphStats {
    pub fn unavailable(graph_name: &str, detail: impl Into<String>) -> Self {
        GraphStats {
            graph_name: graph_name.to_string(),
            status: GraphStatus::Unavailable,
            episode_count: None,
            detail: Some(detail.into()),
        }
    }
}

/// Acknowledgement that a consultation was indexed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOutcome {
    pub episode_id: String,
    pub patient: String,
    pub timestamp: String,
}

/// Result of probing an external service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortHealth {
    pub name: String,
    pub available: bool,
    pub detail: String,
}

impl PortHealth {
    pub fn available(name: &str, detail: impl Into<String>) -> Self {
        PortHealth {
            name: name.to_string(),
            available: true,
            detail: detail.into(),
        }
    }

    pub fn unavailable(name: &str, detail: impl Into<String>) -> Self {
        PortHealth {
            name: name.to_string(),
            available: false,
            detail: detail.into(),
        }
    }
}
