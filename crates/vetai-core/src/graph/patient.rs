//! Patient graph assembly from typed backend rows

use std::collections::{BTreeMap, HashSet};

use super::types::{GraphData, GraphLink, GraphNode, NodeGroup};

/// Longest diagnosis/treatment label shown before truncation
pub const MAX_LABEL_CHARS: usize = 30;

/// Read access to a graph-database node's property bag.
///
/// Implemented once per backend so assembly never inspects result shapes.
pub trait NodeProperties {
    /// Whether the value is a node carrying properties at all
    fn has_properties(&self) -> bool;

    fn property(&self, name: &str) -> Option<&str>;
}

/// Backend-neutral node: an optional property bag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyNode {
    properties: Option<BTreeMap<String, String>>,
}

impl PropertyNode {
    /// A node with the given properties
    pub fn new<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        PropertyNode {
            properties: Some(
                properties
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// A node with only a `name` property
    pub fn named(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self::new([("name", name)])
    }

    /// A value without a property bag
    pub fn bare() -> Self {
        PropertyNode { properties: None }
    }
}

impl NodeProperties for PropertyNode {
    fn has_properties(&self) -> bool {
        self.properties.is_some()
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.as_ref()?.get(name).map(String::as_str)
    }
}

/// One result row of the patient neighbourhood query
#[derive(Debug, Clone)]
pub struct PatientRow<N> {
    pub patient: Option<N>,
    pub owner: Option<N>,
    pub vet: Option<N>,
    pub diagnosis: Option<N>,
    pub treatment: Option<N>,
}

impl<N> Default for PatientRow<N> {
    fn default() -> Self {
        PatientRow {
            patient: None,
            owner: None,
            vet: None,
            diagnosis: None,
            treatment: None,
        }
    }
}

#[derive(Default)]
struct GraphBuilder {
    data: GraphData,
    node_ids: HashSet<String>,
    link_keys: HashSet<GraphLink>,
}

impl GraphBuilder {
    fn add_node(&mut self, id: &str, label: String, group: NodeGroup) {
        if id.is_empty() || !self.node_ids.insert(id.to_string()) {
            return;
        }
        self.data.nodes.push(GraphNode {
            id: id.to_string(),
            label,
            group: group.id(),
        });
    }

    fn add_link(&mut self, source: &str, target: &str, relation: &str) {
        let link = GraphLink {
            source: source.to_string(),
            target: target.to_string(),
            relation: relation.to_string(),
        };
        if self.link_keys.insert(link.clone()) {
            self.data.links.push(link);
        }
    }
}

/// Build the graph view around one patient.
///
/// Links always use `patient_name` (trimmed) as the patient end. Node ids
/// are unique; repeated rows do not repeat links.
///
/// Called by [`KnowledgeGraphPort::patient_graph`](super::KnowledgeGraphPort::patient_graph)
/// implementations with the rows of their patient query.
pub fn assemble_patient_graph<N: NodeProperties>(
    patient_name: &str,
    rows: &[PatientRow<N>],
) -> GraphData {
    let patient_name = patient_name.trim();
    let mut graph = GraphBuilder::default();

    for row in rows {
        if let Some(name) = node_name(row.patient.as_ref(), patient_name) {
            graph.add_node(&name, name.clone(), NodeGroup::Patient);
        }

        if let Some(owner) = node_name(row.owner.as_ref(), "Unknown") {
            graph.add_node(&owner, owner.clone(), NodeGroup::Owner);
            graph.add_link(patient_name, &owner, "owns");
        }

        if let Some(vet) = node_name(row.vet.as_ref(), "Unknown") {
            graph.add_node(&vet, vet.clone(), NodeGroup::Vet);
            graph.add_link(&vet, patient_name, "treated");
        }

        if let Some(diagnosis) = node_name(row.diagnosis.as_ref(), "Unknown") {
            graph.add_node(&diagnosis, truncate_label(&diagnosis), NodeGroup::Diagnosis);
            graph.add_link(patient_name, &diagnosis, "diagnosed with");
        }

        if let Some(treatment) = node_name(row.treatment.as_ref(), "Unknown") {
            graph.add_node(&treatment, truncate_label(&treatment), NodeGroup::Treatment);
            graph.add_link(patient_name, &treatment, "treated with");
        }
    }

    if graph.data.nodes.is_empty() {
        tracing::warn!(patient = patient_name, "No graph data found for patient");
    }

    graph.data
}

/// `name` property of a node, `fallback` when the node has no name
fn node_name<N: NodeProperties>(node: Option<&N>, fallback: &str) -> Option<String> {
    let node = node.filter(|n| n.has_properties())?;
    Some(node.property("name").unwrap_or(fallback).to_string())
}

fn truncate_label(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let head: String = name.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}
