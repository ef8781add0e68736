//! `vetai graph` commands - knowledge-graph port access

use crate::commands::dispatch::CommandContext;
use crate::commands::print_json;
use crate::output_by_format_result;
use vetai_core::bail_usage;
use vetai_core::error::Result;
use vetai_core::graph::{
    patient_graph_or_empty, search_or_empty, statistics_or_unavailable, GraphStatus,
    KnowledgeGraphPort, LanguageModelPort, OfflineKnowledgeGraph, OfflineLanguageModel,
};

/// Execute `graph health`
pub fn execute_health(ctx: &CommandContext) -> Result<()> {
    let config = ctx.config()?;
    let graph = OfflineKnowledgeGraph::new(config.graph.clone());
    let model = OfflineLanguageModel::new(config.graph.api_key_present);

    let ports = vec![graph.health_check(), model.health_check()];

    output_by_format_result!(ctx.cli.format,
        json => print_json(&serde_json::json!({
            "graph_name": config.graph.graph_name,
            "target": graph.target(),
            "ports": ports,
        })),
        human => {
            for port in &ports {
                let state = if port.available { "available" } else { "unavailable" };
                println!("{}: {} ({})", port.name, state, port.detail);
            }
        }
    )
}

/// Execute `graph patient <name>`; an unavailable graph yields an empty view
pub fn execute_patient(ctx: &CommandContext, name: &str) -> Result<()> {
    let config = ctx.config()?;
    let graph = OfflineKnowledgeGraph::new(config.graph.clone());
    let data = patient_graph_or_empty(&graph, name);

    output_by_format_result!(ctx.cli.format,
        json => print_json(&data),
        human => {
            if data.is_empty() {
                if !ctx.cli.quiet {
                    println!("No graph data for patient {}", name.trim());
                }
            } else {
                for node in &data.nodes {
                    println!("[{}] {}", node.group, node.label);
                }
                for link in &data.links {
                    println!("{} -{}-> {}", link.source, link.relation, link.target);
                }
            }
        }
    )
}

/// Execute `graph search <query>`; an unavailable graph yields no results
pub fn execute_search(ctx: &CommandContext, query: &str, limit: usize) -> Result<()> {
    if query.trim().is_empty() {
        bail_usage!("search query is empty");
    }
    let config = ctx.config()?;
    let graph = OfflineKnowledgeGraph::new(config.graph.clone());
    let results = search_or_empty(&graph, query, limit);

    output_by_format_result!(ctx.cli.format,
        json => print_json(&serde_json::json!({
            "results": results,
            "count": results.len(),
        })),
        human => {
            if results.is_empty() {
                if !ctx.cli.quiet {
                    println!("No episodes match {}", query.trim());
                }
            } else {
                for episode in &results {
                    println!("{} {}", episode.episode_id, episode.name);
                }
            }
        }
    )
}

/// Execute `graph stats`
pub fn execute_stats(ctx: &CommandContext) -> Result<()> {
    let config = ctx.config()?;
    let graph = OfflineKnowledgeGraph::new(config.graph.clone());
    let stats = statistics_or_unavailable(&graph, &config.graph.graph_name);

    output_by_format_result!(ctx.cli.format,
        json => print_json(&stats),
        human => {
            println!("Graph: {}", stats.graph_name);
            match stats.status {
                GraphStatus::Active => println!("Status: active"),
                GraphStatus::Unavailable => println!("Status: unavailable"),
            }
            if let Some(count) = stats.episode_count {
                println!("Episodes: {}", count);
            }
            if let Some(detail) = &stats.detail {
                println!("Detail: {}", detail);
            }
        }
    )
}
