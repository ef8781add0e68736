//! `vetai save` command - persist one consultation
//!
//! The record is written first; indexing it in the knowledge graph is best
//! effort and never fails the command.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::cli::SaveArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::print_json;
use crate::output_by_format_result;
use vetai_core::bail_usage;
use vetai_core::error::{Result, VetaiError};
use vetai_core::graph::{index_consultation, OfflineKnowledgeGraph};
use vetai_core::record::ConsultationRecord;
use vetai_core::store::RecordStore;

/// Execute the save command
pub fn execute(ctx: &CommandContext, args: &SaveArgs) -> Result<()> {
    let (content, source) = read_input(args.file.as_deref())?;
    if content.trim().is_empty() {
        bail_usage!("no consultation JSON on input");
    }

    let record = ConsultationRecord::parse(&content, &source)?;

    let config = ctx.config()?;
    let store = RecordStore::init(&ctx.store_path(&config))?;
    let path = store.save(&record)?;

    let indexed = if args.no_index {
        None
    } else {
        let graph = OfflineKnowledgeGraph::new(config.graph.clone());
        index_consultation(&graph, &record)
    };

    output_by_format_result!(ctx.cli.format,
        json => print_json(&serde_json::json!({
            "status": "saved",
            "id": record.id,
            "path": path.display().to_string(),
            "graph_indexed": indexed.is_some(),
            "episode_id": indexed.as_ref().map(|o| o.episode_id.clone()),
        })),
        human => {
            if !ctx.cli.quiet {
                println!("Saved consultation {}", record.id);
                println!("{}", path.display());
                if !args.no_index && indexed.is_none() {
                    println!("Not indexed in knowledge graph (unavailable)");
                }
            }
        }
    )
}

fn read_input(file: Option<&Path>) -> Result<(String, PathBuf)> {
    match file {
        Some(path) if path != Path::new("-") => {
            let content = fs::read_to_string(path)
                .map_err(|e| VetaiError::io_operation("read", path.display(), e))?;
            Ok((content, path.to_path_buf()))
        }
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| VetaiError::io_operation("read", "stdin", e))?;
            Ok((content, PathBuf::from("<stdin>")))
        }
    }
}
