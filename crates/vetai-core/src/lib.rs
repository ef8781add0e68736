//! VetAI Core Library
//!
//! Core domain logic for the VetAI consultation store: persisted records,
//! content fingerprints, duplicate compaction and the knowledge-graph ports.

pub mod compaction;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod logging;
pub mod record;
pub mod startup;
pub mod store;
