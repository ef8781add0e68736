pub mod support;

mod compact;
mod errors;
mod graph;
mod init;
mod list;
mod save;
mod start;
mod stats;
