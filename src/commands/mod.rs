//! CLI commands for vetai

pub mod compact;
pub mod dispatch;
pub mod graph;
pub mod init;
pub mod list;
pub mod save;
pub mod start;
pub mod stats;

use serde::Serialize;
use vetai_core::error::Result;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
