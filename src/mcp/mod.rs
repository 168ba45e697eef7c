//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the sync engine to AI assistants and editor hosts over stdio.
//!
//! ## Module Structure
//!
//! - `server`: tool router and server entry point
//! - `types`: parameter and result types of each tool

mod server;
pub mod types;

pub use server::{LocsyncMcpServer, run_server};
