//! locsync - keep JSON translation files in sync with a canonical locale file
//!
//! locsync is a CLI tool and library that propagates and prunes properties
//! across sibling translation files without reformatting them, and checks
//! that translated values use the same `{{placeholder}}` variables as the
//! canonical values.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Sync and consistency engine
//! - `issues`: Issue type definitions and reporting
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
