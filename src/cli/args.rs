//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `propagate`: Insert a canonical property into every translation file
//! - `prune`: Delete a property from every translation file
//! - `check`: Check `{{placeholder}}` consistency against the canonical file
//! - `show`: Look up the translations of one property
//! - `init`: Initialize locsync configuration file
//! - `serve`: Start MCP server for AI integration

use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Propagate(cmd)) | Some(Command::Prune(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Show(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project directory; the config file is searched from here (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Canonical translation file name (overrides config file)
    #[arg(long)]
    pub canonical_file: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// A 1-based `LINE:COL` position in the canonical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, column) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected LINE:COL, got \"{}\"", s))?;
        let line: usize = line.parse().context("invalid line number")?;
        let column: usize = column.parse().context("invalid column number")?;
        if line == 0 || column == 0 {
            return Err(anyhow!("line and column are 1-based"));
        }
        Ok(Position { line, column })
    }
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Dotted property path, e.g. `setting.editor.fontSize`
    #[arg(required_unless_present = "at", conflicts_with = "at")]
    pub path: Option<String>,

    /// Use the property enclosing this position of the canonical file
    #[arg(long, value_name = "LINE:COL")]
    pub at: Option<Position>,

    /// Actually write the files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Dotted property path
    pub path: String,

    /// Only look in this translation file (file name or locale, e.g. `ro`)
    #[arg(long)]
    pub locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Insert a property of the canonical file into every other translation file
    Propagate(SyncCommand),
    /// Delete a property from every translation file, the canonical one included
    Prune(SyncCommand),
    /// Check that translated values use the placeholders of the canonical values
    Check(CheckCommand),
    /// Show the translations of a property
    Show(ShowCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
