use anyhow::{Ok, Result};

use super::super::args::SyncCommand;
use super::helper::{finish, open_session};
use super::{CommandResult, CommandSummary, SyncKind, SyncSummary};
use crate::core::{DocumentStatus, LoggingProgress, PropertyPath, Session};

pub fn propagate(cmd: SyncCommand) -> Result<CommandResult> {
    run_sync(SyncKind::Propagate, cmd)
}

pub fn prune(cmd: SyncCommand) -> Result<CommandResult> {
    run_sync(SyncKind::Prune, cmd)
}

fn run_sync(kind: SyncKind, cmd: SyncCommand) -> Result<CommandResult> {
    let mut session = open_session(&cmd.common)?;
    let path = target_path(&session, &cmd)?;
    let progress = LoggingProgress::default();

    let report = match kind {
        SyncKind::Propagate => session.propagate(&path, cmd.apply, &progress)?,
        SyncKind::Prune => session.prune(&path, cmd.apply, &progress)?,
    };

    let errors = report
        .outcomes
        .iter()
        .filter(|o| matches!(o.status, DocumentStatus::Failed { .. }))
        .count();
    let warnings = report.problems() - errors;

    Ok(finish(
        CommandSummary::Sync(SyncSummary { kind, report }),
        Vec::new(),
        errors,
        warnings,
        true,
    ))
}

/// The explicit path argument, or the property enclosing `--at`.
fn target_path(session: &Session, cmd: &SyncCommand) -> Result<PropertyPath> {
    match (&cmd.path, cmd.at) {
        (Some(raw), _) => Ok(PropertyPath::parse(raw)?),
        (None, Some(at)) => Ok(session.resolve_path_at(at.line, at.column)?),
        (None, None) => anyhow::bail!("a property path or --at LINE:COL is required"),
    }
}
