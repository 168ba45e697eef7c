use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::super::args::CommonArgs;
use super::{CommandResult, CommandSummary};
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{Session, SessionSettings},
    issues::{Issue, Severity},
};

/// Load configuration and open a session for the translations directory.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g., `--canonical-file ro.json`)
/// 2. `.locsyncrc.json` config file
/// 3. Built-in defaults
pub fn open_session(common: &CommonArgs) -> Result<Session> {
    let root_dir = common.root.clone().unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&root_dir)
        .with_context(|| format!("Failed to load configuration from {:?}", root_dir))?;
    if !config_result.from_file {
        info!("no {} found, using default configuration", CONFIG_FILE_NAME);
    }

    let mut config = config_result.config;
    if let Some(ref canonical_file) = common.canonical_file {
        config.canonical_file = canonical_file.clone();
        config.validate()?;
    }

    let settings = settings_from_config(&config, &root_dir)?;
    Ok(Session::open(settings, config_result.from_file))
}

fn settings_from_config(config: &Config, root_dir: &Path) -> Result<SessionSettings> {
    Ok(SessionSettings {
        root: translations_dir(&config.translations_root, root_dir),
        canonical_file: config.canonical_file.clone(),
        reserved: config.reserved_patterns()?,
        indent_style: config.indent_style,
        workspace_marker: config.workspace_marker.clone(),
    })
}

/// Resolve `translationsRoot` against the project directory.
fn translations_dir(translations_root: &str, root_dir: &Path) -> PathBuf {
    let p = Path::new(translations_root);
    if p.is_absolute() {
        return p.to_path_buf();
    }

    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    extra_errors: usize,
    extra_warnings: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count()
        + extra_errors;

    let warning_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count()
        + extra_warnings;

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        parse_error_count,
    }
}
