use std::fs;

use anyhow::Result;
use rayon::prelude::*;
use tracing::warn;

use super::super::args::CheckCommand;
use super::helper::{finish, open_session};
use super::{CheckSummary, CommandResult, CommandSummary};
use crate::{
    core::{Session, TranslationDocument},
    issues::{Issue, ParseErrorIssue},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let session = open_session(&cmd.common)?;
    let is_localization_workspace = session.is_localization_workspace();
    if !is_localization_workspace {
        warn!(
            root = %session.root().display(),
            "not a localization workspace, nothing to check"
        );
    }

    let documents = session.translation_documents(false)?;
    let issues: Vec<Issue> = documents
        .par_iter()
        .flat_map_iter(|document| check_document_issues(&session, document))
        .collect();

    Ok(finish(
        CommandSummary::Check(CheckSummary {
            files_checked: documents.len(),
            is_localization_workspace,
        }),
        issues,
        0,
        0,
        true,
    ))
}

fn check_document_issues(session: &Session, document: &TranslationDocument) -> Vec<Issue> {
    let file_path = document.path.display().to_string();

    let findings = match session.check_document(document) {
        Ok(findings) => findings,
        Err(error) => {
            return vec![Issue::ParseError(ParseErrorIssue {
                file_path,
                error: error.to_string(),
            })];
        }
    };
    if findings.is_empty() {
        return Vec::new();
    }

    // Findings carry positions only; re-read the file for the source lines.
    let content = fs::read_to_string(&document.path).unwrap_or_default();
    let lines: Vec<&str> = content.lines().collect();

    findings
        .into_iter()
        .flat_map(|finding| {
            let source_line = lines
                .get(finding.line.saturating_sub(1))
                .copied()
                .unwrap_or_default();
            Issue::from_finding(&file_path, source_line, finding)
        })
        .collect()
}
