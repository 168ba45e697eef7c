use anyhow::{Ok, Result};

use super::super::args::ShowCommand;
use super::helper::{finish, open_session};
use super::{CommandResult, CommandSummary, ShowEntry, ShowSummary};
use crate::core::{PropertyPath, path::leaf_value};

pub fn show(cmd: ShowCommand) -> Result<CommandResult> {
    let session = open_session(&cmd.common)?;
    let path = PropertyPath::parse(&cmd.path)?;

    let canonical = session
        .load_canonical()
        .ok()
        .and_then(|doc| leaf_value(&doc, &path).map(str::to_string));

    let entries = match &cmd.locale {
        Some(document) => vec![ShowEntry {
            document: document.clone(),
            value: Some(session.lookup_translation(&path, document)?),
        }],
        None => session
            .lookup_everywhere(&path)?
            .into_iter()
            .map(|(document, value)| ShowEntry {
                document: document.name,
                value,
            })
            .collect(),
    };

    Ok(finish(
        CommandSummary::Show(ShowSummary {
            path: path.to_string(),
            canonical,
            entries,
        }),
        Vec::new(),
        0,
        0,
        false,
    ))
}
