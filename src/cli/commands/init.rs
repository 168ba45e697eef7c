use std::{fs, path::Path};

use anyhow::{Context, Ok, Result, bail};

use super::helper::finish;
use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    Ok(finish(
        CommandSummary::Init(InitSummary { created: true }),
        Vec::new(),
        0,
        0,
        true,
    ))
}
