use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::IndentStyle;

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_canonical_file")]
    pub canonical_file: String,
    #[serde(default = "default_translations_root")]
    pub translations_root: String,
    #[serde(default = "default_reserved_files")]
    pub reserved_files: Vec<String>,
    #[serde(default)]
    pub indent_style: IndentStyle,
    #[serde(default = "default_workspace_marker")]
    pub workspace_marker: String,
}

fn default_canonical_file() -> String {
    "en.json".to_string()
}

fn default_translations_root() -> String {
    "./".to_string()
}

fn default_reserved_files() -> Vec<String> {
    ["package.json", ".eslintrc.json"].map(String::from).to_vec()
}

fn default_workspace_marker() -> String {
    "translations".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canonical_file: default_canonical_file(),
            translations_root: default_translations_root(),
            reserved_files: default_reserved_files(),
            indent_style: IndentStyle::default(),
            workspace_marker: default_workspace_marker(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the canonical file name is not a plain `.json`
    /// file name or any pattern in `reservedFiles` is not a valid glob.
    pub fn validate(&self) -> Result<()> {
        let canonical = Path::new(&self.canonical_file);
        if self.canonical_file.is_empty()
            || canonical.file_name().and_then(|n| n.to_str()) != Some(self.canonical_file.as_str())
            || canonical.extension().and_then(|e| e.to_str()) != Some("json")
        {
            bail!(
                "Invalid 'canonicalFile': \"{}\" (expected a file name such as \"en.json\")",
                self.canonical_file
            );
        }

        self.reserved_patterns()?;
        Ok(())
    }

    /// Compiled `reservedFiles` patterns.
    pub fn reserved_patterns(&self) -> Result<Vec<Pattern>> {
        self.reserved_files
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'reservedFiles': \"{}\"", pattern)
                })
            })
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
