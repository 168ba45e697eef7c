use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created .locsyncrc.json"));
    assert!(test.root().join(".locsyncrc.json").exists());

    let content = test.read_file(".locsyncrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["canonicalFile"], "en.json");
    assert_eq!(parsed["translationsRoot"], "./");
    assert_eq!(parsed["indentStyle"], "auto");
    assert!(parsed["reservedFiles"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_files(&[(".locsyncrc.json", "{}")])?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error: .locsyncrc.json already exists"));
    assert_eq!(test.read_file(".locsyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&[])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Usage:"));

    Ok(())
}
