use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

fn project() -> Result<CliTest> {
    CliTest::with_files(&[
        ("en.json", "{\n  \"title\": \"Hello\",\n  \"menu\": {\n    \"open\": \"Open\"\n  }\n}\n"),
        ("ro.json", "{\n  \"title\": \"Salut\",\n  \"menu\": {\n    \"open\": \"Deschide\"\n  }\n}\n"),
        ("de.json", "{\n  \"menu\": \"flat\"\n}\n"),
    ])
}

#[test]
fn test_show_lists_every_translation() -> Result<()> {
    let test = project()?;

    let output = test.run(&["show", "menu.open"])?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "menu.open\n  canonical: \"Open\"\n  de.json: (missing)\n  ro.json: \"Deschide\"\n"
    );

    Ok(())
}

#[test]
fn test_show_single_locale() -> Result<()> {
    let test = project()?;

    let output = test.run(&["show", "title", "--locale", "ro"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("ro: \"Salut\""));

    Ok(())
}

#[test]
fn test_show_missing_translation_names_path_and_file() -> Result<()> {
    let test = project()?;

    let output = test.run(&["show", "title", "--locale", "de.json"])?;

    assert_eq!(output.code, Some(2));
    assert!(output
        .stderr
        .contains("Error: property 'title' is not present in translation file 'de.json'"));

    Ok(())
}

#[test]
fn test_show_unknown_translation_file() -> Result<()> {
    let test = project()?;

    let output = test.run(&["show", "title", "--locale", "fr"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("translation file 'fr' was not found"));

    Ok(())
}
