use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const EN: &str = r#"{
  "chars": "{{count}} characters",
  "title": "Hello"
}
"#;

#[test]
fn test_check_consistent_translations() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en.json", EN),
        ("ro.json", "{\n  \"chars\": \"{{count}} caractere\",\n  \"title\": \"Salut\"\n}\n"),
    ])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(0));
    assert!(output
        .stdout
        .contains("Checked 1 translation file - no issues found"));

    Ok(())
}

#[test]
fn test_check_reports_missing_and_invalid_variables() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en.json", EN),
        ("ro.json", "{\n  \"chars\": \"{{cou}} caractere\"\n}\n"),
    ])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error: \"chars\"  missing-variables"));
    assert!(output.stdout.contains("error: \"chars\"  invalid-variables"));
    assert!(output.stdout.contains("--> ./ro.json:2:12"));
    assert!(output.stdout.contains(
        "= note: the following variables are not used from the canonical value: count"
    ));
    assert!(output.stdout.contains(
        "= note: the following variables are invalid: cou. Valid ones are: count"
    ));
    assert!(output.stdout.contains("2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_check_ignores_short_values() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en.json", EN),
        ("ro.json", "{\n  \"chars\": \"{{c}}\"\n}\n"),
    ])?;

    let output = test.run(&["check"])?;

    // "{{c}}" is exactly five characters long, so it is still checked.
    assert_eq!(output.code, Some(1));

    test.write_file("ro.json", "{\n  \"chars\": \"abc\"\n}\n")?;
    let output = test.run(&["check"])?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_check_reports_unparsable_file_as_warning() -> Result<()> {
    let test = CliTest::with_files(&[("en.json", EN), ("ro.json", "{\n  \"chars\": \n")])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("parse-error"));
    assert!(output.stdout.contains("--> ./ro.json"));
    assert!(output.stdout.contains("1 problems (0 errors, 1 warning)"));
    assert!(output
        .stderr
        .contains("1 file(s) could not be parsed (use -v for details)"));

    Ok(())
}

#[test]
fn test_check_outside_localization_workspace() -> Result<()> {
    let test = CliTest::with_files(&[("ro.json", "{\n  \"chars\": \"{{cou}} caractere\"\n}\n")])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("not a localization workspace"));

    Ok(())
}

#[test]
fn test_check_with_translations_root_from_config() -> Result<()> {
    let test = CliTest::with_files(&[
        (".locsyncrc.json", r#"{ "translationsRoot": "./i18n" }"#),
        ("i18n/en.json", EN),
        ("i18n/de.json", "{\n  \"chars\": \"Zeichen\"\n}\n"),
    ])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("missing-variables"));
    assert!(output.stdout.contains("de.json:2:12"));

    Ok(())
}
