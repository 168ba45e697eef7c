use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const EN: &str = "{\n  \"a\": \"A\",\n  \"b\": \"B\",\n  \"c\": \"C\"\n}\n";
const RO: &str = "{\n  \"b\": \"B ro\",\n  \"c\": \"C ro\"\n}\n";

fn project() -> Result<CliTest> {
    CliTest::with_files(&[("en.json", EN), ("ro.json", RO)])
}

#[test]
fn test_prune_dry_run_reports_without_writing() -> Result<()> {
    let test = project()?;

    let output = test.run(&["prune", "b"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Would delete 'b' from 2 file(s):"));
    assert!(output.stdout.contains("  - en.json\n  - ro.json\n"));
    assert_eq!(test.read_file("en.json")?, EN);
    assert_eq!(test.read_file("ro.json")?, RO);

    Ok(())
}

#[test]
fn test_prune_apply_removes_from_canonical_and_translations() -> Result<()> {
    let test = project()?;

    let output = test.run(&["prune", "b", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Deleted 'b' from 2 file(s):"));
    assert_snapshot!(test.read_file("en.json")?.trim_end(), @r#"
    {
      "a": "A",
      "c": "C"
    }
    "#);
    // "b" was first in ro.json, so its trailing comma goes with it.
    assert_snapshot!(test.read_file("ro.json")?.trim_end(), @r#"
    {
      "c": "C ro"
    }
    "#);

    Ok(())
}

#[test]
fn test_prune_path_already_gone_from_canonical() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en.json", "{\n  \"a\": \"A\"\n}\n"),
        ("ro.json", "{\n  \"a\": \"A ro\",\n  \"old\": \"stale\"\n}\n"),
    ])?;

    let output = test.run(&["prune", "old", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Deleted 'old' from 1 file(s):"));
    assert_eq!(test.read_file("ro.json")?, "{\n  \"a\": \"A ro\"\n}\n");

    Ok(())
}

#[test]
fn test_prune_nested_leaf_keeps_parent() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en.json", "{\n  \"s\": {\n    \"x\": \"X\"\n  }\n}\n"),
        ("ro.json", "{\n  \"s\": {\n    \"x\": \"X ro\"\n  }\n}\n"),
    ])?;

    let output = test.run(&["prune", "s.x", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let ro: serde_json::Value = serde_json::from_str(&test.read_file("ro.json")?)?;
    assert_eq!(ro, serde_json::json!({ "s": {} }));
    assert_eq!(test.read_file("en.json")?, "{\n  \"s\": {}\n}\n");

    Ok(())
}

#[test]
fn test_prune_object_in_canonical_fails() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en.json", "{\n  \"s\": {\n    \"x\": \"X\"\n  }\n}\n"),
        ("ro.json", "{\n  \"s\": {}\n}\n"),
    ])?;

    let output = test.run(&["prune", "s", "--apply"])?;

    assert_eq!(output.code, Some(2));
    assert!(output
        .stderr
        .contains("property 's' does not hold a string value in the canonical document"));
    assert_eq!(test.read_file("ro.json")?, "{\n  \"s\": {}\n}\n");

    Ok(())
}

#[test]
fn test_prune_nothing_to_do() -> Result<()> {
    let test = project()?;

    let output = test.run(&["prune", "zzz"])?;

    assert_eq!(output.code, Some(0));
    assert!(output
        .stdout
        .contains("'zzz' is not present in any translation file"));

    Ok(())
}
