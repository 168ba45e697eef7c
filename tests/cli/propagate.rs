use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const EN: &str = "{\n  \"a\": \"A\",\n  \"b\": \"B {{count}}\",\n  \"c\": \"C\"\n}\n";
const RO: &str = "{\n  \"a\": \"A ro\",\n  \"c\": \"C ro\"\n}\n";
const DE: &str = "{\n  \"a\": \"A de\",\n  \"b\": \"B de {{count}}\",\n  \"c\": \"C de\"\n}\n";

fn project() -> Result<CliTest> {
    CliTest::with_files(&[("en.json", EN), ("ro.json", RO), ("de.json", DE)])
}

#[test]
fn test_propagate_dry_run_reports_without_writing() -> Result<()> {
    let test = project()?;

    let output = test.run(&["propagate", "b"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Would insert 'b' into 1 file(s):"));
    assert!(output.stdout.contains("  - ro.json"));
    assert!(!output.stdout.contains("de.json"));
    assert!(output.stdout.contains("Run with --apply to write these changes."));
    assert_eq!(test.read_file("ro.json")?, RO);

    Ok(())
}

#[test]
fn test_propagate_apply_inserts_between_siblings() -> Result<()> {
    let test = project()?;

    let output = test.run(&["propagate", "b", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Inserted 'b' into 1 file(s):"));
    assert_snapshot!(test.read_file("ro.json")?.trim_end(), @r#"
    {
      "a": "A ro",
      "b": "B {{count}}",
      "c": "C ro"
    }
    "#);
    assert_eq!(test.read_file("de.json")?, DE);
    assert_eq!(test.read_file("en.json")?, EN);

    Ok(())
}

#[test]
fn test_propagate_twice_is_a_no_op() -> Result<()> {
    let test = project()?;

    test.run(&["propagate", "b", "--apply"])?;
    let after_first = test.read_file("ro.json")?;
    let output = test.run(&["propagate", "b", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output
        .stdout
        .contains("'b' is already present in every translation file"));
    assert_eq!(test.read_file("ro.json")?, after_first);

    Ok(())
}

#[test]
fn test_propagate_at_position() -> Result<()> {
    let test = project()?;

    // Line 3 of en.json holds "b".
    let output = test.run(&["propagate", "--at", "3:4", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Inserted 'b' into 1 file(s):"));
    assert!(test.read_file("ro.json")?.contains("\"b\": \"B {{count}}\""));

    Ok(())
}

#[test]
fn test_propagate_creates_nested_objects() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "en.json",
            "{\n  \"top\": \"T\",\n  \"setting\": {\n    \"editor\": {\n      \"name\": \"Editor\"\n    }\n  }\n}\n",
        ),
        ("ro.json", "{\n  \"top\": \"T ro\"\n}\n"),
    ])?;

    let output = test.run(&["propagate", "setting.editor.name", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let ro: serde_json::Value = serde_json::from_str(&test.read_file("ro.json")?)?;
    assert_eq!(ro["setting"]["editor"]["name"], "Editor");
    assert_eq!(ro["top"], "T ro");

    Ok(())
}

#[test]
fn test_propagate_skips_reserved_and_broken_files() -> Result<()> {
    let test = project()?;
    let package = "{\n  \"name\": \"app\"\n}\n";
    test.write_file("package.json", package)?;
    test.write_file("fr.json", "{\n  \"a\": \n")?;

    let output = test.run(&["propagate", "b", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("warning: fr.json: skipped:"));
    assert!(output.stdout.contains("  - ro.json"));
    assert_eq!(test.read_file("package.json")?, package);
    assert_eq!(test.read_file("fr.json")?, "{\n  \"a\": \n");

    Ok(())
}

#[test]
fn test_propagate_type_conflict_leaves_file_alone() -> Result<()> {
    let conflicting = "{\n  \"setting\": \"flat\"\n}\n";
    let test = CliTest::with_files(&[
        ("en.json", "{\n  \"setting\": {\n    \"x\": \"X\"\n  }\n}\n"),
        ("ro.json", conflicting),
    ])?;

    let output = test.run(&["propagate", "setting.x", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output
        .stdout
        .contains("warning: ro.json: conflict: 'setting' is not an object"));
    assert_eq!(test.read_file("ro.json")?, conflicting);

    Ok(())
}

#[test]
fn test_propagate_unknown_path_fails() -> Result<()> {
    let test = project()?;

    let output = test.run(&["propagate", "missing"])?;

    assert_eq!(output.code, Some(2));
    assert!(output
        .stderr
        .contains("Error: property 'missing' is not present in the canonical document"));

    Ok(())
}

#[test]
fn test_propagate_without_canonical_file_fails() -> Result<()> {
    let test = CliTest::with_files(&[("ro.json", RO)])?;

    let output = test.run(&["propagate", "a"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("canonical document"));
    assert!(output.stderr.contains("was not found"));

    Ok(())
}

#[test]
fn test_propagate_with_canonical_file_override() -> Result<()> {
    let test = project()?;

    let output = test.run(&["propagate", "a", "--canonical-file", "de.json", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output
        .stdout
        .contains("'a' is already present in every translation file"));

    Ok(())
}
