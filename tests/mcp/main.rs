use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use locsync::mcp::types::ProjectParams;
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary project whose translation files sit at its root.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with translation files, given as raw text so
    /// that formatting assertions see exactly what was written.
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_documents(&[
    ///     ("en", "{\n  \"key\": \"value\"\n}\n"),
    ///     ("ro", "{}\n"),
    /// ])?;
    /// ```
    pub fn with_documents(locales: &[(&str, &str)]) -> Result<Self> {
        let fixture = Self::new()?;
        for (locale, content) in locales {
            fixture.write_document(locale, content)?;
        }
        Ok(fixture)
    }

    /// Write a translation file to <root>/<locale>.json
    pub fn write_document(&self, locale: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(format!("{}.json", locale));
        fs::write(&path, content)
            .with_context(|| format!("Failed to write translation file: {}", path.display()))?;
        Ok(())
    }

    /// Read a translation file as text
    pub fn read_document(&self, locale: &str) -> Result<String> {
        let path = self.project_root.join(format!("{}.json", locale));
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read translation file: {}", path.display()))
    }

    /// Read a translation file as JSON
    pub fn read_document_json(&self, locale: &str) -> Result<Value> {
        let content = self.read_document(locale)?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}.json", locale))
    }

    /// Write a .locsyncrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".locsyncrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Project parameters shared by every tool
    pub fn project(&self) -> ProjectParams {
        ProjectParams {
            project_root_path: self.root(),
            canonical_file: None,
        }
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// Canonical file with a nested object and placeholders, plus two translations.
pub fn fixture_multi_locale() -> Result<McpTestFixture> {
    McpTestFixture::with_documents(&[
        (
            "en",
            "{\n  \"title\": \"Hello {{name}}\",\n  \"common\": {\n    \"submit\": \"Submit\",\n    \"cancel\": \"Cancel\"\n  }\n}\n",
        ),
        (
            "ro",
            "{\n  \"title\": \"Salut {{name}}\",\n  \"common\": {\n    \"submit\": \"Trimite\"\n  }\n}\n",
        ),
        (
            "ja",
            "{\n  \"title\": \"こんにちは {{nom}}\",\n  \"common\": {\n    \"submit\": \"送信\",\n    \"cancel\": \"キャンセル\"\n  }\n}\n",
        ),
    ])
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    // Check for errors using is_error field
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    // Extract text from the content
    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
