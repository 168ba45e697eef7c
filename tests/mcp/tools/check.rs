use locsync::mcp::{LocsyncMcpServer, types::CheckVariablesParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json, fixture_multi_locale};

fn params(
    fixture: &McpTestFixture,
    path: Option<&str>,
    value: Option<&str>,
) -> Parameters<CheckVariablesParams> {
    Parameters(CheckVariablesParams {
        project: fixture.project(),
        path: path.map(str::to_string),
        value: value.map(str::to_string),
        limit: None,
        offset: None,
    })
}

#[tokio::test]
async fn test_check_candidate_value() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocsyncMcpServer::new();

    let result = server
        .check_variables(params(&fixture, Some("title"), Some("Bonjour {{nom}}")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result,
        json!({
            "path": "title",
            "checked": true,
            "consistent": false,
            "expected": ["name"],
            "missing": ["name"],
            "invalid": ["nom"]
        })
    );
}

#[tokio::test]
async fn test_check_candidate_too_short() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocsyncMcpServer::new();

    let result = server
        .check_variables(params(&fixture, Some("title"), Some("Hi")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["checked"], false);
    assert_eq!(json_result["consistent"], true);
}

#[tokio::test]
async fn test_scan_all_documents() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocsyncMcpServer::new();

    let result = server
        .check_variables(params(&fixture, None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["filesChecked"], 2);

    let item = &json_result["items"][0];
    assert!(item["filePath"].as_str().unwrap().ends_with("ja.json"));
    assert_eq!(item["path"], "title");
    assert_eq!(item["line"], 2);
    assert_eq!(item["column"], 12);
    assert_eq!(item["missing"], json!(["name"]));
    assert_eq!(item["invalid"], json!(["nom"]));
    assert_eq!(json_result["pagination"]["hasMore"], false);
}

#[tokio::test]
async fn test_scan_pagination() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocsyncMcpServer::new();

    let mut first_page = params(&fixture, None, None);
    first_page.0.limit = Some(0);
    let result = server.check_variables(first_page).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"], json!([]));
    assert_eq!(json_result["pagination"]["hasMore"], true);
}
