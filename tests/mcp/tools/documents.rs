use locsync::mcp::{LocsyncMcpServer, types::ListDocumentsParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json, fixture_multi_locale};

#[tokio::test]
async fn test_list_documents() {
    let fixture = fixture_multi_locale().unwrap();
    fixture
        .write_document("package", "{\n  \"name\": \"app\"\n}\n")
        .unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ListDocumentsParams {
        project: fixture.project(),
    });
    let result = server.list_documents(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["canonicalFile"], "en.json");
    assert_eq!(json_result["isLocalizationWorkspace"], true);

    let documents = json_result["documents"].as_array().unwrap();
    let names: Vec<&str> = documents
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["en.json", "ja.json", "ro.json"]);
    assert_eq!(documents[0]["isCanonical"], true);
    assert_eq!(documents[1]["locale"], "ja");
    assert_eq!(documents[2]["isCanonical"], false);
}

#[tokio::test]
async fn test_list_documents_with_config() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "translationsRoot": "./locales",
            "canonicalFile": "de.json"
        }))
        .unwrap();
    let locales = fixture.root_path().join("locales");
    std::fs::create_dir_all(&locales).unwrap();
    std::fs::write(locales.join("de.json"), "{}\n").unwrap();
    std::fs::write(locales.join("fr.json"), "{}\n").unwrap();

    let server = LocsyncMcpServer::new();
    let params = Parameters(ListDocumentsParams {
        project: fixture.project(),
    });
    let result = server.list_documents(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["canonicalFile"], "de.json");
    assert!(
        json_result["translationsDir"]
            .as_str()
            .unwrap()
            .ends_with("locales")
    );
    assert_eq!(json_result["documents"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_documents_missing_directory_fails() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "translationsRoot": "./nowhere" }))
        .unwrap();

    let server = LocsyncMcpServer::new();
    let params = Parameters(ListDocumentsParams {
        project: fixture.project(),
    });

    assert!(server.list_documents(params).await.is_err());
}
