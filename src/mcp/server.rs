use std::path::PathBuf;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::{CommonArgs, commands::helper::open_session},
    core::{
        LoggingProgress, PropertyPath, Session, SyncError, TranslationDocument, path::leaf_value,
    },
};

use super::types::{
    CandidateCheckResult, CheckVariablesParams, DocumentInfo, DocumentValue, DocumentsResult,
    GetValueParams, GetValueResult, ListDocumentsParams, Pagination, ParseErrorItem,
    ProjectParams, PropertyTarget, SyncPropertyParams, SyncResult, VariableMismatchItem,
    VariablesScanResult,
};

#[derive(Clone)]
pub struct LocsyncMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LocsyncMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LocsyncMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// List the translation files of a project
    #[tool(
        description = "List the translation files next to the canonical file, with their locales. Use this first to see which files the other tools will touch."
    )]
    pub async fn list_documents(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = session_for(&params.0.project)?;
        let documents = session.translation_documents(true).map_err(engine_error)?;
        let canonical_file = session.settings().canonical_file.clone();

        let result = DocumentsResult {
            translations_dir: session.root().to_string_lossy().to_string(),
            is_localization_workspace: session.is_localization_workspace(),
            documents: documents
                .into_iter()
                .map(|d| DocumentInfo {
                    is_canonical: d.name == canonical_file,
                    file_path: d.path.to_string_lossy().to_string(),
                    name: d.name,
                    locale: d.locale,
                })
                .collect(),
            canonical_file,
        };

        json_result(&result)
    }

    /// Look up the translations of one property
    #[tool(
        description = "Get the value of a dotted property path in every translation file, or in one file chosen by file name or locale. Fails with an explicit error when the chosen file lacks the property."
    )]
    pub async fn get_value(
        &self,
        params: Parameters<GetValueParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let session = session_for(&params.project)?;
        let path = PropertyPath::parse(&params.path).map_err(invalid_params)?;

        let canonical = session
            .load_canonical()
            .ok()
            .and_then(|doc| leaf_value(&doc, &path).map(str::to_string));

        let values = match &params.locale {
            Some(document) => {
                let value = session
                    .lookup_translation(&path, document)
                    .map_err(invalid_params)?;
                vec![DocumentValue {
                    document: document.clone(),
                    value: Some(value),
                }]
            }
            None => session
                .lookup_everywhere(&path)
                .map_err(engine_error)?
                .into_iter()
                .map(|(document, value)| DocumentValue {
                    document: document.name,
                    value,
                })
                .collect(),
        };

        json_result(&GetValueResult {
            path: path.to_string(),
            canonical,
            values,
        })
    }

    /// Insert a canonical property into every other translation file
    #[tool(
        description = "Insert the canonical string property at a dotted path (or at a line/column of the canonical file) into every other translation file that lacks it, creating intermediate objects and keeping the canonical ordering. Dry run unless apply is true."
    )]
    pub async fn propagate_property(
        &self,
        params: Parameters<SyncPropertyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let session = session_for(&params.project)?;
        let path = target_path(&session, &params.target)?;

        let report = session
            .propagate(&path, params.apply, &LoggingProgress::default())
            .map_err(engine_error)?;

        json_result(&SyncResult::from(&report))
    }

    /// Delete a property from every translation file
    #[tool(
        description = "Delete a string property at a dotted path (or at a line/column of the canonical file) from every translation file, the canonical one included. Dry run unless apply is true."
    )]
    pub async fn prune_property(
        &self,
        params: Parameters<SyncPropertyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut session = session_for(&params.project)?;
        let path = target_path(&session, &params.target)?;

        let report = session
            .prune(&path, params.apply, &LoggingProgress::default())
            .map_err(engine_error)?;

        json_result(&SyncResult::from(&report))
    }

    /// Check {{placeholder}} consistency
    #[tool(
        description = "Check that translations use the same {{placeholder}} variables as the canonical values. With path and value, checks that one candidate; otherwise scans every translation file (paginated)."
    )]
    pub async fn check_variables(
        &self,
        params: Parameters<CheckVariablesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let session = session_for(&params.project)?;

        if let (Some(path), Some(value)) = (&params.path, &params.value) {
            let path = PropertyPath::parse(path).map_err(invalid_params)?.to_string();
            let result = match session.check_consistency(&path, value) {
                Some(report) => CandidateCheckResult {
                    checked: true,
                    consistent: report.is_consistent(),
                    expected: report.expected.into_iter().collect(),
                    missing: report.missing.into_iter().collect(),
                    invalid: report.invalid.into_iter().collect(),
                    path,
                },
                None => CandidateCheckResult {
                    path,
                    checked: false,
                    consistent: true,
                    expected: Vec::new(),
                    missing: Vec::new(),
                    invalid: Vec::new(),
                },
            };
            return json_result(&result);
        }

        let limit = params.limit.map(|v| v as usize).unwrap_or(20).min(100);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let documents = session.translation_documents(false).map_err(engine_error)?;
        let (all_items, parse_errors) = scan_variables(&session, &documents);

        let total_count = all_items.len();
        let items: Vec<VariableMismatchItem> =
            all_items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        json_result(&VariablesScanResult {
            total_count,
            files_checked: documents.len(),
            items,
            parse_errors,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }
}

fn scan_variables(
    session: &Session,
    documents: &[TranslationDocument],
) -> (Vec<VariableMismatchItem>, Vec<ParseErrorItem>) {
    let mut items = Vec::new();
    let mut parse_errors = Vec::new();

    for document in documents {
        let file_path = document.path.to_string_lossy().to_string();
        match session.check_document(document) {
            Ok(findings) => {
                items.extend(findings.into_iter().map(|f| VariableMismatchItem {
                    file_path: file_path.clone(),
                    line: f.line,
                    column: f.column,
                    path: f.path,
                    value: f.value,
                    missing: f.report.missing.into_iter().collect(),
                    invalid: f.report.invalid.into_iter().collect(),
                    expected: f.report.expected.into_iter().collect(),
                }));
            }
            Err(error) => parse_errors.push(ParseErrorItem {
                file_path,
                error: error.to_string(),
            }),
        }
    }

    (items, parse_errors)
}

fn session_for(project: &ProjectParams) -> Result<Session, McpError> {
    let common = CommonArgs {
        root: Some(PathBuf::from(&project.project_root_path)),
        canonical_file: project.canonical_file.clone(),
        verbose: false,
    };
    open_session(&common)
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))
}

fn target_path(session: &Session, target: &PropertyTarget) -> Result<PropertyPath, McpError> {
    match (&target.path, target.line, target.column) {
        (Some(raw), _, _) => PropertyPath::parse(raw).map_err(invalid_params),
        (None, Some(line), Some(column)) => session
            .resolve_path_at(line as usize, column as usize)
            .map_err(invalid_params),
        _ => Err(McpError::invalid_params(
            "either path or both line and column are required",
            None,
        )),
    }
}

fn invalid_params(error: SyncError) -> McpError {
    McpError::invalid_params(error.to_string(), None)
}

fn engine_error(error: SyncError) -> McpError {
    McpError::internal_error(error.to_string(), None)
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for LocsyncMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "locsync keeps JSON translation files structurally in sync with a canonical locale file.\n\n\
                 Available tools:\n\
                 1. list_documents - List translation files and the canonical file\n\
                 2. get_value - Get the translations of a dotted property path\n\
                 3. propagate_property - Insert a canonical property into every other translation file\n\
                 4. prune_property - Delete a property from every translation file\n\
                 5. check_variables - Check {{placeholder}} consistency against the canonical values\n\n\
                 propagate_property and prune_property are dry runs unless apply is true.\n\
                 Run them without apply first and review the outcomes."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LocsyncMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
