use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::context::AppContext;
use crate::error::AppError;
use crate::workflow::production_changes::{
    DEFAULT_BRANCH, ProductionChangesRequest, production_changes,
};

pub const PRODUCTION_CHANGES_TOOL: &str = "get_production_changes";

#[derive(Debug, Deserialize)]
struct ProductionChangesArgs {
    repository: String,
    #[serde(default)]
    production_branch: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl From<ProductionChangesArgs> for ProductionChangesRequest {
    fn from(args: ProductionChangesArgs) -> Self {
        Self {
            repository: args.repository,
            branch: args.production_branch,
            date: args.date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    MethodNotFound,
    InvalidParams,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

/// Either the report text or a single error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolResult {
    Content { content: Vec<TextContent> },
    Error { error: ToolError },
}

impl ToolResult {
    fn text(text: String) -> Self {
        ToolResult::Content {
            content: vec![TextContent {
                content_type: "text",
                text,
            }],
        }
    }

    fn error(code: ErrorCode, message: String) -> Self {
        ToolResult::Error {
            error: ToolError { code, message },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolResult::Error { .. })
    }
}

impl From<AppError> for ToolResult {
    fn from(err: AppError) -> Self {
        match err {
            AppError::UnknownTool(name) => {
                ToolResult::error(ErrorCode::MethodNotFound, format!("Unknown tool: {name}"))
            }
            AppError::InvalidArguments(message) => {
                ToolResult::error(ErrorCode::InvalidParams, message)
            }
            other => ToolResult::error(
                ErrorCode::InternalError,
                format!("Error processing changes: {other}"),
            ),
        }
    }
}

pub fn tool_catalog() -> Value {
    json!({
        "tools": [{
            "name": PRODUCTION_CHANGES_TOOL,
            "description": "Get a summary of changes pushed to production for a specific date",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "repository": {
                        "type": "string",
                        "description": "Repository name in owner/repo format"
                    },
                    "production_branch": {
                        "type": "string",
                        "description": "Name of the production branch (e.g., main, master, production)",
                        "default": DEFAULT_BRANCH
                    },
                    "date": {
                        "type": "string",
                        "description": "Date to check commits for (YYYY-MM-DD format). Defaults to today.",
                        "pattern": r"^\d{4}-\d{2}-\d{2}$"
                    }
                },
                "required": ["repository"]
            }
        }]
    })
}

/// Dispatches a tool invocation by name. `arguments` is the raw JSON object text and is
/// only parsed once the name is known.
pub async fn call_tool(ctx: &AppContext, name: &str, arguments: &str) -> ToolResult {
    if name != PRODUCTION_CHANGES_TOOL {
        warn!(tool = name, "rejected unknown tool");
        return AppError::UnknownTool(name.to_string()).into();
    }

    let args: ProductionChangesArgs = match serde_json::from_str(arguments) {
        Ok(args) => args,
        Err(err) => {
            return AppError::InvalidArguments(format!("invalid tool arguments: {err}")).into();
        }
    };

    match production_changes(ctx, args.into()).await {
        Ok(report) => ToolResult::text(report),
        Err(err) => {
            warn!(tool = name, error = %err, "tool call failed");
            err.into()
        }
    }
}
