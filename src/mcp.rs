use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::commands::select::{select, SelectOptions, SelectReport};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExpandPagesRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(
        description = "Pages expression, 1-based (e.g., '1,3,5-9', '9-53:4', '53..9..-4', 'range(9,53,4)')"
    )]
    pub pages: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSelectPagesRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(
        description = "Pages expression, 1-based (e.g., '1,3,5-9', '9-53:4', '53..9..-4', 'range(9,53,4)')"
    )]
    pub pages: String,
    #[schemars(description = "Output file path (default: <input>.selected.pdf, numbered if taken)")]
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Expand a pages expression against a PDF and return the 1-based page numbers it selects, without writing anything")]
    fn pdf_expand_pages(&self, Parameters(req): Parameters<PdfExpandPagesRequest>) -> String {
        let options = SelectOptions {
            pages: req.pages,
            output: None,
            print_only: true,
        };

        match select(&req.path, &options, |_| {}) {
            Ok(report) => {
                let result = ExpandResult {
                    path: req.path,
                    page_count: report.page_count,
                    pages: report.selection.page_numbers(),
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {:#}", e),
        }
    }

    #[tool(description = "Write the pages selected by a pages expression, in that order and including repeats, to a new PDF")]
    fn pdf_select_pages(&self, Parameters(req): Parameters<PdfSelectPagesRequest>) -> String {
        let options = SelectOptions {
            pages: req.pages,
            output: req.output.map(PathBuf::from),
            print_only: false,
        };

        match select(&req.path, &options, |_| {}) {
            Ok(SelectReport {
                selection,
                output: Some(output),
                ..
            }) => {
                let pages = selection.page_numbers();
                let result = SelectResult {
                    output_path: output.display().to_string(),
                    page_count: pages.len() as u32,
                    pages,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Ok(_) => "Error: no output was written".to_string(),
            Err(e) => format!("Error: {:#}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExpandResult {
    pub path: String,
    /// Pages in the source document
    pub page_count: u32,
    pub pages: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SelectResult {
    pub output_path: String,
    /// Pages in the written document
    pub page_count: u32,
    pub pages: Vec<u32>,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page selection tools. Use pdf_expand_pages to preview which pages a pages \
                 expression selects, and pdf_select_pages to write them, in order and with \
                 repeats, to a new PDF."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
