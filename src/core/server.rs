//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol on top of the Tazapay tool set.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`, one module per Tazapay
//! resource. Each tool implements `PaymentTool`, which supplies:
//! - its schema (for rmcp)
//! - `execute()` (the error/panic boundary around `handle()`)
//! - `http_handler()` (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::client::{ApiClient, TazapayClient};
use super::config::Config;
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Tazapay payments server. Tools cover payment links and checkout \
sessions, FX quotes, balances, beneficiaries, payouts, payins, payment attempts and customers. \
Amounts are given and shown in major units (12.34); resource IDs carry their kind prefix \
(bnf_, pot_, pay_, pat_, cus_).";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Every tool
/// shares the same backend client.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Backend client shared by all tools.
    client: Arc<dyn ApiClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured Tazapay API.
    ///
    /// Fails when the API credentials are missing.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let client = TazapayClient::from_config(&config.tazapay)?;
        info!(base_url = client.base_url(), "Tazapay client ready");
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a server on top of an existing backend client.
    pub fn with_client(config: Config, client: Arc<dyn ApiClient>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config: Arc::new(config),
            client,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Server instructions sent to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// This method uses the ToolRegistry to dispatch to the appropriate
    /// tool's http_handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.client.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
