//! Infrastructure shared by every tool: configuration, the Tazapay API client,
//! the MCP server and its transports.

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use client::{ApiClient, ApiError, JsonObject, TazapayClient};
pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
