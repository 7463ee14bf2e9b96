//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - One module per Tazapay resource, one file per tool
//! - `handlers.rs` - The `PaymentTool` trait and its per-call error boundary
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a file under the resource's module in `definitions/`
//! 2. Define the params struct and implement `PaymentTool::handle`
//! 3. Export it in `definitions/mod.rs`
//! 4. Add its route in `router.rs` and its entry in `registry.rs`

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
