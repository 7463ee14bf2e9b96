//! Business logic exposed over MCP. Only tools are served.

pub mod tools;
