//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::client::ApiClient;

use super::PaymentTool;
use super::definitions::{
    CancelPayinTool, ConfirmPayinTool, CreateBeneficiaryTool, CreateCustomerTool,
    CreatePayinTool, CreatePayoutTool, ExpireCheckoutTool, FetchBalanceTool, FetchCheckoutTool,
    FetchCustomerTool, FetchFxTool, FundPayoutTool, GetBeneficiaryTool, GetPayinTool,
    GetPaymentAttemptTool, GetPayoutTool, PaymentLinkTool, UpdateBeneficiaryTool, UpdatePayinTool,
};

/// Tool registry - manages all available tools.
///
/// Holds the backend client every tool call goes through.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    client: Arc<dyn ApiClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            FetchFxTool::NAME,
            FetchBalanceTool::NAME,
            CreateBeneficiaryTool::NAME,
            GetBeneficiaryTool::NAME,
            UpdateBeneficiaryTool::NAME,
            CreatePayoutTool::NAME,
            GetPayoutTool::NAME,
            FundPayoutTool::NAME,
            CreatePayinTool::NAME,
            GetPayinTool::NAME,
            UpdatePayinTool::NAME,
            CancelPayinTool::NAME,
            ConfirmPayinTool::NAME,
            PaymentLinkTool::NAME,
            FetchCheckoutTool::NAME,
            ExpireCheckoutTool::NAME,
            GetPaymentAttemptTool::NAME,
            CreateCustomerTool::NAME,
            FetchCustomerTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            FetchFxTool::to_tool(),
            FetchBalanceTool::to_tool(),
            CreateBeneficiaryTool::to_tool(),
            GetBeneficiaryTool::to_tool(),
            UpdateBeneficiaryTool::to_tool(),
            CreatePayoutTool::to_tool(),
            GetPayoutTool::to_tool(),
            FundPayoutTool::to_tool(),
            CreatePayinTool::to_tool(),
            GetPayinTool::to_tool(),
            UpdatePayinTool::to_tool(),
            CancelPayinTool::to_tool(),
            ConfirmPayinTool::to_tool(),
            PaymentLinkTool::to_tool(),
            FetchCheckoutTool::to_tool(),
            ExpireCheckoutTool::to_tool(),
            GetPaymentAttemptTool::to_tool(),
            CreateCustomerTool::to_tool(),
            FetchCustomerTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let client = self.client.clone();
        match name {
            FetchFxTool::NAME => FetchFxTool::http_handler(client, arguments).await,
            FetchBalanceTool::NAME => FetchBalanceTool::http_handler(client, arguments).await,
            CreateBeneficiaryTool::NAME => {
                CreateBeneficiaryTool::http_handler(client, arguments).await
            }
            GetBeneficiaryTool::NAME => GetBeneficiaryTool::http_handler(client, arguments).await,
            UpdateBeneficiaryTool::NAME => {
                UpdateBeneficiaryTool::http_handler(client, arguments).await
            }
            CreatePayoutTool::NAME => CreatePayoutTool::http_handler(client, arguments).await,
            GetPayoutTool::NAME => GetPayoutTool::http_handler(client, arguments).await,
            FundPayoutTool::NAME => FundPayoutTool::http_handler(client, arguments).await,
            CreatePayinTool::NAME => CreatePayinTool::http_handler(client, arguments).await,
            GetPayinTool::NAME => GetPayinTool::http_handler(client, arguments).await,
            UpdatePayinTool::NAME => UpdatePayinTool::http_handler(client, arguments).await,
            CancelPayinTool::NAME => CancelPayinTool::http_handler(client, arguments).await,
            ConfirmPayinTool::NAME => ConfirmPayinTool::http_handler(client, arguments).await,
            PaymentLinkTool::NAME => PaymentLinkTool::http_handler(client, arguments).await,
            FetchCheckoutTool::NAME => FetchCheckoutTool::http_handler(client, arguments).await,
            ExpireCheckoutTool::NAME => ExpireCheckoutTool::http_handler(client, arguments).await,
            GetPaymentAttemptTool::NAME => {
                GetPaymentAttemptTool::http_handler(client, arguments).await
            }
            CreateCustomerTool::NAME => CreateCustomerTool::http_handler(client, arguments).await,
            FetchCustomerTool::NAME => FetchCustomerTool::http_handler(client, arguments).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::RecordingClient;

    fn test_client() -> Arc<dyn ApiClient> {
        Arc::new(RecordingClient::responding(serde_json::json!({
            "data": { "available": [{ "currency": "USD", "amount": 1250 }] }
        })))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_client());
        let names = registry.tool_names();
        assert_eq!(names.len(), 19);
        assert!(names.contains(&"tazapay_fetch_fx_tool"));
        assert!(names.contains(&"tazapay_fetch_balance_tool"));
        assert!(names.contains(&"create_beneficiary_tool"));
        assert!(names.contains(&"create_payout_tool"));
        assert!(names.contains(&"confirm_payin_tool"));
        assert!(names.contains(&"generate_payment_link_tool"));
        assert!(names.contains(&"get_payment_attempt_tool"));
        assert!(names.contains(&"tazapay_fetch_customer_tool"));
    }

    #[test]
    fn test_all_tools_have_object_schemas() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 19);
        for tool in tools {
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{} schema is not an object",
                tool.name
            );
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_balance() {
        let registry = ToolRegistry::new(test_client());
        let result = registry
            .call_tool("tazapay_fetch_balance_tool", serde_json::json!({ "currency": "usd" }))
            .await
            .unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "USD balance: 12.50");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_client());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(result.is_err());
    }
}
