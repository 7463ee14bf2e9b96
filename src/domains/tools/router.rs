//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; they all share one backend
//! client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::client::ApiClient;

use super::PaymentTool;
use super::definitions::{
    CancelPayinTool, ConfirmPayinTool, CreateBeneficiaryTool, CreateCustomerTool,
    CreatePayinTool, CreatePayoutTool, ExpireCheckoutTool, FetchBalanceTool, FetchCheckoutTool,
    FetchCustomerTool, FetchFxTool, FundPayoutTool, GetBeneficiaryTool, GetPayinTool,
    GetPaymentAttemptTool, GetPayoutTool, PaymentLinkTool, UpdateBeneficiaryTool, UpdatePayinTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<dyn ApiClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(FetchFxTool::create_route(client.clone()))
        .with_route(FetchBalanceTool::create_route(client.clone()))
        .with_route(CreateBeneficiaryTool::create_route(client.clone()))
        .with_route(GetBeneficiaryTool::create_route(client.clone()))
        .with_route(UpdateBeneficiaryTool::create_route(client.clone()))
        .with_route(CreatePayoutTool::create_route(client.clone()))
        .with_route(GetPayoutTool::create_route(client.clone()))
        .with_route(FundPayoutTool::create_route(client.clone()))
        .with_route(CreatePayinTool::create_route(client.clone()))
        .with_route(GetPayinTool::create_route(client.clone()))
        .with_route(UpdatePayinTool::create_route(client.clone()))
        .with_route(CancelPayinTool::create_route(client.clone()))
        .with_route(ConfirmPayinTool::create_route(client.clone()))
        .with_route(PaymentLinkTool::create_route(client.clone()))
        .with_route(FetchCheckoutTool::create_route(client.clone()))
        .with_route(ExpireCheckoutTool::create_route(client.clone()))
        .with_route(GetPaymentAttemptTool::create_route(client.clone()))
        .with_route(CreateCustomerTool::create_route(client.clone()))
        .with_route(FetchCustomerTool::create_route(client))
}
