//! Tool handler trait.
//!
//! Every Tazapay operation implements [`PaymentTool`]: it names itself,
//! publishes a parameter schema and turns an argument map into result text.
//! The provided methods wrap that core into what each transport needs, so an
//! operation file only contains its own validation, request and formatting.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span, warn};

use super::ToolError;
use super::definitions::common::args::arguments_object;
use crate::core::client::{ApiClient, JsonObject};

/// A single Tazapay operation exposed as an MCP tool.
pub trait PaymentTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Parameter type the input schema is generated from.
    type Params: JsonSchema + 'static;

    /// Validate `args`, perform the one API call and render the result.
    fn handle<'a>(
        client: &'a dyn ApiClient,
        args: &'a JsonObject,
    ) -> BoxFuture<'a, Result<String, ToolError>>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Run the handler behind the per-call error boundary.
    ///
    /// Tool errors become an error result carrying the message. A panic in the
    /// handler is reported as an internal error and does not escape the call.
    fn execute<'a>(client: &'a dyn ApiClient, args: &'a JsonObject) -> BoxFuture<'a, CallToolResult> {
        async move {
            info!("Handling tool call");
            match AssertUnwindSafe(Self::handle(client, args))
                .catch_unwind()
                .await
            {
                Ok(Ok(text)) => {
                    info!("Tool call succeeded");
                    CallToolResult::success(vec![Content::text(text)])
                }
                Ok(Err(err)) => {
                    if err.is_local() {
                        warn!(error = %err, "Tool call rejected");
                    } else {
                        error!(error = %err, "Tool call failed");
                    }
                    CallToolResult::error(vec![Content::text(err.to_string())])
                }
                Err(_) => {
                    let err = ToolError::internal("tool handler panicked");
                    error!(error = %err, "Tool call aborted");
                    CallToolResult::error(vec![Content::text(err.to_string())])
                }
            }
        }
        .instrument(info_span!("tool_call", tool = Self::NAME))
        .boxed()
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    ///
    /// The call is raced against the request's cancellation token; dropping the
    /// handler future aborts any in-flight HTTP request.
    fn create_route<S>(client: Arc<dyn ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let client = client.clone();
            let args = ctx.arguments.clone().unwrap_or_default();
            let ct = ctx.request_context.ct.clone();
            async move {
                run_until_cancelled(Self::NAME, Self::execute(client.as_ref(), &args), ct).await
            }
            .boxed()
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    fn http_handler(
        client: Arc<dyn ApiClient>,
        arguments: Value,
    ) -> BoxFuture<'static, Result<Value, String>> {
        async move {
            let args = arguments_object(arguments).map_err(|e| e.to_string())?;
            let result = Self::execute(client.as_ref(), &args).await;
            Ok(serde_json::json!({
                "content": result.content,
                "isError": result.is_error.unwrap_or(false)
            }))
        }
        .boxed()
    }
}

/// Drive a tool call until it completes or `ct` fires. On cancellation the
/// call future is dropped, which aborts its in-flight request.
pub(crate) async fn run_until_cancelled<F>(
    tool: &'static str,
    call: F,
    ct: CancellationToken,
) -> Result<CallToolResult, McpError>
where
    F: Future<Output = CallToolResult>,
{
    tokio::select! {
        result = call => Ok(result),
        _ = ct.cancelled() => {
            warn!(tool, "Tool call cancelled by client");
            Err(McpError::internal_error("request cancelled", None))
        }
    }
}
