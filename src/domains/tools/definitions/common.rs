//! Common pieces shared by every ftrack tool.
//!
//! A tool is a unit struct implementing [`FtrackTool`]: a name, a description,
//! a typed parameter struct (its JSON schema is the tool's input contract) and
//! an `execute` function that calls the ftrack client. Rendering the outcome
//! into a `CallToolResult` happens here, once, for all tools.

use async_trait::async_trait;
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::client::FtrackClient;
use crate::domains::tools::error::ToolResult;

/// A named tool backed by the ftrack client.
#[async_trait]
pub trait FtrackTool: 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments; their schema is published as the input schema.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Run the tool against the API and return the raw result payload.
    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value>;

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
}

/// Arguments of tools that take none.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Default limit for list tools over large entity sets.
pub fn default_limit() -> u32 {
    100
}

/// Default limit for list tools over versions, notes and reviews.
pub fn default_short_limit() -> u32 {
    50
}

/// Render a tool outcome: pretty JSON on success, `Error: ...` text otherwise.
pub fn render(tool: &str, result: ToolResult<Value>) -> CallToolResult {
    let text = result.and_then(|value| serde_json::to_string_pretty(&value).map_err(Into::into));
    match text {
        Ok(text) => success_result(text),
        Err(e) => error_result(&format!("Error: {}", e), tool),
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str, tool: &str) -> CallToolResult {
    warn!(tool, "{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::client::tests::{echo_server, test_config};
    use crate::domains::tools::ToolError;
    use rmcp::model::RawContent;
    use serde_json::json;
    use wiremock::MockServer;

    /// A client wired to a server that echoes each operation back as `{"content": op}`.
    ///
    /// The mock server must outlive the client calls.
    pub(crate) async fn echo_client() -> (MockServer, FtrackClient) {
        let server = echo_server().await;
        let client = FtrackClient::new(test_config(&server.uri()));
        (server, client)
    }

    /// Run a tool and return the operation the server received.
    pub(crate) async fn sent_operation<T: FtrackTool>(params: T::Params) -> Value {
        let (_server, client) = echo_client().await;
        let result = T::execute(&client, params).await.unwrap();
        result["content"].clone()
    }

    pub(crate) fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_render_success_is_pretty_json() {
        let result = render("query", Ok(json!({"data": [{"id": "1"}]})));
        assert_eq!(result.is_error, Some(false));
        let text = text_of(&result);
        assert!(text.contains('\n'));
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), json!({"data": [{"id": "1"}]}));
    }

    #[test]
    fn test_render_failure_is_flagged_text() {
        let result = render("query", Err(ToolError::invalid_arguments("bad entity type")));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Invalid arguments: bad entity type");
    }

    #[test]
    fn test_no_params_accepts_empty_object() {
        let params: NoParams = serde_json::from_value(json!({})).unwrap();
        let _ = params;
    }
}
