//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is the single source of truth for the tool catalogue: the
//! rmcp router, the tool listing and direct dispatch are all built from its
//! entries.

use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject, Tool},
};
use tracing::{debug, warn};

use super::definitions::*;
use super::definitions::common::render;
use super::error::ToolError;
use crate::client::FtrackClient;

/// Type-erased tool invocation: decode arguments, run, render.
pub type ToolHandler = Arc<
    dyn Fn(Arc<FtrackClient>, JsonObject) -> BoxFuture<'static, Result<CallToolResult, McpError>>
        + Send
        + Sync,
>;

/// A registered tool: its metadata and its handler.
#[derive(Clone)]
pub struct ToolEntry {
    pub tool: Tool,
    handler: ToolHandler,
}

impl ToolEntry {
    /// Register tool `T`.
    ///
    /// Arguments that do not match `T::Params` are rejected as invalid params
    /// before any request is sent. API failures become error results.
    pub fn of<T: FtrackTool>() -> Self {
        let handler: ToolHandler = Arc::new(|client: Arc<FtrackClient>, args: JsonObject| {
            async move {
                let params: T::Params = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                debug!(tool = T::NAME, "Executing tool");
                Ok(render(T::NAME, T::execute(&client, params).await))
            }
            .boxed()
        });

        Self {
            tool: T::to_tool(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    /// Invoke the tool with raw JSON arguments.
    pub fn call(
        &self,
        client: Arc<FtrackClient>,
        arguments: JsonObject,
    ) -> BoxFuture<'static, Result<CallToolResult, McpError>> {
        (self.handler)(client, arguments)
    }
}

/// Every tool the server exposes, in listing order.
pub fn all_entries() -> Vec<ToolEntry> {
    vec![
        // Queries and schema
        ToolEntry::of::<QueryTool>(),
        ToolEntry::of::<ParseQueryTool>(),
        ToolEntry::of::<QuerySchemasTool>(),
        ToolEntry::of::<QueryServerInformationTool>(),
        ToolEntry::of::<SearchTool>(),
        ToolEntry::of::<GetEntityTool>(),
        // Entity CRUD
        ToolEntry::of::<CreateTool>(),
        ToolEntry::of::<UpdateTool>(),
        ToolEntry::of::<DeleteTool>(),
        ToolEntry::of::<ConvertEntityTool>(),
        ToolEntry::of::<BatchTool>(),
        // Users and security
        ToolEntry::of::<AddUserSecurityRoleTool>(),
        ToolEntry::of::<RemoveUserSecurityRoleTool>(),
        ToolEntry::of::<UpdateUserSecurityRoleTool>(),
        ToolEntry::of::<GrantUserSecurityRoleProjectTool>(),
        ToolEntry::of::<RevokeUserSecurityRoleProjectTool>(),
        ToolEntry::of::<AssumeUserTool>(),
        ToolEntry::of::<UnAssumeUserTool>(),
        ToolEntry::of::<SendUserInviteTool>(),
        ToolEntry::of::<PermissionsTool>(),
        ToolEntry::of::<ResetRemoteTool>(),
        // API keys
        ToolEntry::of::<GrantApiKeyProjectTool>(),
        ToolEntry::of::<RevokeApiKeyProjectTool>(),
        ToolEntry::of::<GrantApiKeySecurityRoleTool>(),
        ToolEntry::of::<RevokeApiKeySecurityRoleTool>(),
        // Two-factor authentication
        ToolEntry::of::<ConfigureOtpTool>(),
        ToolEntry::of::<ConfigureTotpTool>(),
        ToolEntry::of::<GenerateTotpTool>(),
        ToolEntry::of::<Disable2faTool>(),
        // Media and storage
        ToolEntry::of::<GetUploadMetadataTool>(),
        ToolEntry::of::<CompleteMultipartUploadTool>(),
        ToolEntry::of::<GenerateSignedUrlTool>(),
        ToolEntry::of::<EncodeMediaTool>(),
        ToolEntry::of::<StorageUsageTool>(),
        // Reviews and jobs
        ToolEntry::of::<ListReviewSessionsTool>(),
        ToolEntry::of::<SendReviewSessionInviteTool>(),
        ToolEntry::of::<DelayedJobTool>(),
        // Production tracking
        ToolEntry::of::<ListProjectsTool>(),
        ToolEntry::of::<ListTasksTool>(),
        ToolEntry::of::<UpdateTaskStatusTool>(),
        ToolEntry::of::<AssignUserToTaskTool>(),
        ToolEntry::of::<ListUsersTool>(),
        ToolEntry::of::<ListAssetVersionsTool>(),
        ToolEntry::of::<CreateNoteTool>(),
        ToolEntry::of::<ListNotesTool>(),
        // Lookups
        ToolEntry::of::<ListStatusesTool>(),
        ToolEntry::of::<ListTypesTool>(),
        ToolEntry::of::<ListPrioritiesTool>(),
        ToolEntry::of::<ListSecurityRolesTool>(),
    ]
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the tool catalogue bound to one API client.
pub struct ToolRegistry {
    client: Arc<FtrackClient>,
    entries: Vec<ToolEntry>,
}

impl ToolRegistry {
    /// Create a registry holding every tool.
    pub fn new(client: Arc<FtrackClient>) -> Self {
        Self {
            client,
            entries: all_entries(),
        }
    }

    pub fn client(&self) -> &Arc<FtrackClient> {
        &self.client
    }

    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.iter().map(ToolEntry::name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|entry| entry.tool.clone()).collect()
    }

    /// Dispatch a tool call by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let Some(entry) = self.entries.iter().find(|entry| entry.name() == name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        entry
            .call(self.client.clone(), arguments)
            .await
            .map_err(|e| ToolError::invalid_arguments(e.message))
    }
}
