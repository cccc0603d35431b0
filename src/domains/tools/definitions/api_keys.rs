//! API key scoping tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::FtrackTool;
use crate::client::FtrackClient;
use crate::domains::tools::error::ToolResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApiKeyProjectParams {
    /// API key id.
    pub api_key_id: String,

    /// Project id.
    pub project_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApiKeyRoleParams {
    /// API key id.
    pub api_key_id: String,

    /// Security role id.
    pub role_id: String,
}

pub struct GrantApiKeyProjectTool;

#[async_trait]
impl FtrackTool for GrantApiKeyProjectTool {
    const NAME: &'static str = "grant_api_key_project";
    const DESCRIPTION: &'static str = "Allow an API key to access a project.";
    type Params = ApiKeyProjectParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .grant_api_key_project(params.api_key_id, params.project_id)
            .await?)
    }
}

pub struct RevokeApiKeyProjectTool;

#[async_trait]
impl FtrackTool for RevokeApiKeyProjectTool {
    const NAME: &'static str = "revoke_api_key_project";
    const DESCRIPTION: &'static str = "Remove an API key's access to a project.";
    type Params = ApiKeyProjectParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .revoke_api_key_project(params.api_key_id, params.project_id)
            .await?)
    }
}

pub struct GrantApiKeySecurityRoleTool;

#[async_trait]
impl FtrackTool for GrantApiKeySecurityRoleTool {
    const NAME: &'static str = "grant_api_key_security_role";
    const DESCRIPTION: &'static str = "Give an API key a security role.";
    type Params = ApiKeyRoleParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .grant_api_key_security_role(params.api_key_id, params.role_id)
            .await?)
    }
}

pub struct RevokeApiKeySecurityRoleTool;

#[async_trait]
impl FtrackTool for RevokeApiKeySecurityRoleTool {
    const NAME: &'static str = "revoke_api_key_security_role";
    const DESCRIPTION: &'static str = "Remove a security role from an API key.";
    type Params = ApiKeyRoleParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .revoke_api_key_security_role(params.api_key_id, params.role_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::sent_operation;
    use serde_json::json;

    #[tokio::test]
    async fn test_revoke_api_key_security_role() {
        let op = sent_operation::<RevokeApiKeySecurityRoleTool>(ApiKeyRoleParams {
            api_key_id: "k1".into(),
            role_id: "r1".into(),
        })
        .await;
        assert_eq!(
            op,
            json!({"action": "revoke_api_key_security_role", "api_key_id": "k1", "role_id": "r1"})
        );
    }
}
