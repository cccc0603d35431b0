//! User administration tools: security roles, impersonation, invites,
//! permission lookups and credential resets.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::{FtrackTool, NoParams};
use crate::client::{FtrackClient, ResetType};
use crate::domains::tools::error::ToolResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserRoleParams {
    /// User id.
    pub user_id: String,

    /// Security role id.
    pub role_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateUserRoleParams {
    /// User id.
    pub user_id: String,

    /// Security role id.
    pub role_id: String,

    /// Apply the role to all projects.
    #[serde(default)]
    pub is_all_projects: Option<bool>,

    /// Apply the role to all open projects.
    #[serde(default)]
    pub is_all_open_projects: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserRoleProjectParams {
    /// User id.
    pub user_id: String,

    /// Security role id.
    pub role_id: String,

    /// Project id.
    pub project_id: String,
}

pub struct AddUserSecurityRoleTool;

#[async_trait]
impl FtrackTool for AddUserSecurityRoleTool {
    const NAME: &'static str = "add_user_security_role";
    const DESCRIPTION: &'static str = "Give a user a security role.";
    type Params = UserRoleParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .add_user_security_role(params.user_id, params.role_id)
            .await?)
    }
}

pub struct RemoveUserSecurityRoleTool;

#[async_trait]
impl FtrackTool for RemoveUserSecurityRoleTool {
    const NAME: &'static str = "remove_user_security_role";
    const DESCRIPTION: &'static str = "Remove a security role from a user.";
    type Params = UserRoleParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .remove_user_security_role(params.user_id, params.role_id)
            .await?)
    }
}

pub struct UpdateUserSecurityRoleTool;

#[async_trait]
impl FtrackTool for UpdateUserSecurityRoleTool {
    const NAME: &'static str = "update_user_security_role";
    const DESCRIPTION: &'static str =
        "Change the project scope of a security role a user already has (all projects / all open projects).";
    type Params = UpdateUserRoleParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .update_user_security_role(
                params.user_id,
                params.role_id,
                params.is_all_projects,
                params.is_all_open_projects,
            )
            .await?)
    }
}

pub struct GrantUserSecurityRoleProjectTool;

#[async_trait]
impl FtrackTool for GrantUserSecurityRoleProjectTool {
    const NAME: &'static str = "grant_user_security_role_project";
    const DESCRIPTION: &'static str = "Grant a user's security role on a specific project.";
    type Params = UserRoleProjectParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .grant_user_security_role_project(params.user_id, params.role_id, params.project_id)
            .await?)
    }
}

pub struct RevokeUserSecurityRoleProjectTool;

#[async_trait]
impl FtrackTool for RevokeUserSecurityRoleProjectTool {
    const NAME: &'static str = "revoke_user_security_role_project";
    const DESCRIPTION: &'static str = "Revoke a user's security role on a specific project.";
    type Params = UserRoleProjectParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .revoke_user_security_role_project(params.user_id, params.role_id, params.project_id)
            .await?)
    }
}

// ============================================================================
// Impersonation and invites
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AssumeUserParams {
    /// Username to act as.
    pub username: String,
}

pub struct AssumeUserTool;

#[async_trait]
impl FtrackTool for AssumeUserTool {
    const NAME: &'static str = "assume_user";
    const DESCRIPTION: &'static str = "Act as another user on the server side.";
    type Params = AssumeUserParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.assume_user(params.username).await?)
    }
}

pub struct UnAssumeUserTool;

#[async_trait]
impl FtrackTool for UnAssumeUserTool {
    const NAME: &'static str = "un_assume_user";
    const DESCRIPTION: &'static str = "Stop acting as another user.";
    type Params = NoParams;

    async fn execute(client: &FtrackClient, _params: Self::Params) -> ToolResult<Value> {
        Ok(client.un_assume_user().await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserParams {
    /// User id.
    pub user_id: String,
}

pub struct SendUserInviteTool;

#[async_trait]
impl FtrackTool for SendUserInviteTool {
    const NAME: &'static str = "send_user_invite";
    const DESCRIPTION: &'static str = "Send the invitation email to a user.";
    type Params = UserParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.send_user_invite(params.user_id).await?)
    }
}

// ============================================================================
// Permissions and resets
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PermissionsParams {
    /// Entity type to check permissions on.
    #[serde(default)]
    pub entity_type: Option<String>,

    /// Entity id to check permissions on.
    #[serde(default)]
    pub entity_id: Option<String>,

    /// User to check; the API user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
}

pub struct PermissionsTool;

#[async_trait]
impl FtrackTool for PermissionsTool {
    const NAME: &'static str = "permissions";
    const DESCRIPTION: &'static str =
        "Return the permissions a user has, optionally on a specific entity.";
    type Params = PermissionsParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .permissions(params.entity_type, params.entity_id, params.user_id)
            .await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ResetRemoteParams {
    /// What to reset: "api_key" or "password".
    pub reset_type: ResetType,

    /// Entity type owning the credential, usually "User".
    pub entity_type: String,

    /// Entity id.
    pub entity_id: String,
}

pub struct ResetRemoteTool;

#[async_trait]
impl FtrackTool for ResetRemoteTool {
    const NAME: &'static str = "reset_remote";
    const DESCRIPTION: &'static str =
        "Reset a credential on the server: regenerate an API key or reset a password.";
    type Params = ResetRemoteParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .reset_remote(params.reset_type, params.entity_type, params.entity_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::sent_operation;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_role_omits_unset_scopes() {
        let op = sent_operation::<UpdateUserSecurityRoleTool>(UpdateUserRoleParams {
            user_id: "u1".into(),
            role_id: "r1".into(),
            is_all_projects: None,
            is_all_open_projects: Some(true),
        })
        .await;
        assert_eq!(
            op,
            json!({
                "action": "update_user_security_role",
                "user_id": "u1",
                "role_id": "r1",
                "is_all_open_projects": true
            })
        );
    }

    #[tokio::test]
    async fn test_grant_role_project() {
        let op = sent_operation::<GrantUserSecurityRoleProjectTool>(UserRoleProjectParams {
            user_id: "u1".into(),
            role_id: "r1".into(),
            project_id: "p1".into(),
        })
        .await;
        assert_eq!(op["action"], "grant_user_security_role_project");
        assert_eq!(op["project_id"], "p1");
    }

    #[tokio::test]
    async fn test_un_assume_user() {
        let op = sent_operation::<UnAssumeUserTool>(NoParams::default()).await;
        assert_eq!(op, json!({"action": "un_assume_user"}));
    }

    #[tokio::test]
    async fn test_permissions_without_arguments() {
        let op = sent_operation::<PermissionsTool>(PermissionsParams {
            entity_type: None,
            entity_id: None,
            user_id: None,
        })
        .await;
        assert_eq!(op, json!({"action": "permissions"}));
    }

    #[test]
    fn test_reset_type_is_restricted() {
        let ok: Result<ResetRemoteParams, _> = serde_json::from_value(json!({
            "reset_type": "password", "entity_type": "User", "entity_id": "u1"
        }));
        assert!(ok.is_ok());

        let bad: Result<ResetRemoteParams, _> = serde_json::from_value(json!({
            "reset_type": "session", "entity_type": "User", "entity_id": "u1"
        }));
        assert!(bad.is_err());
    }
}
