//! Two-factor authentication tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::{FtrackTool, NoParams};
use crate::client::FtrackClient;
use crate::domains::tools::error::ToolResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConfigureOtpParams {
    /// Enable or disable one-time passwords sent by email.
    pub enabled: bool,

    /// User to configure; the API user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
}

pub struct ConfigureOtpTool;

#[async_trait]
impl FtrackTool for ConfigureOtpTool {
    const NAME: &'static str = "configure_otp";
    const DESCRIPTION: &'static str = "Enable or disable email one-time-password authentication.";
    type Params = ConfigureOtpParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.configure_otp(params.enabled, params.user_id).await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConfigureTotpParams {
    /// Secret returned by `generate_totp`.
    pub secret: String,

    /// Current code from the authenticator app, proving the secret was registered.
    pub code: String,
}

pub struct ConfigureTotpTool;

#[async_trait]
impl FtrackTool for ConfigureTotpTool {
    const NAME: &'static str = "configure_totp";
    const DESCRIPTION: &'static str =
        "Enable authenticator-app (TOTP) two-factor authentication using a secret from generate_totp and a current code.";
    type Params = ConfigureTotpParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.configure_totp(params.secret, params.code).await?)
    }
}

pub struct GenerateTotpTool;

#[async_trait]
impl FtrackTool for GenerateTotpTool {
    const NAME: &'static str = "generate_totp";
    const DESCRIPTION: &'static str =
        "Generate a new TOTP secret (and provisioning data) for the API user.";
    type Params = NoParams;

    async fn execute(client: &FtrackClient, _params: Self::Params) -> ToolResult<Value> {
        Ok(client.generate_totp().await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Disable2faParams {
    /// User to disable two-factor authentication for; the API user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
}

pub struct Disable2faTool;

#[async_trait]
impl FtrackTool for Disable2faTool {
    const NAME: &'static str = "disable_2fa";
    const DESCRIPTION: &'static str = "Disable two-factor authentication for a user.";
    type Params = Disable2faParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.disable_2fa(params.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::sent_operation;
    use serde_json::json;

    #[tokio::test]
    async fn test_disable_2fa_action_name() {
        let op = sent_operation::<Disable2faTool>(Disable2faParams { user_id: None }).await;
        assert_eq!(op, json!({"action": "disable_2fa"}));
    }

    #[tokio::test]
    async fn test_configure_otp() {
        let op = sent_operation::<ConfigureOtpTool>(ConfigureOtpParams {
            enabled: false,
            user_id: Some("u1".into()),
        })
        .await;
        assert_eq!(op, json!({"action": "configure_otp", "enabled": false, "user_id": "u1"}));
    }
}
