//! Review session tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::{FtrackTool, default_short_limit};
use crate::client::{
    FtrackClient,
    query::{Select, SortOrder},
};
use crate::domains::tools::error::ToolResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListReviewSessionsParams {
    /// Only sessions of this project.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Maximum number of sessions (default 50).
    #[serde(default = "default_short_limit")]
    pub limit: u32,
}

pub struct ListReviewSessionsTool;

impl ListReviewSessionsTool {
    pub fn expression(params: &ListReviewSessionsParams) -> String {
        let mut select = Select::new(
            "ReviewSession",
            ["id", "name", "description", "created_at", "project.name"],
        );
        if let Some(project_id) = &params.project_id {
            select = select.is("project_id", project_id);
        }
        select
            .order_by("created_at", SortOrder::Descending)
            .limit(params.limit)
            .build()
    }
}

#[async_trait]
impl FtrackTool for ListReviewSessionsTool {
    const NAME: &'static str = "list_review_sessions";
    const DESCRIPTION: &'static str =
        "List review sessions, newest first, optionally for one project.";
    type Params = ListReviewSessionsParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(Self::expression(&params)).await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReviewInviteParams {
    /// ReviewSessionInvitee id.
    pub review_session_invitee_id: String,
}

pub struct SendReviewSessionInviteTool;

#[async_trait]
impl FtrackTool for SendReviewSessionInviteTool {
    const NAME: &'static str = "send_review_session_invite";
    const DESCRIPTION: &'static str = "Email a review session invitation to an invitee.";
    type Params = ReviewInviteParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .send_review_session_invite(params.review_session_invitee_id)
            .await?)
    }
}
