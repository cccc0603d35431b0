//! Asset version listing.

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
pub struct ListAssetVersionsParams {
    /// Only versions of this asset.
    #[serde(default)]
    pub asset_id: Option<String>,

    /// Only versions published from this task.
    #[serde(default)]
    pub task_id: Option<String>,

    /// Maximum number of versions (default 50).
    #[serde(default = "default_short_limit")]
    pub limit: u32,
}

pub struct ListAssetVersionsTool;

impl ListAssetVersionsTool {
    pub fn expression(params: &ListAssetVersionsParams) -> String {
        let mut select = Select::new(
            "AssetVersion",
            [
                "id",
                "version",
                "comment",
                "date",
                "status.name",
                "asset.name",
                "task.name",
                "user.username",
            ],
        );
        if let Some(asset_id) = &params.asset_id {
            select = select.is("asset_id", asset_id);
        }
        if let Some(task_id) = &params.task_id {
            select = select.is("task_id", task_id);
        }
        select
            .order_by("version", SortOrder::Descending)
            .limit(params.limit)
            .build()
    }
}

#[async_trait]
impl FtrackTool for ListAssetVersionsTool {
    const NAME: &'static str = "list_asset_versions";
    const DESCRIPTION: &'static str =
        "List asset versions, highest version first, optionally for one asset and/or task.";
    type Params = ListAssetVersionsParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(Self::expression(&params)).await?)
    }
}
