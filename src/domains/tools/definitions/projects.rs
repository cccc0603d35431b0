//! Project listing.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::{FtrackTool, default_limit};
use crate::client::{FtrackClient, query::Select};
use crate::domains::tools::error::ToolResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListProjectsParams {
    /// Include hidden (archived) projects.
    #[serde(default)]
    pub include_archived: bool,

    /// Maximum number of projects (default 100).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub struct ListProjectsTool;

impl ListProjectsTool {
    pub fn expression(params: &ListProjectsParams) -> String {
        let mut select = Select::new(
            "Project",
            ["id", "name", "full_name", "status", "start_date", "end_date"],
        );
        if !params.include_archived {
            select = select.is_not("status", "hidden");
        }
        select.limit(params.limit).build()
    }
}

#[async_trait]
impl FtrackTool for ListProjectsTool {
    const NAME: &'static str = "list_projects";
    const DESCRIPTION: &'static str =
        "List projects. Archived (hidden) projects are excluded unless include_archived is true.";
    type Params = ListProjectsParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(Self::expression(&params)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::sent_operation;
    use serde_json::json;

    #[test]
    fn test_archived_projects_excluded_by_default() {
        let params: ListProjectsParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            ListProjectsTool::expression(&params),
            "select id, name, full_name, status, start_date, end_date from Project \
             where status is_not \"hidden\" limit 100"
        );
    }

    #[test]
    fn test_include_archived_drops_status_clause() {
        let params = ListProjectsParams {
            include_archived: true,
            limit: 10,
        };
        assert_eq!(
            ListProjectsTool::expression(&params),
            "select id, name, full_name, status, start_date, end_date from Project limit 10"
        );
    }

    #[tokio::test]
    async fn test_list_projects_sends_single_query() {
        let params: ListProjectsParams = serde_json::from_value(json!({})).unwrap();
        let op = sent_operation::<ListProjectsTool>(params).await;
        assert_eq!(op["action"], "query");
        assert!(op["expression"].as_str().unwrap().starts_with("select id, name"));
    }
}
