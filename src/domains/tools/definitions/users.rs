//! User listing.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::{FtrackTool, default_limit};
use crate::client::{FtrackClient, query::Select};
use crate::domains::tools::error::ToolResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListUsersParams {
    /// Include deactivated users.
    #[serde(default)]
    pub include_inactive: bool,

    /// Maximum number of users (default 100).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub struct ListUsersTool;

impl ListUsersTool {
    pub fn expression(params: &ListUsersParams) -> String {
        let mut select = Select::new(
            "User",
            ["id", "username", "first_name", "last_name", "email", "is_active"],
        );
        if !params.include_inactive {
            select = select.filter("is_active is true");
        }
        select.limit(params.limit).build()
    }
}

#[async_trait]
impl FtrackTool for ListUsersTool {
    const NAME: &'static str = "list_users";
    const DESCRIPTION: &'static str = "List users. Only active users unless include_inactive is true.";
    type Params = ListUsersParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(Self::expression(&params)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_only_by_default() {
        let params: ListUsersParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(
            ListUsersTool::expression(&params),
            "select id, username, first_name, last_name, email, is_active from User \
             where is_active is true limit 100"
        );
    }

    #[test]
    fn test_include_inactive() {
        let params = ListUsersParams {
            include_inactive: true,
            limit: 3,
        };
        assert_eq!(
            ListUsersTool::expression(&params),
            "select id, username, first_name, last_name, email, is_active from User limit 3"
        );
    }
}
