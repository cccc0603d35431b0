//! Fixed lookups of workflow reference data.

use async_trait::async_trait;
use serde_json::Value;

use super::common::{FtrackTool, NoParams};
use crate::client::FtrackClient;
use crate::domains::tools::error::ToolResult;

pub const STATUSES: &str = "select id, name, color, sort from Status order by sort";
pub const TYPES: &str = "select id, name, color, sort from Type order by sort";
pub const PRIORITIES: &str = "select id, name, color, sort, value from Priority order by sort";
pub const SECURITY_ROLES: &str = "select id, name, type from SecurityRole order by name";

pub struct ListStatusesTool;

#[async_trait]
impl FtrackTool for ListStatusesTool {
    const NAME: &'static str = "list_statuses";
    const DESCRIPTION: &'static str = "List all statuses in workflow sort order.";
    type Params = NoParams;

    async fn execute(client: &FtrackClient, _params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(STATUSES).await?)
    }
}

pub struct ListTypesTool;

#[async_trait]
impl FtrackTool for ListTypesTool {
    const NAME: &'static str = "list_types";
    const DESCRIPTION: &'static str = "List all task types in sort order.";
    type Params = NoParams;

    async fn execute(client: &FtrackClient, _params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(TYPES).await?)
    }
}

pub struct ListPrioritiesTool;

#[async_trait]
impl FtrackTool for ListPrioritiesTool {
    const NAME: &'static str = "list_priorities";
    const DESCRIPTION: &'static str = "List all priorities in sort order.";
    type Params = NoParams;

    async fn execute(client: &FtrackClient, _params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(PRIORITIES).await?)
    }
}

pub struct ListSecurityRolesTool;

#[async_trait]
impl FtrackTool for ListSecurityRolesTool {
    const NAME: &'static str = "list_security_roles";
    const DESCRIPTION: &'static str = "List all security roles by name.";
    type Params = NoParams;

    async fn execute(client: &FtrackClient, _params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(SECURITY_ROLES).await?)
    }
}
