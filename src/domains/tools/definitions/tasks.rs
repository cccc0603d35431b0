//! Task listing, status changes and assignment.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::common::{FtrackTool, default_limit};
use crate::client::{FtrackClient, JsonMap, query::Select};
use crate::domains::tools::error::ToolResult;

const TASK_PROJECTION: [&str; 10] = [
    "id",
    "name",
    "status.name",
    "type.name",
    "priority.name",
    "parent.name",
    "project.name",
    "start_date",
    "end_date",
    "bid",
];

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    /// Only tasks in this project.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Only direct children of this context (shot, sequence, folder...).
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Only tasks assigned to this user.
    #[serde(default)]
    pub assignee_id: Option<String>,

    /// Only tasks whose status has this name, e.g. "In Progress".
    #[serde(default)]
    pub status: Option<String>,

    /// Maximum number of tasks (default 100).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub struct ListTasksTool;

impl ListTasksTool {
    pub fn expression(params: &ListTasksParams) -> String {
        let mut select = Select::new("Task", TASK_PROJECTION);
        if let Some(project_id) = &params.project_id {
            select = select.is("project_id", project_id);
        }
        if let Some(parent_id) = &params.parent_id {
            select = select.is("parent_id", parent_id);
        }
        if let Some(assignee_id) = &params.assignee_id {
            select = select.any("assignments", "resource_id", assignee_id);
        }
        if let Some(status) = &params.status {
            select = select.is("status.name", status);
        }
        select.limit(params.limit).build()
    }
}

#[async_trait]
impl FtrackTool for ListTasksTool {
    const NAME: &'static str = "list_tasks";
    const DESCRIPTION: &'static str = "List tasks, filtered by any combination of project, parent, assignee and status name.";
    type Params = ListTasksParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(Self::expression(&params)).await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTaskStatusParams {
    /// Task id.
    pub task_id: String,

    /// Id of the new Status.
    pub status_id: String,
}

pub struct UpdateTaskStatusTool;

#[async_trait]
impl FtrackTool for UpdateTaskStatusTool {
    const NAME: &'static str = "update_task_status";
    const DESCRIPTION: &'static str = "Set the status of a task. Use list_statuses to find status ids.";
    type Params = UpdateTaskStatusParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        let mut data = JsonMap::new();
        data.insert("status_id".into(), json!(params.status_id));
        Ok(client.update("Task", params.task_id, data).await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AssignUserParams {
    /// Task id.
    pub task_id: String,

    /// User id.
    pub user_id: String,
}

pub struct AssignUserToTaskTool;

#[async_trait]
impl FtrackTool for AssignUserToTaskTool {
    const NAME: &'static str = "assign_user_to_task";
    const DESCRIPTION: &'static str = "Assign a user to a task by creating an assignment Appointment.";
    type Params = AssignUserParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        let mut data = JsonMap::new();
        data.insert("context_id".into(), json!(params.task_id));
        data.insert("resource_id".into(), json!(params.user_id));
        data.insert("type".into(), json!("assignment"));
        Ok(client.create("Appointment", data).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::sent_operation;

    fn params(value: Value) -> ListTasksParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_status_only() {
        let expression = ListTasksTool::expression(&params(json!({"status": "In Progress"})));
        assert_eq!(
            expression,
            "select id, name, status.name, type.name, priority.name, parent.name, \
             project.name, start_date, end_date, bid from Task \
             where status.name is \"In Progress\" limit 100"
        );
    }

    #[test]
    fn test_project_and_assignee_conjoined_in_order() {
        let expression = ListTasksTool::expression(&params(json!({
            "assignee_id": "u1",
            "project_id": "p1",
            "limit": 20
        })));
        assert!(expression.ends_with(
            "from Task where project_id is \"p1\" and assignments any (resource_id is \"u1\") limit 20"
        ));
    }

    #[test]
    fn test_no_filters_has_no_where() {
        let expression = ListTasksTool::expression(&params(json!({})));
        assert!(!expression.contains(" where "));
        assert!(expression.ends_with("from Task limit 100"));
    }

    #[test]
    fn test_status_value_is_escaped() {
        let expression = ListTasksTool::expression(&params(json!({"status": "x\" or 1"})));
        assert!(expression.contains(r#"status.name is "x\" or 1""#));
    }

    #[tokio::test]
    async fn test_update_task_status() {
        let op = sent_operation::<UpdateTaskStatusTool>(UpdateTaskStatusParams {
            task_id: "t1".into(),
            status_id: "s1".into(),
        })
        .await;
        assert_eq!(
            op,
            json!({
                "action": "update",
                "entity_type": "Task",
                "entity_key": ["t1"],
                "entity_data": {"status_id": "s1"}
            })
        );
    }

    #[tokio::test]
    async fn test_assign_user_to_task() {
        let op = sent_operation::<AssignUserToTaskTool>(AssignUserParams {
            task_id: "t1".into(),
            user_id: "u1".into(),
        })
        .await;
        assert_eq!(
            op,
            json!({
                "action": "create",
                "entity_type": "Appointment",
                "entity_data": {"context_id": "t1", "resource_id": "u1", "type": "assignment"}
            })
        );
    }
}
