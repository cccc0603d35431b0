//! Generic entity tools: queries, search, CRUD and raw batches.
//!
//! These map one-to-one onto client operations. `get_entity` is the only one
//! that assembles an expression, and it validates the identifiers it splices
//! into it.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::{FtrackTool, NoParams};
use crate::client::{FtrackClient, JsonMap, query};
use crate::domains::tools::error::{ToolError, ToolResult};

// ============================================================================
// query / parse_query / query_schemas / query_server_information
// ============================================================================

/// Parameters for expression-based tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExpressionParams {
    /// Query expression, e.g. `select id, name from Project where status is "active"`.
    pub expression: String,
}

/// Run a query expression.
pub struct QueryTool;

#[async_trait]
impl FtrackTool for QueryTool {
    const NAME: &'static str = "query";
    const DESCRIPTION: &'static str = "Run an ftrack query expression and return the matching entities. Expressions look like: select id, name from Task where project.name is \"demo\" limit 10";
    type Params = ExpressionParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(params.expression).await?)
    }
}

/// Parse a query expression without running it.
pub struct ParseQueryTool;

#[async_trait]
impl FtrackTool for ParseQueryTool {
    const NAME: &'static str = "parse_query";
    const DESCRIPTION: &'static str =
        "Parse an ftrack query expression on the server and return its structure without executing it. Useful to validate a query.";
    type Params = ExpressionParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.parse_query(params.expression).await?)
    }
}

/// Fetch the schemas of every entity type.
pub struct QuerySchemasTool;

#[async_trait]
impl FtrackTool for QuerySchemasTool {
    const NAME: &'static str = "query_schemas";
    const DESCRIPTION: &'static str =
        "Return the schemas of all entity types known to the ftrack server, including their attributes and relations.";
    type Params = NoParams;

    async fn execute(client: &FtrackClient, _params: Self::Params) -> ToolResult<Value> {
        Ok(client.query_schemas().await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ServerInformationParams {
    /// Optional list of information keys to return (e.g. "version", "storage_scenario").
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

/// Server information.
pub struct QueryServerInformationTool;

#[async_trait]
impl FtrackTool for QueryServerInformationTool {
    const NAME: &'static str = "query_server_information";
    const DESCRIPTION: &'static str =
        "Return information about the ftrack server such as its version. Optionally restrict to specific keys.";
    type Params = ServerInformationParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query_server_information(params.values).await?)
    }
}

// ============================================================================
// search
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Entity type to search, e.g. "Task" or "AssetVersion".
    pub entity_type: String,

    /// Free-text search terms.
    pub terms: Vec<String>,

    /// Optional query expression narrowing the search.
    #[serde(default)]
    pub expression: Option<String>,

    /// Optional context (project, folder...) id to search within.
    #[serde(default)]
    pub context_id: Option<String>,

    /// Optional object type ids to restrict the search to.
    #[serde(default)]
    pub object_type_ids: Option<Vec<String>>,
}

/// Free-text search.
pub struct SearchTool;

#[async_trait]
impl FtrackTool for SearchTool {
    const NAME: &'static str = "search";
    const DESCRIPTION: &'static str =
        "Free-text search for entities of a given type, optionally within a context and narrowed by an expression.";
    type Params = SearchParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .search(
                params.entity_type,
                params.terms,
                params.expression,
                params.context_id,
                params.object_type_ids,
            )
            .await?)
    }
}

// ============================================================================
// create / update / delete / convert_entity
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateParams {
    /// Entity type to create, e.g. "Task".
    pub entity_type: String,

    /// Attribute values of the new entity.
    pub entity_data: JsonMap,
}

pub struct CreateTool;

#[async_trait]
impl FtrackTool for CreateTool {
    const NAME: &'static str = "create";
    const DESCRIPTION: &'static str =
        "Create a new entity of the given type with the given attribute values. Returns the created entity.";
    type Params = CreateParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.create(params.entity_type, params.entity_data).await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateParams {
    /// Entity type, e.g. "Task".
    pub entity_type: String,

    /// Id of the entity to update.
    pub entity_id: String,

    /// Attribute values to change.
    pub entity_data: JsonMap,
}

pub struct UpdateTool;

#[async_trait]
impl FtrackTool for UpdateTool {
    const NAME: &'static str = "update";
    const DESCRIPTION: &'static str =
        "Update attributes of an existing entity identified by type and id.";
    type Params = UpdateParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .update(params.entity_type, params.entity_id, params.entity_data)
            .await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EntityRefParams {
    /// Entity type, e.g. "Task".
    pub entity_type: String,

    /// Entity id.
    pub entity_id: String,
}

pub struct DeleteTool;

#[async_trait]
impl FtrackTool for DeleteTool {
    const NAME: &'static str = "delete";
    const DESCRIPTION: &'static str = "Delete an entity identified by type and id.";
    type Params = EntityRefParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.delete(params.entity_type, params.entity_id).await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConvertEntityParams {
    /// Current entity type.
    pub entity_type: String,

    /// Entity id.
    pub entity_id: String,

    /// Entity type to convert to.
    pub target_type: String,
}

pub struct ConvertEntityTool;

#[async_trait]
impl FtrackTool for ConvertEntityTool {
    const NAME: &'static str = "convert_entity";
    const DESCRIPTION: &'static str =
        "Convert an entity to another type (for example a Folder into a Shot), keeping its id.";
    type Params = ConvertEntityParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .convert_entity(params.entity_type, params.entity_id, params.target_type)
            .await?)
    }
}

// ============================================================================
// batch
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BatchParams {
    /// Operation objects, each with an "action" field and its action-specific fields.
    pub operations: Vec<JsonMap>,
}

/// All-or-nothing batch of raw operations.
pub struct BatchTool;

#[async_trait]
impl FtrackTool for BatchTool {
    const NAME: &'static str = "batch";
    const DESCRIPTION: &'static str = "Send several raw ftrack operations (e.g. {\"action\": \"create\", \"entity_type\": \"Task\", \"entity_data\": {...}}) in a single request. Results are returned in the same order. If any operation fails, the whole call fails and reports the failing index; operations before it may already have been applied.";
    type Params = BatchParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(Value::Array(client.batch(&params.operations).await?))
    }
}

// ============================================================================
// get_entity
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetEntityParams {
    /// Entity type, e.g. "Shot".
    pub entity_type: String,

    /// Entity id.
    pub entity_id: String,

    /// Attributes to return (e.g. ["name", "status.name"]). All attributes when omitted.
    #[serde(default)]
    pub projections: Option<Vec<String>>,
}

/// Fetch a single entity by id.
pub struct GetEntityTool;

impl GetEntityTool {
    /// Build the lookup expression, rejecting anything that is not an attribute path.
    pub fn expression(params: &GetEntityParams) -> ToolResult<String> {
        if !query::is_attribute_path(&params.entity_type) {
            return Err(ToolError::invalid_arguments(format!(
                "'{}' is not a valid entity type",
                params.entity_type
            )));
        }

        let projections = params.projections.clone().unwrap_or_default();
        if let Some(bad) = projections.iter().find(|p| !query::is_attribute_path(p)) {
            return Err(ToolError::invalid_arguments(format!(
                "'{}' is not a valid projection",
                bad
            )));
        }

        Ok(query::Select::new(params.entity_type.as_str(), projections)
            .is("id", &params.entity_id)
            .build())
    }
}

#[async_trait]
impl FtrackTool for GetEntityTool {
    const NAME: &'static str = "get_entity";
    const DESCRIPTION: &'static str =
        "Fetch a single entity by type and id, optionally limited to specific attributes.";
    type Params = GetEntityParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        let expression = Self::expression(&params)?;
        Ok(client.query(expression).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::{echo_client, sent_operation};
    use serde_json::json;

    #[tokio::test]
    async fn test_query_passes_expression_through() {
        let op = sent_operation::<QueryTool>(ExpressionParams {
            expression: "select id from Project".into(),
        })
        .await;
        assert_eq!(op, json!({"action": "query", "expression": "select id from Project"}));
    }

    #[tokio::test]
    async fn test_search_omits_absent_fields() {
        let op = sent_operation::<SearchTool>(SearchParams {
            entity_type: "Task".into(),
            terms: vec!["comp".into()],
            expression: None,
            context_id: Some("p1".into()),
            object_type_ids: None,
        })
        .await;
        assert_eq!(
            op,
            json!({"action": "search", "entity_type": "Task", "terms": ["comp"], "context_id": "p1"})
        );
    }

    #[tokio::test]
    async fn test_update_sends_one_element_key() {
        let params: UpdateParams = serde_json::from_value(json!({
            "entity_type": "Task",
            "entity_id": "t1",
            "entity_data": {"name": "comp"}
        }))
        .unwrap();
        let op = sent_operation::<UpdateTool>(params).await;
        assert_eq!(op["action"], "update");
        assert_eq!(op["entity_key"], json!(["t1"]));
        assert_eq!(op["entity_data"], json!({"name": "comp"}));
    }

    #[tokio::test]
    async fn test_delete_sends_one_element_key() {
        let op = sent_operation::<DeleteTool>(EntityRefParams {
            entity_type: "Note".into(),
            entity_id: "n1".into(),
        })
        .await;
        assert_eq!(op, json!({"action": "delete", "entity_type": "Note", "entity_key": ["n1"]}));
    }

    #[tokio::test]
    async fn test_batch_returns_results_in_order() {
        let (_server, client) = echo_client().await;
        let params: BatchParams = serde_json::from_value(json!({
            "operations": [
                {"action": "query", "expression": "select id from Status"},
                {"action": "delete", "entity_type": "Task", "entity_key": ["t1"]}
            ]
        }))
        .unwrap();
        let result = BatchTool::execute(&client, params).await.unwrap();
        let results = result.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["content"]["action"], "query");
        assert_eq!(results[1]["content"]["action"], "delete");
    }

    #[test]
    fn test_get_entity_expression() {
        let params = GetEntityParams {
            entity_type: "Shot".into(),
            entity_id: "s1".into(),
            projections: Some(vec!["name".into(), "status.name".into()]),
        };
        assert_eq!(
            GetEntityTool::expression(&params).unwrap(),
            "select name, status.name from Shot where id is \"s1\""
        );
    }

    #[test]
    fn test_get_entity_defaults_to_all_attributes() {
        for projections in [None, Some(vec![])] {
            let params = GetEntityParams {
                entity_type: "Shot".into(),
                entity_id: "s1".into(),
                projections,
            };
            assert_eq!(
                GetEntityTool::expression(&params).unwrap(),
                "select * from Shot where id is \"s1\""
            );
        }
    }

    #[test]
    fn test_get_entity_rejects_injected_identifiers() {
        let params = GetEntityParams {
            entity_type: "Shot where name like \"%\" or".into(),
            entity_id: "s1".into(),
            projections: None,
        };
        assert!(matches!(
            GetEntityTool::expression(&params),
            Err(ToolError::InvalidArguments(_))
        ));

        let params = GetEntityParams {
            entity_type: "Shot".into(),
            entity_id: "s1".into(),
            projections: Some(vec!["name from User".into()]),
        };
        assert!(GetEntityTool::expression(&params).is_err());
    }
}
