//! Notes attached to entities.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::common::{FtrackTool, default_short_limit};
use crate::client::{
    FtrackClient, JsonMap,
    query::{Select, SortOrder},
};
use crate::domains::tools::error::ToolResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateNoteParams {
    /// Type of the entity the note is attached to, e.g. "Task".
    pub entity_type: String,

    /// Id of the entity the note is attached to.
    pub entity_id: String,

    /// Note text.
    pub content: String,

    /// Author user id; the server picks the API user when omitted.
    #[serde(default)]
    pub author_id: Option<String>,
}

pub struct CreateNoteTool;

impl CreateNoteTool {
    pub fn entity_data(params: CreateNoteParams) -> JsonMap {
        let mut data = JsonMap::new();
        data.insert("content".into(), json!(params.content));
        data.insert("parent_type".into(), json!(params.entity_type));
        data.insert("parent_id".into(), json!(params.entity_id));
        if let Some(author_id) = params.author_id {
            data.insert("author_id".into(), json!(author_id));
        }
        data
    }
}

#[async_trait]
impl FtrackTool for CreateNoteTool {
    const NAME: &'static str = "create_note";
    const DESCRIPTION: &'static str = "Attach a note to an entity (task, version, shot...).";
    type Params = CreateNoteParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.create("Note", Self::entity_data(params)).await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListNotesParams {
    /// Type of the parent entity.
    pub entity_type: String,

    /// Id of the parent entity.
    pub entity_id: String,

    /// Maximum number of notes (default 50).
    #[serde(default = "default_short_limit")]
    pub limit: u32,
}

pub struct ListNotesTool;

impl ListNotesTool {
    pub fn expression(params: &ListNotesParams) -> String {
        Select::new(
            "Note",
            [
                "id",
                "content",
                "date",
                "author.username",
                "author.first_name",
                "author.last_name",
            ],
        )
        .is("parent_type", &params.entity_type)
        .is("parent_id", &params.entity_id)
        .order_by("date", SortOrder::Descending)
        .limit(params.limit)
        .build()
    }
}

#[async_trait]
impl FtrackTool for ListNotesTool {
    const NAME: &'static str = "list_notes";
    const DESCRIPTION: &'static str = "List the notes on an entity, newest first.";
    type Params = ListNotesParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.query(Self::expression(&params)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::sent_operation;

    #[tokio::test]
    async fn test_create_note_without_author() {
        let op = sent_operation::<CreateNoteTool>(CreateNoteParams {
            entity_type: "Task".into(),
            entity_id: "t1".into(),
            content: "Looks good".into(),
            author_id: None,
        })
        .await;
        assert_eq!(
            op,
            json!({
                "action": "create",
                "entity_type": "Note",
                "entity_data": {"content": "Looks good", "parent_type": "Task", "parent_id": "t1"}
            })
        );
    }

    #[test]
    fn test_create_note_with_author() {
        let data = CreateNoteTool::entity_data(CreateNoteParams {
            entity_type: "AssetVersion".into(),
            entity_id: "v1".into(),
            content: "Fix the edge".into(),
            author_id: Some("u1".into()),
        });
        assert_eq!(data["author_id"], "u1");
    }

    #[test]
    fn test_list_notes_expression() {
        let params: ListNotesParams =
            serde_json::from_value(json!({"entity_type": "Task", "entity_id": "t1"})).unwrap();
        assert_eq!(
            ListNotesTool::expression(&params),
            "select id, content, date, author.username, author.first_name, author.last_name \
             from Note where parent_type is \"Task\" and parent_id is \"t1\" \
             order by date descending limit 50"
        );
    }
}
