//! Server-side delayed jobs.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::FtrackTool;
use crate::client::{DELAYED_JOB_RESERVED, FtrackClient, JobType, JsonMap, reserved_option};
use crate::domains::tools::error::{ToolError, ToolResult};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DelayedJobParams {
    /// Kind of job: csv_import, delete, export_review_feedback,
    /// sync_external_structure or sync_directory.
    pub job_type: JobType,

    /// Job-specific options, merged into the operation. May not contain
    /// `action` or `job_type`.
    #[serde(default)]
    pub options: JsonMap,
}

pub struct DelayedJobTool;

#[async_trait]
impl FtrackTool for DelayedJobTool {
    const NAME: &'static str = "delayed_job";
    const DESCRIPTION: &'static str = "Start a long-running server-side job (CSV import, bulk delete, review feedback export, external structure sync, directory sync). Returns the created Job.";
    type Params = DelayedJobParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        if let Some(key) = reserved_option(&params.options, DELAYED_JOB_RESERVED) {
            return Err(ToolError::invalid_arguments(format!(
                "option `{}` would override a delayed_job field",
                key
            )));
        }
        Ok(client.delayed_job(params.job_type, params.options).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::{echo_client, sent_operation};
    use serde_json::json;

    #[tokio::test]
    async fn test_delayed_job_merges_options() {
        let params: DelayedJobParams = serde_json::from_value(json!({
            "job_type": "export_review_feedback",
            "options": {"review_session_id": "rs1"}
        }))
        .unwrap();
        let op = sent_operation::<DelayedJobTool>(params).await;
        assert_eq!(
            op,
            json!({
                "action": "delayed_job",
                "job_type": "export_review_feedback",
                "review_session_id": "rs1"
            })
        );
    }

    #[test]
    fn test_unknown_job_type_rejected() {
        let parsed: Result<DelayedJobParams, _> =
            serde_json::from_value(json!({"job_type": "reindex"}));
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_options_cannot_override_job_type_or_action() {
        let (server, client) = echo_client().await;
        let params: DelayedJobParams = serde_json::from_value(json!({
            "job_type": "export_review_feedback",
            "options": {"job_type": "delete", "action": "delete"}
        }))
        .unwrap();

        let err = DelayedJobTool::execute(&client, params).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("job_type") || err.to_string().contains("action"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
