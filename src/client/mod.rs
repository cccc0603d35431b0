//! ftrack API client.
//!
//! All traffic goes through a single primitive, [`FtrackClient::execute`],
//! which POSTs an ordered array of operations to `<server>/api` and maps the
//! positional result array back to payloads or a [`ClientError`]. Every other
//! method builds exactly one [`Operation`] and sends it as a batch of one.

mod error;
mod operation;
pub mod query;

pub use error::{ClientError, ClientResult};
pub use operation::{
    DELAYED_JOB_RESERVED, ENCODE_MEDIA_RESERVED, JobType, JsonMap, Operation, ResetType,
    reserved_option,
};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::config::FtrackConfig;

/// Header carrying the API user name.
pub const USER_HEADER: &str = "ftrack-user";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "ftrack-api-key";

/// Outcome of a single operation inside a result array.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    Success(Value),
    Failure { exception: String, message: String },
}

impl OperationOutcome {
    /// Classify one element of the result array.
    ///
    /// An element is a failure when it is an object with a non-null
    /// `exception` member; its `content` member holds the message.
    pub fn from_value(value: Value) -> Self {
        match error_marker(&value) {
            Some((exception, message)) => Self::Failure { exception, message },
            None => Self::Success(value),
        }
    }

    fn into_result(self, index: usize) -> ClientResult<Value> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { exception, message } => Err(ClientError::Operation {
                index,
                exception,
                message,
            }),
        }
    }
}

fn error_marker(value: &Value) -> Option<(String, String)> {
    let obj = value.as_object()?;
    let exception = obj.get("exception").filter(|e| !e.is_null())?;
    let exception = match exception {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let message = match obj.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => exception.clone(),
        Some(other) => other.to_string(),
    };
    Some((exception, message))
}

/// Client for the ftrack `/api` endpoint.
///
/// The identity is fixed for the lifetime of the client. Cloning is cheap
/// and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FtrackClient {
    http: reqwest::Client,
    endpoint: String,
    config: FtrackConfig,
}

impl FtrackClient {
    /// Create a client for an already validated identity.
    pub fn new(config: FtrackConfig) -> Self {
        let endpoint = format!("{}/api", config.server_url());
        Self {
            http: reqwest::Client::new(),
            endpoint,
            config,
        }
    }

    /// Create a client from `FTRACK_SERVER`, `FTRACK_API_USER` and `FTRACK_API_KEY`.
    pub fn from_env() -> ClientResult<Self> {
        Ok(Self::new(FtrackConfig::from_env()?))
    }

    /// The identity this client sends with every request.
    pub fn config(&self) -> &FtrackConfig {
        &self.config
    }

    /// Full URL of the API endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // ========================================================================
    // Batch primitives
    // ========================================================================

    /// Send `operations` in one request and return their results in order.
    ///
    /// The first operation flagged as failed by the server turns the whole
    /// call into [`ClientError::Operation`]. Earlier operations may already
    /// have been applied remotely; nothing is rolled back.
    #[instrument(skip_all, fields(operations = operations.len()))]
    pub async fn execute<T>(&self, operations: &[T]) -> ClientResult<Vec<Value>>
    where
        T: Serialize + Sync,
    {
        debug!("Sending {} operation(s) to {}", operations.len(), self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_HEADER, self.config.api_user())
            .header(API_KEY_HEADER, self.config.api_key())
            .json(operations)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("ftrack API returned status {}", status);
            return Err(ClientError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: Value = serde_json::from_str(&body)
            .map_err(|e| ClientError::malformed(format!("{}: {}", e, body)))?;

        let results = match decoded {
            Value::Array(results) => results,
            other => {
                return Err(match error_marker(&other) {
                    Some((exception, message)) => ClientError::Rejected { exception, message },
                    None => ClientError::malformed(format!("expected a result array, got {}", other)),
                });
            }
        };

        let count = results.len();
        let results = results
            .into_iter()
            .enumerate()
            .map(|(index, value)| OperationOutcome::from_value(value).into_result(index))
            .collect::<ClientResult<Vec<_>>>()
            .inspect_err(|e| warn!("{}", e))?;

        if count != operations.len() {
            return Err(ClientError::malformed(format!(
                "sent {} operation(s) but received {} result(s)",
                operations.len(),
                count
            )));
        }

        Ok(results)
    }

    /// Send a single operation and return its result.
    pub async fn execute_one(&self, operation: Operation) -> ClientResult<Value> {
        operation.validate()?;
        let mut results = self.execute(std::slice::from_ref(&operation)).await?;
        results
            .pop()
            .ok_or_else(|| ClientError::malformed("empty result array"))
    }

    /// Send caller-supplied operation objects as one all-or-nothing batch.
    pub async fn batch(&self, operations: &[JsonMap]) -> ClientResult<Vec<Value>> {
        self.execute(operations).await
    }

    // ========================================================================
    // Queries and schema
    // ========================================================================

    pub async fn query(&self, expression: impl Into<String>) -> ClientResult<Value> {
        self.execute_one(Operation::Query {
            expression: expression.into(),
        })
        .await
    }

    pub async fn parse_query(&self, expression: impl Into<String>) -> ClientResult<Value> {
        self.execute_one(Operation::ParseQuery {
            expression: expression.into(),
        })
        .await
    }

    pub async fn query_schemas(&self) -> ClientResult<Value> {
        self.execute_one(Operation::QuerySchemas).await
    }

    pub async fn query_server_information(
        &self,
        values: Option<Vec<String>>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::QueryServerInformation { values })
            .await
    }

    /// Free-text search over `entity_type`.
    pub async fn search(
        &self,
        entity_type: impl Into<String>,
        terms: Vec<String>,
        expression: Option<String>,
        context_id: Option<String>,
        object_type_ids: Option<Vec<String>>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::Search {
            entity_type: entity_type.into(),
            terms,
            expression,
            context_id,
            object_type_ids,
        })
        .await
    }

    // ========================================================================
    // Entity CRUD
    // ========================================================================

    pub async fn create(
        &self,
        entity_type: impl Into<String>,
        entity_data: JsonMap,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::Create {
            entity_type: entity_type.into(),
            entity_data,
        })
        .await
    }

    pub async fn update(
        &self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        entity_data: JsonMap,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::update(entity_type, entity_id, entity_data))
            .await
    }

    pub async fn delete(
        &self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::delete(entity_type, entity_id))
            .await
    }

    pub async fn convert_entity(
        &self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        target_type: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::ConvertEntity {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            target_type: target_type.into(),
        })
        .await
    }

    // ========================================================================
    // Users and security roles
    // ========================================================================

    pub async fn add_user_security_role(
        &self,
        user_id: impl Into<String>,
        role_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::AddUserSecurityRole {
            user_id: user_id.into(),
            role_id: role_id.into(),
        })
        .await
    }

    pub async fn remove_user_security_role(
        &self,
        user_id: impl Into<String>,
        role_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::RemoveUserSecurityRole {
            user_id: user_id.into(),
            role_id: role_id.into(),
        })
        .await
    }

    pub async fn update_user_security_role(
        &self,
        user_id: impl Into<String>,
        role_id: impl Into<String>,
        is_all_projects: Option<bool>,
        is_all_open_projects: Option<bool>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::UpdateUserSecurityRole {
            user_id: user_id.into(),
            role_id: role_id.into(),
            is_all_projects,
            is_all_open_projects,
        })
        .await
    }

    pub async fn grant_user_security_role_project(
        &self,
        user_id: impl Into<String>,
        role_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::GrantUserSecurityRoleProject {
            user_id: user_id.into(),
            role_id: role_id.into(),
            project_id: project_id.into(),
        })
        .await
    }

    pub async fn revoke_user_security_role_project(
        &self,
        user_id: impl Into<String>,
        role_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::RevokeUserSecurityRoleProject {
            user_id: user_id.into(),
            role_id: role_id.into(),
            project_id: project_id.into(),
        })
        .await
    }

    pub async fn assume_user(&self, username: impl Into<String>) -> ClientResult<Value> {
        self.execute_one(Operation::AssumeUser {
            username: username.into(),
        })
        .await
    }

    pub async fn un_assume_user(&self) -> ClientResult<Value> {
        self.execute_one(Operation::UnAssumeUser).await
    }

    pub async fn send_user_invite(&self, user_id: impl Into<String>) -> ClientResult<Value> {
        self.execute_one(Operation::SendUserInvite {
            user_id: user_id.into(),
        })
        .await
    }

    pub async fn permissions(
        &self,
        entity_type: Option<String>,
        entity_id: Option<String>,
        user_id: Option<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::Permissions {
            entity_type,
            entity_id,
            user_id,
        })
        .await
    }

    pub async fn reset_remote(
        &self,
        reset_type: ResetType,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::ResetRemote {
            reset_type,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        })
        .await
    }

    // ========================================================================
    // API keys
    // ========================================================================

    pub async fn grant_api_key_project(
        &self,
        api_key_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::GrantApiKeyProject {
            api_key_id: api_key_id.into(),
            project_id: project_id.into(),
        })
        .await
    }

    pub async fn revoke_api_key_project(
        &self,
        api_key_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::RevokeApiKeyProject {
            api_key_id: api_key_id.into(),
            project_id: project_id.into(),
        })
        .await
    }

    pub async fn grant_api_key_security_role(
        &self,
        api_key_id: impl Into<String>,
        role_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::GrantApiKeySecurityRole {
            api_key_id: api_key_id.into(),
            role_id: role_id.into(),
        })
        .await
    }

    pub async fn revoke_api_key_security_role(
        &self,
        api_key_id: impl Into<String>,
        role_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::RevokeApiKeySecurityRole {
            api_key_id: api_key_id.into(),
            role_id: role_id.into(),
        })
        .await
    }

    // ========================================================================
    // Two-factor authentication
    // ========================================================================

    pub async fn configure_otp(
        &self,
        enabled: bool,
        user_id: Option<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::ConfigureOtp { enabled, user_id })
            .await
    }

    pub async fn configure_totp(
        &self,
        secret: impl Into<String>,
        code: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::ConfigureTotp {
            secret: secret.into(),
            code: code.into(),
        })
        .await
    }

    pub async fn generate_totp(&self) -> ClientResult<Value> {
        self.execute_one(Operation::GenerateTotp).await
    }

    pub async fn disable_2fa(&self, user_id: Option<String>) -> ClientResult<Value> {
        self.execute_one(Operation::Disable2fa { user_id }).await
    }

    // ========================================================================
    // Media and storage
    // ========================================================================

    pub async fn get_upload_metadata(
        &self,
        component_id: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        parts: Option<u32>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::GetUploadMetadata {
            component_id: component_id.into(),
            file_name: file_name.into(),
            file_size,
            parts,
        })
        .await
    }

    pub async fn complete_multipart_upload(
        &self,
        component_id: impl Into<String>,
        upload_id: impl Into<String>,
        parts: Vec<Value>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::CompleteMultipartUpload {
            component_id: component_id.into(),
            upload_id: upload_id.into(),
            parts,
        })
        .await
    }

    /// Signed URL for a component; `operation` defaults to `get`.
    pub async fn generate_signed_url(
        &self,
        component_id: impl Into<String>,
        operation: Option<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::generate_signed_url(component_id, operation))
            .await
    }

    pub async fn encode_media(
        &self,
        component_id: impl Into<String>,
        version_id: Option<String>,
        keep_original: Option<bool>,
        options: JsonMap,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::EncodeMedia {
            component_id: component_id.into(),
            version_id,
            keep_original,
            options,
        })
        .await
    }

    pub async fn storage_usage(&self, project_id: Option<String>) -> ClientResult<Value> {
        self.execute_one(Operation::StorageUsage { project_id })
            .await
    }

    // ========================================================================
    // Reviews and jobs
    // ========================================================================

    pub async fn send_review_session_invite(
        &self,
        review_session_invitee_id: impl Into<String>,
    ) -> ClientResult<Value> {
        self.execute_one(Operation::SendReviewSessionInvite {
            review_session_invitee_id: review_session_invitee_id.into(),
        })
        .await
    }

    pub async fn delayed_job(&self, job_type: JobType, options: JsonMap) -> ClientResult<Value> {
        self.execute_one(Operation::DelayedJob { job_type, options })
            .await
    }
}
