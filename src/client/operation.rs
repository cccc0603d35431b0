//! Typed ftrack API operations.
//!
//! Every request sent to `/api` is an array of operation objects, each one
//! discriminated by its `action` field. [`Operation`] models one variant per
//! action with exactly the fields that action accepts; optional fields are
//! left out of the wire object when unset, since the server treats a missing
//! field and an explicit `null` differently.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ClientError;

/// Free-form JSON object, as used for entity payloads and option maps.
pub type JsonMap = Map<String, Value>;

/// Kind of credential reset performed by [`Operation::ResetRemote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResetType {
    ApiKey,
    Password,
}

/// Background job kinds accepted by [`Operation::DelayedJob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// Import entities from an uploaded CSV file.
    CsvImport,
    /// Delete entities in the background.
    Delete,
    /// Export review session feedback.
    ExportReviewFeedback,
    /// Synchronise the project structure from an external source.
    SyncExternalStructure,
    /// Synchronise users from the configured directory service.
    SyncDirectory,
}

/// Keys an `encode_media` option map may not contain.
pub const ENCODE_MEDIA_RESERVED: &[&str] =
    &["action", "component_id", "version_id", "keep_original"];

/// Keys a `delayed_job` option map may not contain.
pub const DELAYED_JOB_RESERVED: &[&str] = &["action", "job_type"];

/// First key of `options` that would shadow a typed field once flattened.
pub fn reserved_option<'a>(options: &'a JsonMap, reserved: &[&str]) -> Option<&'a str> {
    options
        .keys()
        .map(String::as_str)
        .find(|key| reserved.contains(key))
}

fn default_signed_url_operation() -> String {
    "get".to_string()
}

/// One ftrack API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Operation {
    Query {
        expression: String,
    },
    ParseQuery {
        expression: String,
    },
    QuerySchemas,
    QueryServerInformation {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        values: Option<Vec<String>>,
    },
    Search {
        entity_type: String,
        terms: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        object_type_ids: Option<Vec<String>>,
    },
    Create {
        entity_type: String,
        entity_data: JsonMap,
    },
    Update {
        entity_type: String,
        entity_key: Vec<String>,
        entity_data: JsonMap,
    },
    Delete {
        entity_type: String,
        entity_key: Vec<String>,
    },
    AddUserSecurityRole {
        user_id: String,
        role_id: String,
    },
    RemoveUserSecurityRole {
        user_id: String,
        role_id: String,
    },
    UpdateUserSecurityRole {
        user_id: String,
        role_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_all_projects: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_all_open_projects: Option<bool>,
    },
    GrantUserSecurityRoleProject {
        user_id: String,
        role_id: String,
        project_id: String,
    },
    RevokeUserSecurityRoleProject {
        user_id: String,
        role_id: String,
        project_id: String,
    },
    AssumeUser {
        username: String,
    },
    UnAssumeUser,
    SendUserInvite {
        user_id: String,
    },
    GrantApiKeyProject {
        api_key_id: String,
        project_id: String,
    },
    RevokeApiKeyProject {
        api_key_id: String,
        project_id: String,
    },
    GrantApiKeySecurityRole {
        api_key_id: String,
        role_id: String,
    },
    RevokeApiKeySecurityRole {
        api_key_id: String,
        role_id: String,
    },
    ConfigureOtp {
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    ConfigureTotp {
        secret: String,
        code: String,
    },
    GenerateTotp,
    #[serde(rename = "disable_2fa")]
    Disable2fa {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    GetUploadMetadata {
        component_id: String,
        file_name: String,
        file_size: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parts: Option<u32>,
    },
    CompleteMultipartUpload {
        component_id: String,
        upload_id: String,
        parts: Vec<Value>,
    },
    GenerateSignedUrl {
        component_id: String,
        #[serde(default = "default_signed_url_operation")]
        operation: String,
    },
    EncodeMedia {
        component_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keep_original: Option<bool>,
        #[serde(flatten)]
        options: JsonMap,
    },
    ConvertEntity {
        entity_type: String,
        entity_id: String,
        target_type: String,
    },
    Permissions {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entity_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entity_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    StorageUsage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project_id: Option<String>,
    },
    SendReviewSessionInvite {
        review_session_invitee_id: String,
    },
    ResetRemote {
        reset_type: ResetType,
        entity_type: String,
        entity_id: String,
    },
    DelayedJob {
        job_type: JobType,
        #[serde(flatten)]
        options: JsonMap,
    },
}

impl Operation {
    /// The `action` literal this operation is sent with.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Query { .. } => "query",
            Self::ParseQuery { .. } => "parse_query",
            Self::QuerySchemas => "query_schemas",
            Self::QueryServerInformation { .. } => "query_server_information",
            Self::Search { .. } => "search",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::AddUserSecurityRole { .. } => "add_user_security_role",
            Self::RemoveUserSecurityRole { .. } => "remove_user_security_role",
            Self::UpdateUserSecurityRole { .. } => "update_user_security_role",
            Self::GrantUserSecurityRoleProject { .. } => "grant_user_security_role_project",
            Self::RevokeUserSecurityRoleProject { .. } => "revoke_user_security_role_project",
            Self::AssumeUser { .. } => "assume_user",
            Self::UnAssumeUser => "un_assume_user",
            Self::SendUserInvite { .. } => "send_user_invite",
            Self::GrantApiKeyProject { .. } => "grant_api_key_project",
            Self::RevokeApiKeyProject { .. } => "revoke_api_key_project",
            Self::GrantApiKeySecurityRole { .. } => "grant_api_key_security_role",
            Self::RevokeApiKeySecurityRole { .. } => "revoke_api_key_security_role",
            Self::ConfigureOtp { .. } => "configure_otp",
            Self::ConfigureTotp { .. } => "configure_totp",
            Self::GenerateTotp => "generate_totp",
            Self::Disable2fa { .. } => "disable_2fa",
            Self::GetUploadMetadata { .. } => "get_upload_metadata",
            Self::CompleteMultipartUpload { .. } => "complete_multipart_upload",
            Self::GenerateSignedUrl { .. } => "generate_signed_url",
            Self::EncodeMedia { .. } => "encode_media",
            Self::ConvertEntity { .. } => "convert_entity",
            Self::Permissions { .. } => "permissions",
            Self::StorageUsage { .. } => "storage_usage",
            Self::SendReviewSessionInvite { .. } => "send_review_session_invite",
            Self::ResetRemote { .. } => "reset_remote",
            Self::DelayedJob { .. } => "delayed_job",
        }
    }

    /// Check that flattened option maps do not shadow the action or a typed field.
    pub fn validate(&self) -> Result<(), ClientError> {
        let (options, reserved) = match self {
            Self::EncodeMedia { options, .. } => (options, ENCODE_MEDIA_RESERVED),
            Self::DelayedJob { options, .. } => (options, DELAYED_JOB_RESERVED),
            _ => return Ok(()),
        };
        match reserved_option(options, reserved) {
            Some(key) => Err(ClientError::reserved_option(self.action(), key)),
            None => Ok(()),
        }
    }

    /// Build an `update` operation; the id is sent as a one-element key.
    pub fn update(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        entity_data: JsonMap,
    ) -> Self {
        Self::Update {
            entity_type: entity_type.into(),
            entity_key: vec![entity_id.into()],
            entity_data,
        }
    }

    /// Build a `delete` operation; the id is sent as a one-element key.
    pub fn delete(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::Delete {
            entity_type: entity_type.into(),
            entity_key: vec![entity_id.into()],
        }
    }

    /// Build a `generate_signed_url` operation, defaulting the sub-operation to `get`.
    pub fn generate_signed_url(component_id: impl Into<String>, operation: Option<String>) -> Self {
        Self::GenerateSignedUrl {
            component_id: component_id.into(),
            operation: operation.unwrap_or_else(default_signed_url_operation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(op: &Operation) -> Value {
        serde_json::to_value(op).unwrap()
    }

    fn s(value: &str) -> String {
        value.to_string()
    }

    /// One instance of every variant, optionals unset.
    fn every_variant() -> Vec<(Operation, &'static str)> {
        vec![
            (Operation::Query { expression: s("select id from Task") }, "query"),
            (Operation::ParseQuery { expression: s("select id from Task") }, "parse_query"),
            (Operation::QuerySchemas, "query_schemas"),
            (
                Operation::QueryServerInformation { values: None },
                "query_server_information",
            ),
            (
                Operation::Search {
                    entity_type: s("Task"),
                    terms: vec![s("lighting")],
                    expression: None,
                    context_id: None,
                    object_type_ids: None,
                },
                "search",
            ),
            (
                Operation::Create {
                    entity_type: s("Note"),
                    entity_data: JsonMap::new(),
                },
                "create",
            ),
            (Operation::update("Task", "t", JsonMap::new()), "update"),
            (Operation::delete("Task", "t"), "delete"),
            (
                Operation::AddUserSecurityRole {
                    user_id: s("u"),
                    role_id: s("r"),
                },
                "add_user_security_role",
            ),
            (
                Operation::RemoveUserSecurityRole {
                    user_id: s("u"),
                    role_id: s("r"),
                },
                "remove_user_security_role",
            ),
            (
                Operation::UpdateUserSecurityRole {
                    user_id: s("u"),
                    role_id: s("r"),
                    is_all_projects: None,
                    is_all_open_projects: None,
                },
                "update_user_security_role",
            ),
            (
                Operation::GrantUserSecurityRoleProject {
                    user_id: s("u"),
                    role_id: s("r"),
                    project_id: s("p"),
                },
                "grant_user_security_role_project",
            ),
            (
                Operation::RevokeUserSecurityRoleProject {
                    user_id: s("u"),
                    role_id: s("r"),
                    project_id: s("p"),
                },
                "revoke_user_security_role_project",
            ),
            (Operation::AssumeUser { username: s("jane") }, "assume_user"),
            (Operation::UnAssumeUser, "un_assume_user"),
            (Operation::SendUserInvite { user_id: s("u") }, "send_user_invite"),
            (
                Operation::GrantApiKeyProject {
                    api_key_id: s("k"),
                    project_id: s("p"),
                },
                "grant_api_key_project",
            ),
            (
                Operation::RevokeApiKeyProject {
                    api_key_id: s("k"),
                    project_id: s("p"),
                },
                "revoke_api_key_project",
            ),
            (
                Operation::GrantApiKeySecurityRole {
                    api_key_id: s("k"),
                    role_id: s("r"),
                },
                "grant_api_key_security_role",
            ),
            (
                Operation::RevokeApiKeySecurityRole {
                    api_key_id: s("k"),
                    role_id: s("r"),
                },
                "revoke_api_key_security_role",
            ),
            (
                Operation::ConfigureOtp {
                    enabled: true,
                    user_id: None,
                },
                "configure_otp",
            ),
            (
                Operation::ConfigureTotp {
                    secret: s("ABC"),
                    code: s("123456"),
                },
                "configure_totp",
            ),
            (Operation::GenerateTotp, "generate_totp"),
            (Operation::Disable2fa { user_id: None }, "disable_2fa"),
            (
                Operation::GetUploadMetadata {
                    component_id: s("c"),
                    file_name: s("plate.exr"),
                    file_size: 1024,
                    parts: None,
                },
                "get_upload_metadata",
            ),
            (
                Operation::CompleteMultipartUpload {
                    component_id: s("c"),
                    upload_id: s("up"),
                    parts: Vec::new(),
                },
                "complete_multipart_upload",
            ),
            (Operation::generate_signed_url("c", None), "generate_signed_url"),
            (
                Operation::EncodeMedia {
                    component_id: s("c"),
                    version_id: None,
                    keep_original: None,
                    options: JsonMap::new(),
                },
                "encode_media",
            ),
            (
                Operation::ConvertEntity {
                    entity_type: s("Task"),
                    entity_id: s("t"),
                    target_type: s("Milestone"),
                },
                "convert_entity",
            ),
            (
                Operation::Permissions {
                    entity_type: None,
                    entity_id: None,
                    user_id: None,
                },
                "permissions",
            ),
            (Operation::StorageUsage { project_id: None }, "storage_usage"),
            (
                Operation::SendReviewSessionInvite {
                    review_session_invitee_id: s("i"),
                },
                "send_review_session_invite",
            ),
            (
                Operation::ResetRemote {
                    reset_type: ResetType::Password,
                    entity_type: s("User"),
                    entity_id: s("u"),
                },
                "reset_remote",
            ),
            (
                Operation::DelayedJob {
                    job_type: JobType::SyncDirectory,
                    options: JsonMap::new(),
                },
                "delayed_job",
            ),
        ]
    }

    #[test]
    fn test_action_literals() {
        let cases = every_variant();
        assert_eq!(cases.len(), 34);

        for (op, action) in cases {
            assert_eq!(wire(&op)["action"], action, "{:?}", op);
            assert_eq!(op.action(), action);
        }
    }

    #[test]
    fn test_unset_optionals_never_serialize_as_null() {
        for (op, action) in every_variant() {
            let value = wire(&op);
            for (key, field) in value.as_object().unwrap() {
                assert!(!field.is_null(), "{} sent `{}: null`", action, key);
            }
        }
    }

    #[test]
    fn test_reserved_option_keys_rejected() {
        let mut options = JsonMap::new();
        options.insert("review_session_id".into(), json!("rs1"));
        options.insert("job_type".into(), json!("delete"));
        let op = Operation::DelayedJob {
            job_type: JobType::ExportReviewFeedback,
            options,
        };
        let err = op.validate().unwrap_err();
        assert_eq!(err.to_string(), "option `job_type` is reserved for delayed_job");

        let mut options = JsonMap::new();
        options.insert("action".into(), json!("delete"));
        let op = Operation::EncodeMedia {
            component_id: s("c"),
            version_id: None,
            keep_original: None,
            options,
        };
        assert!(matches!(
            op.validate(),
            Err(ClientError::ReservedOption { action: "encode_media", .. })
        ));

        let mut options = JsonMap::new();
        options.insert("frame_rate".into(), json!(24));
        let op = Operation::EncodeMedia {
            component_id: s("c"),
            version_id: None,
            keep_original: None,
            options,
        };
        assert!(op.validate().is_ok());
        assert!(Operation::QuerySchemas.validate().is_ok());
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let op = Operation::Search {
            entity_type: "Task".into(),
            terms: vec!["lighting".into()],
            expression: None,
            context_id: None,
            object_type_ids: None,
        };
        let value = wire(&op);
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(!obj.contains_key("expression"));
        assert!(!obj.contains_key("context_id"));
        assert!(!obj.contains_key("object_type_ids"));

        let op = Operation::UpdateUserSecurityRole {
            user_id: "u".into(),
            role_id: "r".into(),
            is_all_projects: Some(false),
            is_all_open_projects: None,
        };
        assert_eq!(
            wire(&op),
            json!({
                "action": "update_user_security_role",
                "user_id": "u",
                "role_id": "r",
                "is_all_projects": false
            })
        );
    }

    #[test]
    fn test_update_wraps_id_in_key() {
        let mut data = JsonMap::new();
        data.insert("name".into(), json!("shot010"));
        let value = wire(&Operation::update("Shot", "abc", data));
        assert_eq!(value["entity_key"], json!(["abc"]));
        assert_eq!(value["entity_data"]["name"], "shot010");

        let value = wire(&Operation::delete("Shot", "abc"));
        assert_eq!(value, json!({"action": "delete", "entity_type": "Shot", "entity_key": ["abc"]}));
    }

    #[test]
    fn test_signed_url_defaults_to_get() {
        let value = wire(&Operation::generate_signed_url("c1", None));
        assert_eq!(value["operation"], "get");

        let value = wire(&Operation::generate_signed_url("c1", Some("put".into())));
        assert_eq!(value["operation"], "put");

        let parsed: Operation =
            serde_json::from_value(json!({"action": "generate_signed_url", "component_id": "c1"}))
                .unwrap();
        assert_eq!(parsed, Operation::generate_signed_url("c1", None));
    }

    #[test]
    fn test_options_are_merged_into_operation() {
        let mut options = JsonMap::new();
        options.insert("file_path".into(), json!("/tmp/import.csv"));
        let value = wire(&Operation::DelayedJob {
            job_type: JobType::CsvImport,
            options,
        });
        assert_eq!(
            value,
            json!({"action": "delayed_job", "job_type": "csv_import", "file_path": "/tmp/import.csv"})
        );

        let mut options = JsonMap::new();
        options.insert("priority".into(), json!(3));
        let value = wire(&Operation::EncodeMedia {
            component_id: "c1".into(),
            version_id: None,
            keep_original: Some(true),
            options,
        });
        assert_eq!(
            value,
            json!({"action": "encode_media", "component_id": "c1", "keep_original": true, "priority": 3})
        );
    }

    #[test]
    fn test_reset_type_literals() {
        let op = Operation::ResetRemote {
            reset_type: ResetType::ApiKey,
            entity_type: "User".into(),
            entity_id: "u1".into(),
        };
        assert_eq!(wire(&op)["reset_type"], "api_key");
        assert!(serde_json::from_value::<ResetType>(json!("token")).is_err());
    }

    #[test]
    fn test_operation_parses_back_from_wire() {
        let mut options = JsonMap::new();
        options.insert("project_id".into(), json!("p1"));
        let op = Operation::DelayedJob {
            job_type: JobType::ExportReviewFeedback,
            options,
        };
        let parsed: Operation = serde_json::from_value(wire(&op)).unwrap();
        assert_eq!(parsed, op);
    }
}
