//! Tool definitions module.
//!
//! Pass-through tools map one-to-one onto API actions; derived tools build a
//! fixed query or payload and delegate to a generic action.

pub mod api_keys;
pub mod auth;
pub mod common;
pub mod entity;
pub mod jobs;
pub mod lookups;
pub mod media;
pub mod notes;
pub mod projects;
pub mod reviews;
pub mod security;
pub mod tasks;
pub mod users;
pub mod versions;

pub use api_keys::{
    GrantApiKeyProjectTool, GrantApiKeySecurityRoleTool, RevokeApiKeyProjectTool,
    RevokeApiKeySecurityRoleTool,
};
pub use auth::{ConfigureOtpTool, ConfigureTotpTool, Disable2faTool, GenerateTotpTool};
pub use common::{FtrackTool, NoParams};
pub use entity::{
    BatchTool, ConvertEntityTool, CreateTool, DeleteTool, GetEntityTool, ParseQueryTool,
    QuerySchemasTool, QueryServerInformationTool, QueryTool, SearchTool, UpdateTool,
};
pub use jobs::DelayedJobTool;
pub use lookups::{ListPrioritiesTool, ListSecurityRolesTool, ListStatusesTool, ListTypesTool};
pub use media::{
    CompleteMultipartUploadTool, EncodeMediaTool, GenerateSignedUrlTool, GetUploadMetadataTool,
    StorageUsageTool,
};
pub use notes::{CreateNoteTool, ListNotesTool};
pub use projects::ListProjectsTool;
pub use reviews::{ListReviewSessionsTool, SendReviewSessionInviteTool};
pub use security::{
    AddUserSecurityRoleTool, AssumeUserTool, GrantUserSecurityRoleProjectTool, PermissionsTool,
    RemoveUserSecurityRoleTool, ResetRemoteTool, RevokeUserSecurityRoleProjectTool,
    SendUserInviteTool, UnAssumeUserTool, UpdateUserSecurityRoleTool,
};
pub use tasks::{AssignUserToTaskTool, ListTasksTool, UpdateTaskStatusTool};
pub use users::ListUsersTool;
pub use versions::ListAssetVersionsTool;
