//! Upload, media encoding and storage tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::common::FtrackTool;
use crate::client::{ENCODE_MEDIA_RESERVED, FtrackClient, JsonMap, reserved_option};
use crate::domains::tools::error::{ToolError, ToolResult};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UploadMetadataParams {
    /// Component id the file belongs to.
    pub component_id: String,

    /// File name including extension.
    pub file_name: String,

    /// File size in bytes.
    pub file_size: u64,

    /// Number of parts for a multipart upload.
    #[serde(default)]
    pub parts: Option<u32>,
}

/// Upload URL and headers for a component file.
pub struct GetUploadMetadataTool;

#[async_trait]
impl FtrackTool for GetUploadMetadataTool {
    const NAME: &'static str = "get_upload_metadata";
    const DESCRIPTION: &'static str = "Get the URL and headers needed to upload a component file to server storage. Pass parts for a multipart upload.";
    type Params = UploadMetadataParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .get_upload_metadata(
                params.component_id,
                params.file_name,
                params.file_size,
                params.parts,
            )
            .await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompleteMultipartParams {
    /// Component id.
    pub component_id: String,

    /// Upload id returned by get_upload_metadata.
    pub upload_id: String,

    /// Uploaded parts, e.g. [{"part_number": 1, "e_tag": "..."}].
    pub parts: Vec<Value>,
}

pub struct CompleteMultipartUploadTool;

#[async_trait]
impl FtrackTool for CompleteMultipartUploadTool {
    const NAME: &'static str = "complete_multipart_upload";
    const DESCRIPTION: &'static str = "Finish a multipart upload once every part has been uploaded.";
    type Params = CompleteMultipartParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .complete_multipart_upload(params.component_id, params.upload_id, params.parts)
            .await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SignedUrlParams {
    /// Component id.
    pub component_id: String,

    /// Storage operation the URL is for. Defaults to "get".
    #[serde(default)]
    pub operation: Option<String>,
}

pub struct GenerateSignedUrlTool;

#[async_trait]
impl FtrackTool for GenerateSignedUrlTool {
    const NAME: &'static str = "generate_signed_url";
    const DESCRIPTION: &'static str =
        "Generate a time-limited signed URL for a component stored on the server (download by default).";
    type Params = SignedUrlParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client
            .generate_signed_url(params.component_id, params.operation)
            .await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EncodeMediaParams {
    /// Component id of the source media.
    pub component_id: String,

    /// Asset version to attach the encoded media to.
    #[serde(default)]
    pub version_id: Option<String>,

    /// Keep the original file as a component.
    #[serde(default)]
    pub keep_original: Option<bool>,

    /// Additional encoding options, merged into the operation. May not contain
    /// `action`, `component_id`, `version_id` or `keep_original`.
    #[serde(default)]
    pub options: JsonMap,
}

pub struct EncodeMediaTool;

#[async_trait]
impl FtrackTool for EncodeMediaTool {
    const NAME: &'static str = "encode_media";
    const DESCRIPTION: &'static str =
        "Start a server-side job encoding a media component into web-playable reviewable formats.";
    type Params = EncodeMediaParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        if let Some(key) = reserved_option(&params.options, ENCODE_MEDIA_RESERVED) {
            return Err(ToolError::invalid_arguments(format!(
                "option `{}` would override an encode_media field",
                key
            )));
        }
        Ok(client
            .encode_media(
                params.component_id,
                params.version_id,
                params.keep_original,
                params.options,
            )
            .await?)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StorageUsageParams {
    /// Restrict to one project.
    #[serde(default)]
    pub project_id: Option<String>,
}

pub struct StorageUsageTool;

#[async_trait]
impl FtrackTool for StorageUsageTool {
    const NAME: &'static str = "storage_usage";
    const DESCRIPTION: &'static str = "Report server storage usage, overall or for one project.";
    type Params = StorageUsageParams;

    async fn execute(client: &FtrackClient, params: Self::Params) -> ToolResult<Value> {
        Ok(client.storage_usage(params.project_id).await?)
    }
}
