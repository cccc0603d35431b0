//! Server info resource definition.

use serde_json::json;

use super::ResourceDefinition;
use crate::core::config::Config;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Connection details of this server (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "ftrack://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str =
        "The MCP server version, the ftrack server it talks to and the API user it acts as";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

impl ServerInfoResource {
    /// Render the document. The API key is never included.
    pub fn render(config: &Config, tool_count: usize) -> Result<String, ResourceError> {
        let info = json!({
            "server": config.server.name,
            "version": config.server.version,
            "ftrack": {
                "server_url": config.ftrack.server_url(),
                "api_user": config.ftrack.api_user(),
            },
            "transport": config.transport.description(),
            "tool_count": tool_count,
        });
        Ok(serde_json::to_string_pretty(&info)?)
    }
}
