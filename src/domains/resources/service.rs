//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::definitions::ServerInfoResource;
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::Config;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Server configuration, rendered by dynamic resources.
    config: Arc<Config>,

    /// Number of tools the server exposes.
    tool_count: usize,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: HashMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Dynamic content that requires computation.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy)]
pub enum DynamicResourceType {
    /// Server and ftrack connection information.
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService.
    pub fn new(config: Arc<Config>, tool_count: usize) -> Self {
        debug!("Initializing ResourceService");

        let mut service = Self {
            config,
            tool_count,
            resources: HashMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources, sorted by URI.
    pub async fn list_resources(&self) -> Vec<Resource> {
        let mut resources: Vec<Resource> = self
            .resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect();
        resources.sort_by(|a, b| a.raw.uri.cmp(&b.raw.uri));
        resources
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = match &entry.content {
            ResourceContent::Text(text) => text.clone(),
            ResourceContent::Dynamic(DynamicResourceType::ServerInfo) => {
                ServerInfoResource::render(&self.config, self.tool_count)?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text,
                meta: None,
            }],
        })
    }
}
