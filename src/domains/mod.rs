//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: `tools` exposes the ftrack API, `resources` exposes read-only
//! documents about the connection and the query language.

pub mod resources;
pub mod tools;
