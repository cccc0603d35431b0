//! ftrack MCP Server Library
//!
//! This crate exposes the operations of an ftrack production-tracking server
//! as Model Context Protocol (MCP) tools.
//!
//! # Architecture
//!
//! - **client**: the ftrack API client. One HTTP call per batch of typed
//!   operations, with positional result mapping.
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: MCP-facing capabilities
//!   - **tools**: one tool per ftrack operation plus query-building conveniences
//!   - **resources**: server information and a query language guide
//!
//! # Example
//!
//! ```rust,no_run
//! use ftrack_mcp_server::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use client::{ClientError, FtrackClient, Operation};
pub use core::{Config, Error, McpServer, Result};
