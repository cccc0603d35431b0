//! Transport layer for the MCP server.
//!
//! - **STDIO**: standard input/output, the default MCP mode (feature `stdio`)
//! - **TCP**: line-delimited JSON-RPC over a TCP socket (feature `tcp`)
//!
//! Each transport handles the connection lifecycle and hands every session
//! to the same [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
