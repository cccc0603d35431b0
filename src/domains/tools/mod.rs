//! Tools domain module.
//!
//! Tools are the callable surface of the server: each one maps onto an ftrack
//! API action or a fixed query built from a few typed parameters.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations grouped by API area
//! - `registry.rs` - Tool catalogue and direct dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Implement [`definitions::FtrackTool`] for a unit struct in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add `ToolEntry::of::<MyTool>()` to `registry::all_entries`
//!
//! The router and server pick it up from the registry.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::{ToolError, ToolResult};
pub use registry::{ToolEntry, ToolHandler, ToolRegistry, all_entries};
pub use router::build_tool_router;
