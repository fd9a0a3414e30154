//! projectile-mcp: projectile range calculator exposed as an MCP tool.
//!
//! The same calculation is reachable three ways:
//!
//! - **Direct call**: [`projectile::calculate_projectile`] and its text/JSON
//!   wrappers
//! - **Interactive form**: a terminal prompt for speed and angle
//! - **MCP server**: line-delimited JSON-RPC over stdio offering the
//!   `calculate_projectile` tool
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`interactive`] — Terminal form
//! - [`mcp`] — MCP protocol implementation
//! - [`projectile`] — The range formula

pub mod config;
pub mod error;
pub mod interactive;
pub mod mcp;
pub mod projectile;
