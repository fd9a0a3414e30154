//! Model Context Protocol (MCP) server implementation.
//!
//! This module exposes the projectile calculator as an MCP tool. The server
//! communicates over stdio transport using JSON-RPC 2.0 messages, one per
//! line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MCP Server                          │
//! │                                                             │
//! │   ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    │
//! │   │  Transport  │───▶│   Server    │───▶│   Tools     │    │
//! │   │   (lines)   │    │ (method tbl)│    │  (handlers) │    │
//! │   └─────────────┘    └─────────────┘    └─────────────┘    │
//! │          │                  │                  │            │
//! │          ▼                  ▼                  ▼            │
//! │   ┌─────────────────────────────────────────────────┐      │
//! │   │              JSON-RPC Messages                  │      │
//! │   └─────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Supported Methods
//!
//! `initialize`, `notifications/initialized`, `tools/list`, `tools/call`,
//! `resources/list` and `prompts/list`. Everything else is answered with
//! `-32601`.
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;
pub mod ui;

pub use protocol::{JsonRpcError, JsonRpcResponse, OutgoingMessage, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::{LineTransport, StdioTransport};
pub use ui::{UiHost, UiServer};
