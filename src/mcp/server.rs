//! MCP server implementation for the projectile calculator.
//!
//! The server reads one JSON-RPC message per line, routes it through a fixed
//! method table and writes at most one reply line. Exactly one line is in
//! flight at a time, so replies leave in the order their requests arrived.
//!
//! A line that cannot be parsed is logged to stderr and dropped; nothing is
//! written for it. The loop ends when the input closes or, when running on
//! stdio, on SIGINT/SIGTERM (Ctrl+C on Windows).

use std::io;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::{
    parse_message, ErrorCode, IncomingMessage, JsonRpcError, JsonRpcErrorData, JsonRpcResponse,
    OutgoingMessage, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::tools::{self, Tool};
use crate::mcp::transport::{LineTransport, StdioTransport};
use crate::mcp::ui::UiServer;

/// Where the server is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Created, loop not started.
    Idle,
    /// Reading requests.
    Serving,
    /// Input closed or shutdown requested.
    Stopped,
}

/// Server information for initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

/// What a method handler wants written back.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A `result` member.
    Result(Value),
    /// An `error` member.
    Error(JsonRpcErrorData),
    /// Nothing, even if the message carried an `id`.
    Silent,
}

type MethodHandler = fn(&McpServer, &IncomingMessage) -> Reply;

/// Method name to handler. Anything not listed is "Method not found".
const METHODS: &[(&str, MethodHandler)] = &[
    ("initialize", McpServer::handle_initialize),
    ("notifications/initialized", McpServer::handle_initialized),
    ("tools/list", McpServer::handle_tools_list),
    ("tools/call", McpServer::handle_tools_call),
    ("resources/list", McpServer::handle_empty_list),
    ("prompts/list", McpServer::handle_empty_list),
];

/// The MCP server for the projectile calculator.
#[derive(Debug)]
pub struct McpServer {
    /// Current server state.
    state: ServerState,
    /// Name reported in `serverInfo`.
    server_name: String,
    /// Optional UI host behind the `launch_ui` tool.
    ui: Option<UiServer>,
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new(SERVER_NAME)
    }
}

impl McpServer {
    /// Creates a server that reports `server_name` during initialisation.
    #[must_use]
    pub fn new(server_name: impl Into<String>) -> Self {
        Self {
            state: ServerState::Idle,
            server_name: server_name.into(),
            ui: None,
        }
    }

    /// Attaches a UI host and enables the `launch_ui` tool.
    #[must_use]
    pub fn with_ui(mut self, ui: UiServer) -> Self {
        self.ui = Some(ui);
        self
    }

    /// Returns the current server state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Runs the server on stdin/stdout with graceful shutdown handling.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin fails for a reason other than a
    /// malformed line.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut transport = StdioTransport::stdio();
        self.state = ServerState::Serving;
        let result = self.run_with_shutdown(&mut transport).await;
        self.state = ServerState::Stopped;
        result
    }

    /// Runs the loop over an arbitrary transport until its input closes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails for a reason other than a malformed
    /// line.
    pub async fn serve<R, W>(&mut self, transport: &mut LineTransport<R, W>) -> io::Result<()>
    where
        R: tokio::io::AsyncBufRead + Unpin,
        W: tokio::io::AsyncWrite + Unpin,
    {
        self.state = ServerState::Serving;
        let result = loop {
            let line_result = transport.read_line().await;
            match self.handle_transport_result(line_result, transport).await {
                Ok(false) => {}
                Ok(true) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.state = ServerState::Stopped;
        result
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(unix)]
    async fn run_with_shutdown(&self, transport: &mut StdioTransport) -> io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(io::Error::other)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(io::Error::other)?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, initiating graceful shutdown");
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    info!("Received SIGTERM, initiating graceful shutdown");
                    return Ok(());
                }

                line_result = transport.read_line() => {
                    if self.handle_transport_result(line_result, transport).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(windows)]
    async fn run_with_shutdown(&self, transport: &mut StdioTransport) -> io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    return Ok(());
                }

                line_result = transport.read_line() => {
                    if self.handle_transport_result(line_result, transport).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handles the result from transport read.
    ///
    /// Returns `true` if the server should shut down.
    async fn handle_transport_result<R, W>(
        &self,
        line_result: io::Result<Option<String>>,
        transport: &mut LineTransport<R, W>,
    ) -> io::Result<bool>
    where
        R: tokio::io::AsyncBufRead + Unpin,
        W: tokio::io::AsyncWrite + Unpin,
    {
        let line = match line_result {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("Input closed");
                return Ok(true);
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %e, "Dropping unreadable input line");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if let Some(reply) = self.handle_line(&line) {
            if let Err(e) = transport.write_message(&reply).await {
                error!(error = %e, id = %reply.id(), "Failed to write response");
            }
        }

        Ok(false)
    }

    /// Handles a single line of input, returning the reply to write, if any.
    ///
    /// Blank lines are ignored; malformed lines are logged and dropped.
    #[must_use]
    pub fn handle_line(&self, line: &str) -> Option<OutgoingMessage> {
        if line.trim().is_empty() {
            return None;
        }

        match parse_message(line) {
            Ok(msg) => self.handle_message(&msg),
            Err(e) => {
                warn!(error = %e, "Dropping malformed input line");
                None
            }
        }
    }

    /// Dispatches a parsed message. Only messages with an `id` get a reply.
    #[must_use]
    pub fn handle_message(&self, msg: &IncomingMessage) -> Option<OutgoingMessage> {
        let method = msg.method();
        debug!(method, id = ?msg.id(), "Dispatching");

        let reply = METHODS
            .iter()
            .find(|(name, _)| *name == method)
            .map_or_else(
                || Reply::Error(JsonRpcErrorData::method_not_found(method)),
                |(_, handler)| handler(self, msg),
            );

        let id = msg.id()?.clone();

        match reply {
            Reply::Result(result) => Some(JsonRpcResponse::success(id, result).into()),
            Reply::Error(error) => Some(JsonRpcError::new(id, error).into()),
            Reply::Silent => None,
        }
    }

    /// Handles the initialize request.
    fn handle_initialize(&self, _msg: &IncomingMessage) -> Reply {
        let server_info = ServerInfo {
            name: self.server_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Reply::Result(json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "serverInfo": server_info,
            "capabilities": {},
        }))
    }

    /// Handles the initialized notification; never answered.
    fn handle_initialized(&self, _msg: &IncomingMessage) -> Reply {
        debug!("Client initialised");
        Reply::Silent
    }

    /// Handles the tools/list request.
    fn handle_tools_list(&self, _msg: &IncomingMessage) -> Reply {
        Reply::Result(json!({
            "tools": tools::definitions(self.ui.is_some()),
        }))
    }

    /// Handles the tools/call request.
    ///
    /// A name that matches no available tool is answered exactly like an
    /// unknown method, naming `tools/call`.
    fn handle_tools_call(&self, msg: &IncomingMessage) -> Reply {
        let params = msg.params();
        let name = params.and_then(|p| p.get("name")).and_then(Value::as_str);
        let no_arguments = Value::Null;
        let arguments = params
            .and_then(|p| p.get("arguments"))
            .unwrap_or(&no_arguments);

        let result = match (name.and_then(Tool::from_name), &self.ui) {
            (Some(Tool::CalculateProjectile), _) => tools::call_calculate_projectile(arguments),
            (Some(Tool::LaunchUi), Some(ui)) => tools::call_launch_ui(ui, arguments),
            (Some(Tool::LaunchUi), None) | (None, _) => {
                debug!(tool = ?name, "No such tool");
                return Reply::Error(JsonRpcErrorData::method_not_found(msg.method()));
            }
        };

        match serde_json::to_value(&result) {
            Ok(value) => Reply::Result(value),
            Err(e) => {
                error!(error = %e, "Failed to serialise tool call result");
                Reply::Error(JsonRpcErrorData::with_message(
                    ErrorCode::InternalError,
                    "Internal error: failed to serialise result",
                ))
            }
        }
    }

    /// Handles `resources/list` and `prompts/list`: an empty list keyed by
    /// the method's first path segment.
    fn handle_empty_list(&self, msg: &IncomingMessage) -> Reply {
        let key = msg.method().split('/').next().unwrap_or_default();
        let mut result = serde_json::Map::new();
        result.insert(key.to_string(), json!([]));
        Reply::Result(Value::Object(result))
    }
}
