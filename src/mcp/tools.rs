//! Tool descriptors and tool execution.
//!
//! Descriptors are static and built once per `tools/list` call; execution
//! never fails at the protocol level. A calculation error is reported as the
//! text of an ordinary result.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::mcp::ui::UiServer;
use crate::projectile::{distance_text, ProjectileArgs};

/// Name of the projectile range tool.
pub const CALCULATE_PROJECTILE: &str = "calculate_projectile";

/// Name of the UI launcher tool (only offered when a UI host is attached).
pub const LAUNCH_UI: &str = "launch_ui";

/// The tools this server knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// `calculate_projectile`
    CalculateProjectile,
    /// `launch_ui`
    LaunchUi,
}

impl Tool {
    /// Looks a tool up by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            CALCULATE_PROJECTILE => Some(Self::CalculateProjectile),
            LAUNCH_UI => Some(Self::LaunchUi),
            _ => None,
        }
    }
}

/// A tool definition for tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
}

impl ToolCallResult {
    /// Creates a single-item text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }
}

/// Returns the tools to advertise in `tools/list`.
#[must_use]
pub fn definitions(with_ui: bool) -> Vec<ToolDefinition> {
    let mut tools = vec![ToolDefinition {
        name: CALCULATE_PROJECTILE.to_string(),
        description: Some("Calculate projectile distance".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "initial_speed": { "type": "number" },
                "angle": { "type": "number" }
            },
            "required": ["initial_speed", "angle"]
        }),
    }];

    if with_ui {
        tools.push(ToolDefinition {
            name: LAUNCH_UI.to_string(),
            description: Some("Launch the calculator UI and return its URL".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "share": { "type": "boolean", "default": true }
                }
            }),
        });
    }

    tools
}

/// Runs `calculate_projectile` with the given JSON arguments.
#[must_use]
pub fn call_calculate_projectile(arguments: &Value) -> ToolCallResult {
    let outcome = ProjectileArgs::from_arguments(arguments).and_then(ProjectileArgs::distance);

    if let Err(ref e) = outcome {
        debug!(error = %e, "calculate_projectile failed");
    }

    ToolCallResult::text(distance_text(&outcome))
}

/// Runs `launch_ui`: starts the UI host once and reports where it lives.
#[must_use]
pub fn call_launch_ui(ui: &UiServer, arguments: &Value) -> ToolCallResult {
    let share = arguments
        .get("share")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    ToolCallResult::text(format!("UI launched at: {}", ui.start(share)))
}
