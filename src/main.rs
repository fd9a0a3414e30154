//! projectile-mcp: projectile range calculator as an MCP server.
//!
//! With piped stdin the process speaks line-delimited JSON-RPC on
//! stdin/stdout. On a terminal it runs an interactive form instead.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use projectile_mcp::config;
use projectile_mcp::interactive;
use projectile_mcp::mcp::server::McpServer;

/// How the process talks to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Interactive on a terminal, MCP otherwise.
    Auto,
    /// MCP JSON-RPC over stdin/stdout.
    Stdio,
    /// Terminal form.
    Interactive,
}

/// Projectile range calculator exposed as an MCP tool.
///
/// Pipe JSON-RPC into stdin to use it as an MCP server, or run it in a
/// terminal for an interactive calculator.
#[derive(Parser, Debug)]
#[command(name = "projectile-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,

    /// Select the front end
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Print JSON reports instead of text in interactive mode
    #[arg(long)]
    json: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
///
/// Always stderr: stdout carries protocol messages.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves `auto` against whether stdin is a terminal.
fn resolve_mode(mode: Mode, stdin_is_terminal: bool) -> Mode {
    match mode {
        Mode::Auto if stdin_is_terminal => Mode::Interactive,
        Mode::Auto => Mode::Stdio,
        other => other,
    }
}

/// Entry point for the projectile-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if config_path.is_none() {
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("\nConfig read from: {}", default_path.display());
                    eprintln!("See config/example-config.json for the format");
                }
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    match resolve_mode(args.mode, std::io::stdin().is_terminal()) {
        Mode::Interactive => run_interactive(args.json),
        Mode::Stdio | Mode::Auto => run_server(cfg.server_name),
    }
}

fn run_interactive(json: bool) -> ExitCode {
    let stdin = std::io::stdin();
    match interactive::run_prompt(stdin.lock(), std::io::stdout(), json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Interactive session failed");
            ExitCode::FAILURE
        }
    }
}

fn run_server(server_name: String) -> ExitCode {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        server_name = %server_name,
        "Starting projectile-mcp server"
    );

    let mut server = McpServer::new(server_name);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!("MCP server ready, waiting for requests...");

    match runtime.block_on(server.run()) {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
