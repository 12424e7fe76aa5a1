//! CLI entrypoint for arclang-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection and serves MCP on stdin/stdout.

mod commands;

use anyhow::{Context, Result, anyhow, bail};
use arclang_mcp_application::{
    CompilerFacade, GenerationCapability, GenerationFacade, ToolDispatcher, ToolSchemaPort,
};
use arclang_mcp_domain::default_tool_spec;
use arclang_mcp_infrastructure::config::FileAiConfig;
use arclang_mcp_infrastructure::{
    AnthropicBackend, AnthropicSettings, ConfigLoader, FileConfig, JsonSchemaToolConverter,
    McpServer, TokioProcessRunner,
};
use clap::Parser;
use commands::Cli;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_tools {
        let tools = JsonSchemaToolConverter.all_tools_schema(&default_tool_spec());
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    // stdout carries the protocol, so logs go to stderr or a file
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting arclang-mcp");

    let workspace = ConfigLoader::resolve_workspace(cli.workspace.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(&workspace, cli.config.as_deref());
    }

    // === Load Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(&workspace, cli.config.as_deref())
    }
    .context("Failed to load configuration")?;

    // The command line wins over files and ARCLANG_WORKSPACE
    if let Some(dir) = &cli.workspace {
        config.workspace.root = Some(dir.clone());
    }

    check_config(&config)?;

    if cli.show_config {
        println!();
        println!("Resolved configuration:");
        let mut shown = config.clone();
        if shown.ai.api_key.is_some() {
            shown.ai.api_key = Some("<redacted>".to_string());
        }
        println!("{}", toml::to_string_pretty(&shown)?);
        return Ok(());
    }

    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let settings = config.to_settings(&base);

    check_compiler(&settings.compiler.binary);

    // === Dependency Injection ===
    let runner = Arc::new(
        TokioProcessRunner::new().with_working_dir(settings.compiler.workspace_root.clone()),
    );
    info!(
        workspace = %settings.compiler.workspace_root.display(),
        binary = %settings.compiler.binary,
        timeout_secs = settings.compiler.timeout.as_secs(),
        "Compiler configured"
    );
    let compiler = CompilerFacade::new(runner, settings.compiler.clone());
    let generation = GenerationFacade::new(select_capability(&config.ai), settings.generation);
    let dispatcher = ToolDispatcher::new(compiler, generation, settings.defaults);

    let server = McpServer::new(Arc::new(dispatcher), Arc::new(JsonSchemaToolConverter))
        .with_server_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    info!("arclang-mcp stopped");
    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count. The returned guard must
/// live until exit so buffered lines are flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<WorkerGuard> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(log_file.is_none())
        .with_writer(writer)
        .init();

    Ok(guard)
}

/// Log every config issue; refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!(field = %issue.field, "{}", issue.message);
        } else {
            warn!(field = %issue.field, "{}", issue.message);
        }
    }

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration: {}", errors.join("; "));
    }
    Ok(())
}

/// A missing compiler is not fatal; calls will report launch failures.
fn check_compiler(binary: &str) {
    match which::which(binary) {
        Ok(path) => info!(binary = %path.display(), "Found ArcLang compiler"),
        Err(e) => warn!(
            binary,
            error = %e,
            "ArcLang compiler not found; compiler tools will fail until it is installed"
        ),
    }
}

/// Use the Anthropic backend when a key is configured, templates otherwise.
fn select_capability(ai: &FileAiConfig) -> GenerationCapability {
    let Some(key) = ai.api_key() else {
        info!("No API key configured, generation will use templates");
        return GenerationCapability::Fallback;
    };
    if !ai.is_supported_provider() {
        warn!(
            provider = %ai.provider,
            "Unsupported text backend provider, generation will use templates"
        );
        return GenerationCapability::Fallback;
    }

    let settings = AnthropicSettings {
        base_url: ai.base_url.clone(),
        api_version: ai.api_version.clone(),
        request_timeout: Duration::from_secs(ai.request_timeout),
        ..AnthropicSettings::new(key)
    };
    match AnthropicBackend::new(&settings) {
        Ok(backend) => GenerationCapability::Backend(Arc::new(backend)),
        Err(e) => {
            warn!(error = %e, "Text backend unavailable, generation will use templates");
            GenerationCapability::Fallback
        }
    }
}
