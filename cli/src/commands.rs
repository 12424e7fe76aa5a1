//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for arclang-mcp
#[derive(Parser, Debug)]
#[command(name = "arclang-mcp")]
#[command(author, version, about = "MCP server for the ArcLang systems-engineering compiler")]
#[command(long_about = r#"
arclang-mcp serves the ArcLang compiler to MCP clients over stdio.

Tools cover compilation, validation, traceability, diagram export, safety
and hazard analysis, PLM sync, and generation of requirements, components
and architecture suggestions.

Configuration files are loaded from (in priority order):
1. --config <path>                         Explicit config file
2. <workspace>/.arclang-mcp.toml           Workspace config
3. ~/.config/arclang-mcp/config.toml       Global config

Environment overrides: ARCLANG_BINARY, ANTHROPIC_API_KEY, ARCLANG_WORKSPACE,
and ARCLANG_MCP_<SECTION>__<KEY> for any config key.

Example:
  arclang-mcp --workspace ./models
  arclang-mcp -vv --log-file /tmp/arclang-mcp.log
  arclang-mcp --list-tools
"#)]
pub struct Cli {
    /// Directory containing the models (default: ARCLANG_WORKSPACE or cwd)
    #[arg(short, long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show configuration sources and the resolved configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Print the tool catalogue as JSON, then exit
    #[arg(long)]
    pub list_tools: bool,
}
