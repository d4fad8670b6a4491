//! tooldesk MCP server: entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use tooldesk_mcp::config::resolve_toolset;
use tooldesk_mcp::protocol::ProtocolHandler;
use tooldesk_mcp::tools::Toolset;
use tooldesk_mcp::transport::StdioTransport;
use tooldesk_mcp::types::InitializeResult;

#[derive(Parser)]
#[command(
    name = "tooldesk-mcp",
    about = "MCP tool server for the tooldesk support desk, shop, and demo tools",
    version
)]
struct Cli {
    /// Tool set to serve. Also reads TOOLDESK_TOOLSET; defaults to support.
    #[arg(short, long, global = true, value_enum)]
    toolset: Option<Toolset>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Start MCP server over HTTP.
    #[cfg(feature = "http")]
    ServeHttp {
        /// Listen address (host:port). Also reads TOOLDESK_ADDR.
        #[arg(long)]
        addr: Option<String>,

        /// Bearer token for authentication.
        /// Also reads from TOOLDESK_TOKEN env var.
        #[arg(long)]
        token: Option<String>,
    },

    /// Invoke one tool and print its result.
    ///
    /// Exits with status 1 when the tool reports a failure.
    Call {
        /// Tool name.
        tool: String,

        /// Arguments as a JSON object.
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Print server capabilities and the selected tool set as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   tooldesk-mcp completions bash > ~/.local/share/bash-completion/completions/tooldesk-mcp
    ///   tooldesk-mcp completions zsh > ~/.zfunc/_tooldesk-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let toolset = resolve_toolset(cli.toolset)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("tooldesk MCP server ({toolset})");
            let handler = ProtocolHandler::new(toolset.service()?);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        #[cfg(feature = "http")]
        Commands::ServeHttp { addr, token } => {
            use tooldesk_mcp::config::{resolve_addr, resolve_token};
            use tooldesk_mcp::transport::HttpTransport;

            let addr = resolve_addr(addr.as_deref());
            let token = resolve_token(token);

            tracing::info!("tooldesk MCP server ({toolset})");
            if token.is_some() {
                tracing::info!("Auth: bearer token required");
            }

            let handler = ProtocolHandler::new(toolset.service()?);
            let transport = HttpTransport::new(handler, toolset.name(), token);
            transport.run(&addr).await?;
        }

        Commands::Call { tool, args } => {
            let arguments: serde_json::Value = serde_json::from_str(&args)
                .map_err(|e| anyhow::anyhow!("--args is not valid JSON: {e}"))?;

            let service = toolset.service()?;
            let result = service.call(&tool, Some(arguments)).await;

            if result.is_error() {
                eprintln!("Error: {}", result.joined_text());
                std::process::exit(1);
            }
            println!("{}", result.joined_text());
        }

        Commands::Info => {
            let capabilities = InitializeResult::default_result();
            let tools = toolset.definitions()?;
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "toolset": toolset.name(),
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tooldesk-mcp", &mut std::io::stdout());
        }

        Commands::Repl => {
            let runtime = tokio::runtime::Handle::current();
            tokio::task::spawn_blocking(move || tooldesk_mcp::repl::run(toolset, runtime))
                .await??;
        }
    }

    Ok(())
}
