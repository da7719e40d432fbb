//! tab-links MCP Server
//!
//! Exposes the links of the active browser tab as Model Context Protocol tools.

use clap::{Parser, ValueEnum};
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager};
use tab_links::{ConnectionOptions, LaunchOptions, LinkServer, OriginPolicy, PopupConfig, ServiceExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "tab-links-mcp")]
#[command(version)]
#[command(about = "Link extraction MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<String>,

    /// WebSocket endpoint URL for remote browser connection
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<String>,

    /// Classify internal links against the inspected page instead of the popup origin
    #[arg(long)]
    page_origin: bool,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn server(&self) -> tab_links::Result<LinkServer> {
        let server = match &self.ws_endpoint {
            Some(endpoint) => LinkServer::connect(ConnectionOptions::new(endpoint.clone()))?,
            None => {
                let mut options = LaunchOptions::new().headless(!self.headed);
                if let Some(path) = &self.executable_path {
                    options = options.chrome_path(path);
                }
                if let Some(dir) = &self.user_data_dir {
                    options = options.user_data_dir(dir);
                }
                LinkServer::with_options(options)?
            }
        };

        let mut config = PopupConfig::default();
        if self.page_origin {
            config = config.origin_policy(OriginPolicy::Page);
        }
        Ok(server.with_config(config))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    log::info!("tab-links MCP Server v{}", env!("CARGO_PKG_VERSION"));

    match cli.transport {
        Transport::Stdio => {
            let service = cli.server().map_err(|e| format!("Failed to create link server: {}", e))?;
            eprintln!("Ready to accept MCP connections via stdio");
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            log::info!("Server quit with reason: {:?}", quit_reason);
        }
        Transport::Http => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);
            let http_path = cli.http_path.clone();

            // One browser per MCP session
            let service_factory =
                move || cli.server().map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));

            let http_service =
                StreamableHttpService::new(service_factory, LocalSessionManager::default().into(), Default::default());

            let router = axum::Router::new().nest_service(&http_path, http_service);

            eprintln!("Ready to accept MCP connections at http://{}{}", bind_addr, http_path);

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
