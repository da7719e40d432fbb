use crate::browser::{BrowserSession, ConnectionOptions, LaunchOptions};
use crate::popup::PopupConfig;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// MCP server that opens a fresh popup over the active tab for every tool call
#[derive(Clone)]
pub struct LinkServer {
    session: Arc<Mutex<BrowserSession>>,
    config: PopupConfig,
    tool_router: ToolRouter<Self>,
}

impl LinkServer {
    pub fn new(session: BrowserSession, config: PopupConfig) -> Self {
        Self { session: Arc::new(Mutex::new(session)), config, tool_router: Self::tool_router() }
    }

    /// Launch a browser and serve its tabs
    pub fn with_options(options: LaunchOptions) -> crate::Result<Self> {
        Ok(Self::new(BrowserSession::launch(options)?, PopupConfig::default()))
    }

    /// Attach to a running browser and serve its tabs
    pub fn connect(options: ConnectionOptions) -> crate::Result<Self> {
        Ok(Self::new(BrowserSession::connect(options)?, PopupConfig::default()))
    }

    pub fn with_config(mut self, config: PopupConfig) -> Self {
        self.config = config;
        self
    }

    pub(crate) fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub(crate) fn session(&self) -> std::result::Result<MutexGuard<'_, BrowserSession>, McpError> {
        self.session
            .lock()
            .map_err(|e| McpError::internal_error(format!("Browser session unavailable: {}", e), None))
    }
}

#[tool_handler]
impl ServerHandler for LinkServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Lists the hyperlinks of the active browser tab with optional category/search filters, \
                 copies or opens them, and highlights-then-opens a single link in the page."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
