//! MCP (Model Context Protocol) server for link extraction
//!
//! Each tool call is one popup session: it opens over the active tab, applies
//! the requested filter, performs at most one action and reports what the
//! popup showed. Dialogs are answered up front by the caller's parameters.

pub mod handler;
pub use handler::LinkServer;

use crate::clipboard::SystemClipboard;
use crate::host::PresetPrompter;
use crate::links::Category;
use crate::popup::{Flow, Popup, PopupContext, PopupEvent};
use crate::render::MemoryView;
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Filter applied before listing or selecting
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FilterParams {
    /// One of "all", "internal", "external" (default: "all")
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive text matched against link text and URL
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterParams {
    fn events(&self) -> Result<Vec<PopupEvent>, McpError> {
        let mut events = Vec::new();
        if let Some(category) = &self.category {
            let category: Category = category.parse().map_err(|e: crate::BrowserError| McpError::invalid_params(e.to_string(), None))?;
            events.push(PopupEvent::SetCategory(category));
        }
        if let Some(search) = &self.search {
            events.push(PopupEvent::SetSearch(search.clone()));
        }
        Ok(events)
    }
}

/// Open-all parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OpenAllParams {
    /// Answer to "open N links?"; nothing is opened unless true
    #[serde(default)]
    pub confirm: bool,
}

/// Highlight parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightParams {
    /// Zero-based position in the filtered list, as reported by links_list
    pub index: usize,
    #[serde(flatten)]
    pub filter: FilterParams,
}

impl LinkServer {
    /// Run one popup session and report its final state as JSON
    fn run_popup(&self, filter: &FilterParams, action: Option<PopupEvent>, confirm: bool) -> Result<CallToolResult, McpError> {
        let events = filter.events()?;
        let session = self.session()?;

        let mut view = MemoryView::default();
        let mut popup =
            Popup::open(&*session, self.config(), &mut view).map_err(|e| McpError::internal_error(e.to_string(), None))?;

        // Dropping the clipboard after the call hands the text to the desktop clipboard manager
        let mut clipboard = SystemClipboard::new();
        let mut prompter = PresetPrompter::new(confirm);
        let mut context =
            PopupContext { host: &*session, clipboard: &mut clipboard, prompter: &mut prompter, view: &mut view };

        for event in events {
            popup.handle(event, &mut context);
        }
        let flow = action.map(|event| popup.handle(event, &mut context));

        let report = serde_json::json!({
            "url": popup.active_tab().map(|t| t.url.clone()),
            "denied": popup.is_denied(),
            "extracted": popup.session().is_some(),
            "total": popup.session().map(|s| s.links().len()).unwrap_or(0),
            "entries": view.entries,
            "questions": prompter.questions,
            "notices": prompter.notices,
            "closed": flow == Some(Flow::Close),
        });

        let text = serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_router]
impl LinkServer {
    /// List the links of the active tab
    #[tool(description = "List the hyperlinks of the active browser tab, optionally filtered by category (all/internal/external) and search text")]
    fn links_list(&self, params: Parameters<FilterParams>) -> Result<CallToolResult, McpError> {
        self.run_popup(&params.0, None, false)
    }

    /// Copy every link to the clipboard
    #[tool(description = "Copy every link of the active tab to the system clipboard, one URL per line")]
    fn links_copy(&self) -> Result<CallToolResult, McpError> {
        self.run_popup(&FilterParams::default(), Some(PopupEvent::CopyAll), false)
    }

    /// Open every link in background tabs
    #[tool(description = "Open every link of the active tab in background tabs; requires confirm=true")]
    fn links_open_all(&self, params: Parameters<OpenAllParams>) -> Result<CallToolResult, McpError> {
        self.run_popup(&FilterParams::default(), Some(PopupEvent::OpenAll), params.0.confirm)
    }

    /// Blink one link in the page, then open it
    #[tool(description = "Scroll to one link in the page, blink it for 3 seconds, then open it in a new tab")]
    fn links_highlight(&self, params: Parameters<HighlightParams>) -> Result<CallToolResult, McpError> {
        let HighlightParams { index, filter } = params.0;
        self.run_popup(&filter, Some(PopupEvent::Select(index)), false)
    }
}
