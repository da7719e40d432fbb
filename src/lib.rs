//! # tab-links
//!
//! Pull every hyperlink out of the active browser tab, filter and search them,
//! and act on them in bulk, over the Chrome DevTools Protocol (CDP).
//!
//! ## Features
//!
//! - **Link extraction**: every anchor of the active tab, in document order, with resolved URLs
//! - **Filtering**: internal/external category plus case-insensitive search
//! - **Actions**: copy all links, open all in background tabs, or blink one link in the page and open it
//! - **MCP Server**: the same popup exposed as Model Context Protocol tools
//!
//! ## Running
//!
//! ```bash
//! # Launch a browser, load a page and browse its links interactively
//! cargo run --bin tab-links -- --headed --url https://www.rust-lang.org
//!
//! # Attach to a running Chrome (started with --remote-debugging-port=9222)
//! cargo run --bin tab-links -- --ws-endpoint ws://127.0.0.1:9222/devtools/browser/<id> --list
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use tab_links::{BrowserSession, LaunchOptions, Popup, PopupConfig, PopupContext, PopupEvent};
//! use tab_links::clipboard::SystemClipboard;
//! use tab_links::host::PresetPrompter;
//! use tab_links::links::Category;
//! use tab_links::render::MemoryView;
//!
//! # fn main() -> tab_links::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//!
//! let mut view = MemoryView::default();
//! let mut popup = Popup::open(&session, &PopupConfig::default(), &mut view)?;
//!
//! let mut clipboard = SystemClipboard::new();
//! let mut prompter = PresetPrompter::new(true);
//! let mut context = PopupContext { host: &session, clipboard: &mut clipboard, prompter: &mut prompter, view: &mut view };
//! popup.handle(PopupEvent::SetCategory(Category::External), &mut context);
//!
//! println!("{} external links", view.entries.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`host`]: Capabilities the popup needs (tabs, clipboard, dialogs)
//! - [`links`]: Link model and filtering
//! - [`page`]: Requests executed inside the inspected page
//! - [`render`]: List rendering
//! - [`actions`]: Copy, open-all and highlight-and-open
//! - [`popup`]: The session orchestrator
//! - [`mcp`]: Model Context Protocol server (requires `mcp-handler` feature)

pub mod actions;
pub mod browser;
pub mod clipboard;
pub mod error;
pub mod host;
pub mod links;
pub mod page;
pub mod popup;
pub mod render;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

#[cfg(test)]
mod testing;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use error::{BrowserError, Result};
pub use host::{BrowserHost, Clipboard, Prompter, TabId, TabInfo};
pub use links::{Category, FilterState, Link, LinkSet, OriginPolicy};
pub use popup::{Flow, Popup, PopupConfig, PopupContext, PopupEvent, Session};

#[cfg(feature = "mcp-handler")]
pub use mcp::LinkServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
