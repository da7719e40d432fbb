//! The popup: one session of inspecting the active tab's links
//!
//! [`Popup::open`] finds the active tab, refuses privileged pages, extracts the
//! links and renders them. Only a popup that got that far accepts events; a
//! denied popup shows its message and a popup whose extraction failed shows an
//! empty list, and both ignore everything else.

pub mod command;

pub use command::{Command, parse_command};

use crate::actions::{self, OpenAllOutcome};
use crate::error::{BrowserError, Result};
use crate::host::{BrowserHost, Clipboard, DENIED_SCHEMES, Prompter, TabInfo, check_scriptable};
use crate::links::{Category, FilterState, LinkSet, OriginMatcher, OriginPolicy, filter_links};
use crate::page::{PageRequest, PageResponse};
use crate::render::{ListView, Renderer};

pub const DENIED_MESSAGE: &str = "Cannot access links on this page.";

/// Settings for a popup session
#[derive(Debug, Clone)]
pub struct PopupConfig {
    pub origin_policy: OriginPolicy,
    pub denied_schemes: Vec<String>,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            origin_policy: OriginPolicy::default(),
            denied_schemes: DENIED_SCHEMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PopupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }

    pub fn denied_schemes(mut self, schemes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.denied_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }
}

/// User input the popup reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    SetCategory(Category),
    SetSearch(String),
    CopyAll,
    OpenAll,
    /// Activate the entry at this position of the rendered list
    Select(usize),
}

/// Whether the popup stays open after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

/// Everything an event handler may touch
pub struct PopupContext<'a> {
    pub host: &'a dyn BrowserHost,
    pub clipboard: &'a mut dyn Clipboard,
    pub prompter: &'a mut dyn Prompter,
    pub view: &'a mut dyn ListView,
}

/// State of a popup whose page could be scripted
#[derive(Debug, Clone)]
pub struct Session {
    active_tab: TabInfo,
    links: LinkSet,
    filter: FilterState,
    origin: OriginMatcher,
    visible: LinkSet,
}

impl Session {
    fn new(active_tab: TabInfo, links: LinkSet, policy: &OriginPolicy) -> Self {
        let origin = policy.matcher(&active_tab.url);
        let visible = links.clone();
        Self { active_tab, links, filter: FilterState::default(), origin, visible }
    }

    pub fn active_tab(&self) -> &TabInfo {
        &self.active_tab
    }

    /// Every link extracted from the page
    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The links currently shown
    pub fn visible(&self) -> &LinkSet {
        &self.visible
    }

    fn refilter(&mut self) {
        self.visible = filter_links(&self.links, self.filter.category, &self.filter.search, &self.origin);
    }
}

#[derive(Debug, Clone)]
pub enum Popup {
    /// The page may not be scripted; only the message is shown
    Denied { message: String },
    /// The page was scripted but gave no usable answer; the list stays empty
    Empty { active_tab: TabInfo },
    Ready(Session),
}

impl Popup {
    /// Open a popup over the active tab and render its links
    ///
    /// Fails only when there is no active tab at all. A privileged page yields
    /// [`Popup::Denied`]; a page whose extraction fails yields [`Popup::Empty`].
    /// A page without anchors is still a [`Popup::Ready`] session.
    pub fn open(host: &dyn BrowserHost, config: &PopupConfig, view: &mut dyn ListView) -> Result<Self> {
        let tab = host.active_tab()?;

        if let Err(e) = check_scriptable(&tab.url, &config.denied_schemes) {
            log::info!("{}", e);
            Renderer::render_error(view, DENIED_MESSAGE);
            return Ok(Popup::Denied { message: DENIED_MESSAGE.to_string() });
        }

        let links = match extract_links(host, &tab) {
            Ok(links) => links,
            Err(e) => {
                log::warn!("No links from {}: {}", tab.url, e);
                Renderer::render_links(view, &LinkSet::default());
                return Ok(Popup::Empty { active_tab: tab });
            }
        };
        log::debug!("Extracted {} links from {}", links.len(), tab.url);

        let session = Session::new(tab, links, &config.origin_policy);
        Renderer::render_links(view, session.visible());
        Ok(Popup::Ready(session))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Popup::Ready(session) => Some(session),
            Popup::Denied { .. } | Popup::Empty { .. } => None,
        }
    }

    /// The inspected tab, unless the page was refused
    pub fn active_tab(&self) -> Option<&TabInfo> {
        match self {
            Popup::Ready(session) => Some(session.active_tab()),
            Popup::Empty { active_tab } => Some(active_tab),
            Popup::Denied { .. } => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Popup::Denied { .. })
    }

    /// React to one user event
    pub fn handle(&mut self, event: PopupEvent, ctx: &mut PopupContext<'_>) -> Flow {
        let session = match self {
            Popup::Ready(session) => session,
            Popup::Denied { .. } => {
                log::debug!("Ignoring {:?} on a denied page", event);
                return Flow::Continue;
            }
            Popup::Empty { .. } => {
                log::debug!("Ignoring {:?} after a failed extraction", event);
                return Flow::Continue;
            }
        };

        match event {
            PopupEvent::SetCategory(category) => {
                session.filter.category = category;
                session.refilter();
                Renderer::render_links(ctx.view, session.visible());
            }
            PopupEvent::SetSearch(search) => {
                session.filter.search = search;
                session.refilter();
                Renderer::render_links(ctx.view, session.visible());
            }
            PopupEvent::CopyAll => {
                actions::copy_all(&session.links, ctx.clipboard, ctx.prompter);
            }
            PopupEvent::OpenAll => {
                if let OpenAllOutcome::Opened(count) = actions::open_all(&session.links, ctx.host, ctx.prompter) {
                    log::debug!("Opened {} of {} links", count, session.links.len());
                }
            }
            PopupEvent::Select(index) => {
                let Some(link) = session.visible.get(index) else {
                    log::debug!("No entry at position {}", index);
                    return Flow::Continue;
                };

                // The popup closes right away; a missing link or a failed injection goes unreported
                if let Err(e) = actions::highlight_and_open(ctx.host, &session.active_tab.id, &link.href) {
                    log::warn!("Highlight of {} failed: {}", link.href, e);
                }
                return Flow::Close;
            }
        }

        Flow::Continue
    }
}

fn extract_links(host: &dyn BrowserHost, tab: &TabInfo) -> Result<LinkSet> {
    let request = PageRequest::ExtractLinks;
    let raw = host.execute(&tab.id, &request)?;

    match request.decode(raw)? {
        PageResponse::Links(links) => Ok(links),
        other => Err(BrowserError::ExtractionFailed(format!("Unexpected answer: {:?}", other))),
    }
}
