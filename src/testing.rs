//! In-memory hosts for unit tests

use crate::error::{BrowserError, Result};
use crate::host::{BrowserHost, Clipboard, TabId, TabInfo};
use crate::links::{Link, LinkSet};
use crate::page::PageRequest;
use serde_json::{Value, json};
use std::cell::RefCell;

/// A single-tab browser whose page holds `anchors`
pub struct FakeHost {
    url: String,
    anchors: Vec<Link>,
    extraction_breaks: bool,
    requests: RefCell<Vec<PageRequest>>,
    created: RefCell<Vec<(String, bool)>>,
    highlighted: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new(url: &str, anchors: Vec<Link>) -> Self {
        Self {
            url: url.to_string(),
            anchors,
            extraction_breaks: false,
            requests: RefCell::new(Vec::new()),
            created: RefCell::new(Vec::new()),
            highlighted: RefCell::new(Vec::new()),
        }
    }

    /// The page script runs but returns nothing
    pub fn with_broken_extraction(mut self) -> Self {
        self.extraction_breaks = true;
        self
    }

    pub fn tab_id(&self) -> TabId {
        TabId("tab-1".to_string())
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.borrow().clone()
    }

    pub fn created_tabs(&self) -> Vec<(String, bool)> {
        self.created.borrow().clone()
    }

    pub fn highlighted(&self) -> Vec<String> {
        self.highlighted.borrow().clone()
    }
}

impl BrowserHost for FakeHost {
    fn active_tab(&self) -> Result<TabInfo> {
        Ok(TabInfo { id: self.tab_id(), url: self.url.clone() })
    }

    fn execute(&self, tab: &TabId, request: &PageRequest) -> Result<Value> {
        if *tab != self.tab_id() {
            return Err(BrowserError::TabOperationFailed(format!("Tab {} is gone", tab)));
        }
        self.requests.borrow_mut().push(request.clone());

        match request {
            PageRequest::ExtractLinks if self.extraction_breaks => Ok(Value::Null),
            PageRequest::ExtractLinks => {
                let links = LinkSet::new(self.anchors.clone());
                Ok(Value::String(serde_json::to_string(&links)?))
            }
            PageRequest::HighlightAndOpen { href } => {
                let found = self.anchors.iter().any(|a| a.href == *href);
                if found {
                    self.highlighted.borrow_mut().push(href.clone());
                }
                Ok(Value::String(json!({ "found": found }).to_string()))
            }
        }
    }

    fn create_tab(&self, url: &str, active: bool) -> Result<()> {
        self.created.borrow_mut().push((url.to_string(), active));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub contents: Option<String>,
    denied: bool,
}

impl FakeClipboard {
    pub fn denied() -> Self {
        Self { contents: None, denied: true }
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.denied {
            return Err(BrowserError::ClipboardWriteFailed("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
