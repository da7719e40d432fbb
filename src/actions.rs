//! Bulk and single-link actions
//!
//! Failures are handled here and surfaced as notices; nothing escapes as a
//! fault except a broken page boundary in [`highlight_and_open`].

use crate::error::{BrowserError, Result};
use crate::host::{BrowserHost, Clipboard, Prompter, TabId};
use crate::links::LinkSet;
use crate::page::{HighlightOutcome, PageRequest, PageResponse};

pub const COPY_SUCCESS_NOTICE: &str = "Links copied to clipboard!";
pub const COPY_FAILURE_NOTICE: &str = "Failed to copy links.";

/// Result of [`open_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAllOutcome {
    Declined,
    /// Number of tabs actually created
    Opened(usize),
}

pub fn open_all_question(count: usize) -> String {
    format!("Are you sure you want to open {} links?", count)
}

/// Write every href, one per line, to the clipboard and tell the user how it went
///
/// Returns whether the clipboard was written.
pub fn copy_all(links: &LinkSet, clipboard: &mut dyn Clipboard, prompter: &mut dyn Prompter) -> bool {
    match clipboard.write_text(&links.joined_hrefs()) {
        Ok(()) => {
            log::debug!("Copied {} links", links.len());
            prompter.notify(COPY_SUCCESS_NOTICE);
            true
        }
        Err(e) => {
            log::warn!("{}", e);
            prompter.notify(COPY_FAILURE_NOTICE);
            false
        }
    }
}

/// Open every link as a background tab after the user confirms the exact count
///
/// A tab that fails to open is logged and skipped.
pub fn open_all(links: &LinkSet, host: &dyn BrowserHost, prompter: &mut dyn Prompter) -> OpenAllOutcome {
    if !prompter.confirm(&open_all_question(links.len())) {
        return OpenAllOutcome::Declined;
    }

    let mut opened = 0;
    for link in links {
        match host.create_tab(&link.href, false) {
            Ok(()) => opened += 1,
            Err(e) => log::warn!("Failed to open {}: {}", link.href, e),
        }
    }

    OpenAllOutcome::Opened(opened)
}

/// Ask the page in `tab` to blink the anchor pointing at `href`, then open it
///
/// The page runs the blink-then-open sequence on its own timers; this returns as
/// soon as the page has accepted the request.
pub fn highlight_and_open(host: &dyn BrowserHost, tab: &TabId, href: &str) -> Result<HighlightOutcome> {
    let request = PageRequest::HighlightAndOpen { href: href.to_string() };
    let raw = host.execute(tab, &request)?;

    match request.decode(raw)? {
        PageResponse::Highlight(outcome) => {
            log::debug!("Highlight of {} in tab {}: {:?} -> {:?}", href, tab, outcome, outcome.trace());
            Ok(outcome)
        }
        other => Err(BrowserError::EvaluationFailed(format!("Unexpected answer to highlight request: {:?}", other))),
    }
}
