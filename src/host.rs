//! Capabilities the popup needs from its environment
//!
//! [`BrowserHost`] covers tabs and script injection, [`Clipboard`] the system
//! clipboard and [`Prompter`] the modal confirm/notice dialogs. The CDP-backed
//! [`crate::BrowserSession`] and [`crate::clipboard::SystemClipboard`] are the
//! production implementations.

use crate::error::{BrowserError, Result};
use crate::page::PageRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};
use url::Url;

/// URL schemes whose pages may never be scripted
pub const DENIED_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "chrome-search",
    "chrome-untrusted",
    "devtools",
    "edge",
    "view-source",
];

/// Opaque identifier of a browser tab (the CDP target id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active tab as reported by the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
}

/// Tab access and script injection
pub trait BrowserHost {
    /// The tab the user is looking at
    fn active_tab(&self) -> Result<TabInfo>;

    /// Run `request` inside the page of `tab` and return its raw answer
    fn execute(&self, tab: &TabId, request: &PageRequest) -> Result<serde_json::Value>;

    /// Open `url` in a new tab, focusing it only when `active` is set
    fn create_tab(&self, url: &str, active: bool) -> Result<()>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Blocking modal dialogs
pub trait Prompter {
    /// Ask a yes/no question; `false` means declined
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a notice the user has to acknowledge
    fn notify(&mut self, message: &str);
}

/// Reject tabs whose URL is privileged or unparseable before anything is injected
pub fn check_scriptable(url: &str, denied_schemes: &[String]) -> Result<()> {
    let denied = match Url::parse(url) {
        Ok(parsed) => denied_schemes.iter().any(|scheme| scheme.eq_ignore_ascii_case(parsed.scheme())),
        Err(e) => {
            log::debug!("Tab URL '{}' does not parse: {}", url, e);
            true
        }
    };

    if denied { Err(BrowserError::ScriptingDenied { url: url.to_string() }) } else { Ok(()) }
}

/// Dialogs on a terminal: questions are answered with `y`/`yes`
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line of user input; `None` at end of input
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        let _ = write!(self.output, "{} [y/N] ", message);
        let _ = self.output.flush();

        self.read_line()
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn notify(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }
}

/// Dialogs answered up front, with every message kept for inspection
///
/// Used where no one can be asked interactively, e.g. behind the MCP server.
#[derive(Debug, Clone, Default)]
pub struct PresetPrompter {
    answer: bool,
    pub questions: Vec<String>,
    pub notices: Vec<String>,
}

impl PresetPrompter {
    pub fn new(answer: bool) -> Self {
        Self { answer, questions: Vec::new(), notices: Vec::new() }
    }
}

impl Prompter for PresetPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied() -> Vec<String> {
        DENIED_SCHEMES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_privileged_schemes_are_denied() {
        for url in ["chrome://settings", "chrome-extension://abc/popup.html", "edge://newtab", "CHROME://history"] {
            let err = check_scriptable(url, &denied()).unwrap_err();
            assert!(matches!(err, BrowserError::ScriptingDenied { .. }), "{} should be denied", url);
        }
    }

    #[test]
    fn test_web_pages_are_scriptable() {
        for url in ["https://example.com", "http://localhost:3000/x", "file:///tmp/a.html", "about:blank"] {
            assert!(check_scriptable(url, &denied()).is_ok(), "{} should be scriptable", url);
        }
    }

    #[test]
    fn test_unparseable_url_is_denied() {
        assert!(check_scriptable("", &denied()).is_err());
        assert!(check_scriptable("not a url", &denied()).is_err());
    }

    #[test]
    fn test_terminal_confirm() {
        let mut output = Vec::new();
        let mut prompter = TerminalPrompter::new("yes\n".as_bytes(), &mut output);
        assert!(prompter.confirm("Open 2 links?"));
        assert_eq!(String::from_utf8(output).unwrap(), "Open 2 links? [y/N] ");
    }

    #[test]
    fn test_terminal_confirm_declines_by_default() {
        let mut prompter = TerminalPrompter::new("\n".as_bytes(), Vec::new());
        assert!(!prompter.confirm("Open 2 links?"));

        let mut prompter = TerminalPrompter::new("".as_bytes(), Vec::new());
        assert!(!prompter.confirm("Open 2 links?"));
    }

    #[test]
    fn test_preset_prompter_records() {
        let mut prompter = PresetPrompter::new(false);
        assert!(!prompter.confirm("Sure?"));
        prompter.notify("Done");
        assert_eq!(prompter.questions, vec!["Sure?"]);
        assert_eq!(prompter.notices, vec!["Done"]);
    }
}
