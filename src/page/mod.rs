//! Requests that run inside the inspected page
//!
//! The page and the caller share nothing. A [`PageRequest`] names an operation
//! and carries its arguments; it is rendered to a self-contained script, and the
//! page answers with plain JSON that [`PageRequest::decode`] turns into a
//! [`PageResponse`].

pub mod highlight;

pub use highlight::{BLINK_DURATION, BLINK_INTERVAL, BLINK_TICKS, HighlightOutcome, HighlightState, blink_pattern};

use crate::error::{BrowserError, Result};
use crate::links::LinkSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const EXTRACT_LINKS_JS: &str = include_str!("extract_links.js");
const HIGHLIGHT_LINK_JS: &str = include_str!("highlight_link.js");

/// An operation to execute in the page context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageRequest {
    /// Collect every anchor in document order; no arguments
    ExtractLinks,
    /// Find the first anchor whose resolved href equals `href`, blink it, then open it
    HighlightAndOpen { href: String },
}

/// Decoded answer to a [`PageRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    Links(LinkSet),
    Highlight(HighlightOutcome),
}

#[derive(Deserialize)]
struct HighlightReply {
    found: bool,
}

impl PageRequest {
    pub fn name(&self) -> &'static str {
        match self {
            PageRequest::ExtractLinks => "extract_links",
            PageRequest::HighlightAndOpen { .. } => "highlight_and_open",
        }
    }

    /// Render the request as a JavaScript expression for `Runtime.evaluate`
    ///
    /// Arguments are embedded as JSON literals so page-controlled strings can
    /// never break out of the call.
    pub fn to_script(&self) -> Result<String> {
        match self {
            PageRequest::ExtractLinks => Ok(format!("({})()", EXTRACT_LINKS_JS.trim())),
            PageRequest::HighlightAndOpen { href } => Ok(format!(
                "({})({}, {}, {})",
                HIGHLIGHT_LINK_JS.trim(),
                serde_json::to_string(href)?,
                BLINK_INTERVAL.as_millis(),
                serde_json::to_string(&blink_pattern())?
            )),
        }
    }

    /// Turn the page's raw answer into a typed response
    ///
    /// Scripts answer with a JSON string; an already structured value is accepted too.
    pub fn decode(&self, value: Value) -> Result<PageResponse> {
        let value = match value {
            Value::Null => {
                return Err(BrowserError::ExtractionFailed(format!("No value returned from {}", self.name())));
            }
            Value::String(json_str) => serde_json::from_str(&json_str)?,
            other => other,
        };

        match self {
            PageRequest::ExtractLinks => {
                let links: LinkSet = serde_json::from_value(value)
                    .map_err(|e| BrowserError::ExtractionFailed(format!("Failed to parse links: {}", e)))?;
                Ok(PageResponse::Links(links))
            }
            PageRequest::HighlightAndOpen { .. } => {
                let reply: HighlightReply = serde_json::from_value(value)?;
                Ok(PageResponse::Highlight(HighlightOutcome::from_found(reply.found)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::Link;
    use serde_json::json;

    #[test]
    fn test_extract_script_is_called_without_arguments() {
        let script = PageRequest::ExtractLinks.to_script().unwrap();
        assert!(script.starts_with("((function"));
        assert!(script.ends_with(")()"));
        assert!(script.contains("querySelectorAll('a')"));
    }

    #[test]
    fn test_highlight_script_embeds_json_argument() {
        let request = PageRequest::HighlightAndOpen { href: "https://a.com/\"');alert(1)//".to_string() };
        let script = request.to_script().unwrap();

        assert!(script.ends_with(r#"("https://a.com/\"');alert(1)//", 500, [true,false,true,false,true,false])"#));
    }

    #[test]
    fn test_decode_links_from_string() {
        let raw = Value::String(r#"[{"href":"https://a.com/1","text":"One"},{"href":"https://a.com/2","text":""}]"#.to_string());
        let response = PageRequest::ExtractLinks.decode(raw).unwrap();

        assert_eq!(
            response,
            PageResponse::Links(LinkSet::new(vec![Link::new("https://a.com/1", "One"), Link::new("https://a.com/2", "")]))
        );
    }

    #[test]
    fn test_decode_links_from_object() {
        let response = PageRequest::ExtractLinks.decode(json!([])).unwrap();
        assert_eq!(response, PageResponse::Links(LinkSet::default()));
    }

    #[test]
    fn test_decode_null_is_extraction_failure() {
        let err = PageRequest::ExtractLinks.decode(Value::Null).unwrap_err();
        assert!(matches!(err, BrowserError::ExtractionFailed(_)));
    }

    #[test]
    fn test_decode_malformed_links() {
        let err = PageRequest::ExtractLinks.decode(json!({"links": 3})).unwrap_err();
        assert!(matches!(err, BrowserError::ExtractionFailed(_)));
    }

    #[test]
    fn test_decode_highlight() {
        let request = PageRequest::HighlightAndOpen { href: "https://a.com".to_string() };

        assert_eq!(
            request.decode(Value::String(r#"{"found":false}"#.to_string())).unwrap(),
            PageResponse::Highlight(HighlightOutcome::NotFound)
        );
        assert_eq!(
            request.decode(json!({"found": true})).unwrap(),
            PageResponse::Highlight(HighlightOutcome::Scheduled)
        );
    }

    #[test]
    fn test_request_wire_form() {
        let request = PageRequest::HighlightAndOpen { href: "https://a.com".to_string() };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"op": "highlight_and_open", "href": "https://a.com"}));
    }
}
