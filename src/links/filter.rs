use crate::error::BrowserError;
use crate::links::link::{Link, LinkSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Origin the popup itself runs under when none is configured
pub const DEFAULT_POPUP_ORIGIN: &str = "chrome-extension://tab-links";

/// Which links a filter keeps, relative to the reference origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Internal,
    External,
}

impl FromStr for Category {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Category::All),
            "internal" => Ok(Category::Internal),
            "external" => Ok(Category::External),
            other => Err(BrowserError::InvalidArgument(format!(
                "unknown category '{}' (expected all, internal or external)",
                other
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::All => "all",
            Category::Internal => "internal",
            Category::External => "external",
        })
    }
}

/// Current filter selection, reset for every popup session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Category,
    pub search: String,
}

impl FilterState {
    pub fn new(category: Category, search: impl Into<String>) -> Self {
        Self { category, search: search.into() }
    }
}

/// Which origin decides whether a link is internal
///
/// `Popup` compares against the popup's own origin, which is how the extension
/// popup has always behaved even though it rarely matches any page link.
/// `Page` compares against the inspected tab instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum OriginPolicy {
    Popup { origin: String },
    Page,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        OriginPolicy::Popup { origin: DEFAULT_POPUP_ORIGIN.to_string() }
    }
}

impl OriginPolicy {
    /// Build the matcher for a session inspecting `page_url`
    pub fn matcher(&self, page_url: &str) -> OriginMatcher {
        match self {
            OriginPolicy::Popup { origin } => OriginMatcher::new(origin),
            OriginPolicy::Page => OriginMatcher::new(page_url),
        }
    }
}

/// scheme, host, port
type OriginKey = (String, String, Option<u16>);

fn origin_key(raw: &str) -> Option<OriginKey> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    Some((url.scheme().to_string(), host, url.port_or_known_default()))
}

/// Classifies hrefs as internal or external against one reference origin
///
/// Origins are compared by scheme, host and port. `url::Origin` is not used
/// because non-special schemes like `chrome-extension` have opaque origins that
/// never compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginMatcher {
    reference: Option<OriginKey>,
}

impl OriginMatcher {
    pub fn new(reference_url: &str) -> Self {
        let reference = origin_key(reference_url);
        if reference.is_none() {
            log::debug!("No usable origin in '{}', every link counts as external", reference_url);
        }
        Self { reference }
    }

    pub fn is_internal(&self, href: &str) -> bool {
        match (&self.reference, origin_key(href)) {
            (Some(reference), Some(key)) => *reference == key,
            _ => false,
        }
    }

    fn matches(&self, category: Category, link: &Link) -> bool {
        match category {
            Category::All => true,
            Category::Internal => self.is_internal(&link.href),
            Category::External => !self.is_internal(&link.href),
        }
    }
}

/// Derive the subset of `links` matching both the category and the search term
///
/// The search is a case-insensitive substring match on text or href. An empty
/// term matches everything. Input order is preserved.
pub fn filter_links(links: &LinkSet, category: Category, search: &str, origin: &OriginMatcher) -> LinkSet {
    let needle = search.to_lowercase();

    links
        .iter()
        .filter(|link| origin.matches(category, link))
        .filter(|link| {
            needle.is_empty()
                || link.text.to_lowercase().contains(&needle)
                || link.href.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
