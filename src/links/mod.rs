//! Link model and filtering
//!
//! - Link / LinkSet: what the page extractor returns, in document order
//! - filter: category and search filtering over a LinkSet

pub mod filter;
pub mod link;

pub use filter::{Category, DEFAULT_POPUP_ORIGIN, FilterState, OriginMatcher, OriginPolicy, filter_links};
pub use link::{Link, LinkSet};
