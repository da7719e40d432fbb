use serde::{Deserialize, Serialize};

/// A hyperlink found in the inspected page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Resolved absolute destination URL
    pub href: String,

    /// Visible text of the anchor, possibly empty
    #[serde(default)]
    pub text: String,
}

impl Link {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self { href: href.into(), text: text.into() }
    }

    /// Text shown for this link in a list: the trimmed anchor text, or the href
    /// when that is blank
    pub fn label(&self) -> &str {
        let text = self.text.trim();
        if text.is_empty() { &self.href } else { text }
    }
}

/// Links in document order
///
/// A `LinkSet` is never edited in place. Filtering derives a new set and leaves
/// the source untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkSet {
    links: Vec<Link>,
}

impl LinkSet {
    pub fn new(links: Vec<Link>) -> Self {
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }

    /// All hrefs joined by newlines, the clipboard form of the set
    pub fn joined_hrefs(&self) -> String {
        self.links.iter().map(|link| link.href.as_str()).collect::<Vec<_>>().join("\n")
    }
}

impl FromIterator<Link> for LinkSet {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Self { links: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_href() {
        assert_eq!(Link::new("https://a.com/1", "One").label(), "One");
        assert_eq!(Link::new("https://a.com/2", "").label(), "https://a.com/2");
    }

    #[test]
    fn test_label_trims_anchor_text() {
        assert_eq!(Link::new("https://a.com/1", "\n  One \t").label(), "One");
        assert_eq!(Link::new("https://a.com/2", " \n ").label(), "https://a.com/2");
    }

    #[test]
    fn test_joined_hrefs() {
        let set = LinkSet::new(vec![Link::new("https://a.com/1", "One"), Link::new("https://b.com", "")]);
        assert_eq!(set.joined_hrefs(), "https://a.com/1\nhttps://b.com");
        assert_eq!(LinkSet::default().joined_hrefs(), "");
    }

    #[test]
    fn test_deserialize_missing_text() {
        let set: LinkSet = serde_json::from_str(r#"[{"href": "https://a.com"}, {"href": "https://b.com", "text": "B"}]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().text, "");
        assert_eq!(set.get(1).unwrap().label(), "B");
    }
}
