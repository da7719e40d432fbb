use crate::links::LinkSet;
use serde::Serialize;
use std::io::Write;

/// One row of the visible link list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// A selectable link; `index` is its position in the rendered list
    Link {
        index: usize,
        label: String,
        href: String,
        /// Open in a new browsing context when activated directly
        new_context: bool,
    },
    /// A non-interactive message row
    Message { text: String },
}

/// Something that displays the rendered list
///
/// Every call replaces whatever was shown before.
pub trait ListView {
    fn replace(&mut self, entries: &[Entry]);
}

/// Builds list entries from link sets
pub struct Renderer;

impl Renderer {
    pub fn entries(links: &LinkSet) -> Vec<Entry> {
        links
            .iter()
            .enumerate()
            .map(|(index, link)| Entry::Link {
                index,
                label: link.label().to_string(),
                href: link.href.clone(),
                new_context: true,
            })
            .collect()
    }

    pub fn render_links(view: &mut dyn ListView, links: &LinkSet) {
        view.replace(&Self::entries(links));
    }

    /// Replace the list with a single message row
    pub fn render_error(view: &mut dyn ListView, message: &str) {
        view.replace(&[Entry::Message { text: message.to_string() }]);
    }
}

/// Keeps the last rendering in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    pub entries: Vec<Entry>,
    pub renders: usize,
}

impl ListView for MemoryView {
    fn replace(&mut self, entries: &[Entry]) {
        self.entries = entries.to_vec();
        self.renders += 1;
    }
}

/// Prints the list as numbered lines, numbering from 1
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ListView for TerminalView<W> {
    fn replace(&mut self, entries: &[Entry]) {
        let mut text = String::new();
        for entry in entries {
            match entry {
                Entry::Link { index, label, href, .. } if label == href => {
                    text.push_str(&format!("{:>4}. {}\n", index + 1, href));
                }
                Entry::Link { index, label, href, .. } => {
                    text.push_str(&format!("{:>4}. {}\n      {}\n", index + 1, label, href));
                }
                Entry::Message { text: message } => {
                    text.push_str(&format!("      {}\n", message));
                }
            }
        }
        if entries.is_empty() {
            text.push_str("      (no links)\n");
        }

        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            log::warn!("Failed to print link list: {}", e);
        }
    }
}
