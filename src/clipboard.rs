use crate::error::{BrowserError, Result};
use crate::host::Clipboard;

/// System clipboard backed by `arboard`
///
/// The handle is opened on first write and kept, since on X11/Wayland the
/// copied text is only served while a handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| BrowserError::ClipboardWriteFailed(e.to_string()))?,
        };
        let clipboard = self.inner.insert(clipboard);

        clipboard.set_text(text).map_err(|e| BrowserError::ClipboardWriteFailed(e.to_string()))
    }
}
