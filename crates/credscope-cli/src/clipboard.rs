//! System clipboard backed by arboard.

use anyhow::{Context, Result};
use credscope_core::Clipboard;

/// Connects per copy; a missing display server only fails the copy
/// action, never the dashboard itself.
#[derive(Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard.set_text(text).context("failed to write clipboard")
    }
}
