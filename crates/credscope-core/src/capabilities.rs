//! Injected side-effect capabilities.
//!
//! Notifications and the clipboard are handed to the session as
//! interfaces so the core logic runs and tests without a terminal.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Sink for transient user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier backed by a shared queue; the UI drains it every tick.
#[derive(Clone, Default)]
pub struct NoticeBuffer {
    inner: Arc<Mutex<VecDeque<Notice>>>,
}

impl NoticeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.inner.lock().drain(..).collect()
    }
}

impl Notifier for NoticeBuffer {
    fn notify(&self, notice: Notice) {
        self.inner.lock().push_back(notice);
    }
}

/// Destination for copied field values.
pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// In-memory clipboard for tests and headless runs. Clones share the
/// same buffer so a test can keep a handle after moving one into a
/// session.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}
