//! Debounced server-side search input.
//!
//! Keystrokes update a pending query; the query fires only once the
//! input has been quiet for [`QUIET_INTERVAL`], and only when it is
//! empty (clear-filter) or at least [`MIN_QUERY_LEN`] characters.
//! Typing again supersedes the pending query, so it never fires.

use std::time::{Duration, Instant};

pub const QUIET_INTERVAL: Duration = Duration::from_millis(300);

/// Shorter pending text (other than empty) never reaches the backend.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug)]
struct Pending {
    text: String,
    deadline: Instant,
}

#[derive(Debug)]
pub struct SearchDebounce {
    committed: String,
    pending: Option<Pending>,
    quiet: Duration,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchDebounce {
    pub fn new() -> Self {
        Self::with_quiet(QUIET_INTERVAL)
    }

    pub fn with_quiet(quiet: Duration) -> Self {
        Self {
            committed: String::new(),
            pending: None,
            quiet,
        }
    }

    /// The text of the last query actually issued.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a keystroke: the full current input replaces any pending
    /// query and restarts the quiet interval.
    pub fn update(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: now + self.quiet,
        });
    }

    /// Returns the query to issue once the quiet interval has elapsed
    /// and the length gate passes. Gated-out pending text is dropped
    /// without firing.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if !self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            return None;
        }
        let pending = self.pending.take()?;
        self.commit(&pending.text).then_some(pending.text)
    }

    /// Immediately commit `text` (used by an explicit submit), applying
    /// the same length gate. Clears any pending query either way.
    pub fn commit(&mut self, text: &str) -> bool {
        self.pending = None;
        if text.is_empty() || text.chars().count() >= MIN_QUERY_LEN {
            self.committed = text.to_string();
            true
        } else {
            false
        }
    }

    /// Drop the pending query without firing (prompt cancelled).
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
