//! Debounced search input

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Collects keystrokes and releases the term once typing pauses.
///
/// Time is passed in explicitly so the UI loop owns the clock.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    draft: String,
    committed: String,
    deadline: Option<Instant>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            draft: String::new(),
            committed: String::new(),
            deadline: None,
        }
    }

    /// Text currently in the search box.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Term of the last released search.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn is_waiting(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record the new box content; restarts the window.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.draft = term.into();
        self.deadline = Some(now + self.delay);
    }

    /// Release the term if the window has elapsed and it differs from the
    /// last released one.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.release(),
            _ => None,
        }
    }

    /// Release immediately (Enter / explicit search).
    pub fn flush(&mut self) -> Option<String> {
        self.release()
    }

    fn release(&mut self) -> Option<String> {
        self.deadline = None;
        if self.draft == self.committed {
            return None;
        }
        self.committed.clone_from(&self.draft);
        Some(self.committed.clone())
    }
}
