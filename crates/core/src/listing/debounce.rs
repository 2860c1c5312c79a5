//! Trailing-edge debounce for search input.
//!
//! The debouncer is a clock-free state machine: callers pass the current
//! [`Instant`] into every transition, which keeps it deterministic under test
//! and lets any runtime drive the timer.
//!
//! ```text
//! Idle    --input-->    Pending (deadline = now + window)
//! Pending --input-->    Pending (deadline restarts)
//! Pending --poll>=dl--> Idle    (commit lower-cased text)
//! ```

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a query is committed.
pub const QUIESCENCE_WINDOW: Duration = Duration::from_millis(300);

/// Whether a commit is waiting on the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { deadline: Instant },
}

/// Buffers raw search text and commits it once typing pauses.
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    raw: String,
    committed: String,
    state: DebounceState,
    window: Duration,
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(QUIESCENCE_WINDOW)
    }
}

impl QueryDebouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            raw: String::new(),
            committed: String::new(),
            state: DebounceState::Idle,
            window,
        }
    }

    /// Text as typed, not yet committed.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The lower-cased query that drives filtering.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    #[must_use]
    pub const fn state(&self) -> DebounceState {
        self.state
    }

    /// When the pending commit fires, if one is pending.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline } => Some(deadline),
        }
    }

    /// Record a change to the raw text, (re)starting the quiet window.
    ///
    /// Setting the same text again is not a change and leaves the timer alone.
    pub fn input(&mut self, text: &str, now: Instant) {
        if text == self.raw {
            return;
        }
        text.clone_into(&mut self.raw);
        self.state = DebounceState::Pending {
            deadline: now + self.window,
        };
    }

    /// Commit the buffered text if the window has elapsed.
    ///
    /// Returns the newly committed query, or `None` if nothing fired.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        match self.state {
            DebounceState::Pending { deadline } if now >= deadline => {
                self.committed = self.raw.to_lowercase();
                self.state = DebounceState::Idle;
                Some(&self.committed)
            }
            _ => None,
        }
    }
}
