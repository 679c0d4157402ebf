//! Fixed-window request counting keyed by client.
//!
//! Each key gets a window that starts on its first request. Requests inside
//! the window increment a counter; once the window has elapsed the next
//! request starts a fresh one. State is process-local.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

#[derive(Debug, Clone, Copy)]
struct WindowState {
    count: u32,
    reset_at: Instant,
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the caller's window resets.
    pub reset_after: Duration,
}

#[derive(Debug)]
pub struct FixedWindowLimiter<K> {
    window: Duration,
    max_requests: u32,
    entries: HashMap<K, WindowState>,
}

impl<K: Eq + Hash + Clone> FixedWindowLimiter<K> {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            entries: HashMap::new(),
        }
    }

    /// Count a request from `key` at `now`.
    ///
    /// Expired windows for every key are dropped first, so the map only holds
    /// clients seen within the last window.
    pub fn check(&mut self, key: &K, now: Instant) -> RateDecision {
        self.entries.retain(|_, state| now < state.reset_at);

        let window = self.window;
        let state = self.entries.entry(key.clone()).or_insert(WindowState {
            count: 0,
            reset_at: now + window,
        });
        state.count = state.count.saturating_add(1);

        RateDecision {
            allowed: state.count <= self.max_requests,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(state.count),
            reset_after: state.reset_at.saturating_duration_since(now),
        }
    }
}
