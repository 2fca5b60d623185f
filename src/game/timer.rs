//! Polled countdown for a turn.
//!
//! The timer never fires anything. The session asks `is_expired(now)` on
//! each tick, and every query takes the current `Instant` so callers (and
//! tests) control time explicitly.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnTimer {
    limit: Duration,
    started: Option<Instant>,
    paused_at: Option<Instant>,
    forced: bool,
}

impl TurnTimer {
    #[must_use]
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            started: None,
            paused_at: None,
            forced: false,
        }
    }

    /// Change the limit. Takes effect from the next `start`.
    pub fn set_limit(&mut self, limit: Duration) {
        self.limit = limit;
    }

    /// Start counting down from the full limit.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.paused_at = None;
        self.forced = false;
    }

    /// Stop and clear. A reset timer is neither running nor expired.
    pub fn reset(&mut self) {
        self.started = None;
        self.paused_at = None;
        self.forced = false;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    fn elapsed(&self, now: Instant) -> Duration {
        match self.started {
            Some(started) => self.paused_at.unwrap_or(now).saturating_duration_since(started),
            None => Duration::ZERO,
        }
    }

    /// Remaining time, zero once expired.
    pub fn time_left(&self, now: Instant) -> Duration {
        if self.forced || !self.is_running() {
            return Duration::ZERO;
        }
        self.limit.saturating_sub(self.elapsed(now))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.is_running() && (self.forced || self.elapsed(now) >= self.limit)
    }

    /// Make the next `is_expired` query return true.
    pub fn expire_now(&mut self) {
        if self.is_running() {
            self.forced = true;
        }
    }

    /// Freeze the clock. No-op if already paused or not running.
    pub fn pause(&mut self, now: Instant) {
        if self.is_running() && self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Unfreeze, pushing the start forward by the paused span.
    pub fn resume(&mut self, now: Instant) {
        if let (Some(started), Some(paused_at)) = (self.started, self.paused_at.take()) {
            self.started = Some(started + now.saturating_duration_since(paused_at));
        }
    }
}
