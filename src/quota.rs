//! Per-session request allowance with a fixed cooldown.
//!
//! After `max_requests` requests the quota locks for `cooldown`, measured from the
//! request that used up the allowance. Callers pass the current [`Instant`] so the
//! arithmetic stays deterministic under test.

use std::time::{Duration, Instant};

/// Default lock-out once the allowance is spent.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(16 * 60);

/// Whether a request may go ahead now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaStatus {
    /// Requests left before the cooldown starts. `None` for an unlimited quota.
    Available { remaining: Option<u32> },
    /// Allowance spent; whole minutes until it refreshes, rounded up.
    CoolingDown { minutes_left: u64 },
}

impl QuotaStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

#[derive(Debug, Clone)]
pub struct RequestQuota {
    max_requests: u32,
    cooldown: Duration,
    used: u32,
    exhausted_at: Option<Instant>,
}

impl RequestQuota {
    /// `max_requests == 0` disables the limit.
    pub fn new(max_requests: u32) -> Self {
        Self::with_cooldown(max_requests, DEFAULT_COOLDOWN)
    }

    pub fn with_cooldown(max_requests: u32, cooldown: Duration) -> Self {
        Self {
            max_requests,
            cooldown,
            used: 0,
            exhausted_at: None,
        }
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    fn limited(&self) -> bool {
        self.max_requests > 0
    }

    fn spent(&self) -> bool {
        self.limited() && self.used >= self.max_requests
    }

    fn minutes_left(&self, now: Instant) -> Option<u64> {
        if !self.spent() {
            return None;
        }
        let started = self.exhausted_at?;
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.cooldown {
            return None;
        }
        Some((self.cooldown - elapsed).as_secs() / 60 + 1)
    }

    fn available(&self) -> QuotaStatus {
        let remaining = self
            .limited()
            .then(|| self.max_requests.saturating_sub(self.used));
        QuotaStatus::Available { remaining }
    }

    /// Decides whether a request may be issued at `now`. Does not consume anything.
    pub fn check(&self, now: Instant) -> QuotaStatus {
        match self.minutes_left(now) {
            Some(minutes_left) => QuotaStatus::CoolingDown { minutes_left },
            None => self.available(),
        }
    }

    /// Counts a completed request. Reaching the maximum starts the cooldown.
    pub fn record(&mut self, now: Instant) {
        self.used = self.used.saturating_add(1);
        if self.spent() {
            self.exhausted_at = Some(now);
        }
    }

    /// Resets a spent allowance once its cooldown has elapsed, then reports the status.
    pub fn refresh(&mut self, now: Instant) -> QuotaStatus {
        if self.spent() && self.minutes_left(now).is_none() {
            self.used = 0;
            self.exhausted_at = None;
        }
        self.check(now)
    }
}
