/// Lets an action through at most once per interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl Throttle {
    /// Create a throttle with the given interval.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Returns `true` (and records `now_ms`) when the interval has elapsed since the last pass.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.last_ms {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Fires once after calls stop arriving for `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay_ms: u64,
    pending_since: Option<u64>,
}

impl Debounce {
    /// Create a debounce with the given quiet period.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending_since: None,
        }
    }

    /// Record a call at `now_ms`, restarting the quiet period.
    pub fn call(&mut self, now_ms: u64) {
        self.pending_since = Some(now_ms);
    }

    /// `true` while a call is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Returns `true` exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.pending_since {
            Some(since) if now_ms.saturating_sub(since) >= self.delay_ms => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending call.
    pub fn cancel(&mut self) {
        self.pending_since = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/throttle.rs"]
mod tests;
