use std::collections::VecDeque;

/// Rolling rate of scroll events over a time window.
#[derive(Clone, Debug)]
pub struct FpsSampler {
    window_ms: u64,
    stamps: VecDeque<u64>,
}

impl FpsSampler {
    /// Sample over the last `window_ms` milliseconds.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            stamps: VecDeque::new(),
        }
    }

    /// Record one event. Stamps older than the newest one are ignored.
    pub fn record(&mut self, now_ms: u64) {
        if self.stamps.back().is_some_and(|&last| now_ms < last) {
            return;
        }
        self.stamps.push_back(now_ms);
        self.evict(now_ms);
    }

    /// Events per second in the window ending at `now_ms`, or `None` with fewer than two events.
    pub fn fps(&mut self, now_ms: u64) -> Option<f64> {
        self.evict(now_ms);
        let (first, last) = (*self.stamps.front()?, *self.stamps.back()?);
        let span = last.saturating_sub(first);
        if self.stamps.len() < 2 || span == 0 {
            return None;
        }
        Some((self.stamps.len() - 1) as f64 * 1000.0 / span as f64)
    }

    fn evict(&mut self, now_ms: u64) {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        while self.stamps.front().is_some_and(|&t| t < cutoff) {
            self.stamps.pop_front();
        }
    }
}
