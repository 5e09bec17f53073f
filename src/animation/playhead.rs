/// Time-driven position in `[0, 1]` for sequences that play instead of scrub.
///
/// Driven by caller timestamps: the first `advance` after a direction change only records the
/// clock, later calls move the position by elapsed time. Dropped frames just mean a larger step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    position: f64,
    target: f64,
    duration_ms: u64,
    last_ms: Option<u64>,
}

impl Playhead {
    /// Create a playhead at `0` covering the full range in `duration_ms`.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            duration_ms: duration_ms.max(1),
            last_ms: None,
        }
    }

    /// Current position.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// `true` while the position has not reached its target.
    pub fn is_moving(&self) -> bool {
        self.position != self.target
    }

    /// Head towards `1`, continuing from the current position.
    pub fn play(&mut self) {
        self.retarget(1.0);
    }

    /// Head back towards `0`, continuing from the current position.
    pub fn reverse(&mut self) {
        self.retarget(0.0);
    }

    /// Jump to `0` and stop.
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.target = 0.0;
        self.last_ms = None;
    }

    fn retarget(&mut self, target: f64) {
        if self.target != target {
            self.target = target;
            self.last_ms = None;
        }
    }

    /// Advance to `now_ms`. Returns `true` while still moving.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if !self.is_moving() {
            self.last_ms = None;
            return false;
        }
        let Some(last) = self.last_ms.replace(now_ms) else {
            return true;
        };

        let step = now_ms.saturating_sub(last) as f64 / self.duration_ms as f64;
        self.position = if self.target > self.position {
            (self.position + step).min(self.target)
        } else {
            (self.position - step).max(self.target)
        };
        self.is_moving()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playhead.rs"]
mod tests;
