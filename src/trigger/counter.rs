use crate::animation::ease::Ease;

/// Lifecycle of a [`CounterAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CounterState {
    /// Waiting for a visibility trigger; displays `0`.
    Idle,
    /// Counting up since `started_ms`.
    Running {
        /// Timestamp of the trigger.
        started_ms: u64,
    },
    /// Holding the target value.
    Complete,
}

/// Counts an integer from `0` to a target over a fixed duration once triggered.
///
/// The displayed value depends only on elapsed time, so dropped frames never slow it down.
/// Triggering while running or complete does nothing; [`CounterAnimator::leave`] rearms it.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimator {
    target: u64,
    duration_ms: u64,
    ease: Ease,
    state: CounterState,
    value: u64,
}

impl CounterAnimator {
    /// Count to `target` over `duration_ms` with a cubic ease-out.
    pub fn new(target: u64, duration_ms: u64) -> Self {
        Self {
            target,
            duration_ms,
            ease: Ease::OutCubic,
            state: CounterState::Idle,
            value: 0,
        }
    }

    /// Override the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Target value.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Lifecycle state.
    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Last displayed value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// `true` while counting.
    pub fn is_running(&self) -> bool {
        matches!(self.state, CounterState::Running { .. })
    }

    /// Value shown `elapsed_ms` after the trigger.
    pub fn value_at(&self, elapsed_ms: u64) -> u64 {
        if elapsed_ms >= self.duration_ms {
            return self.target;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        let v = (self.target as f64 * self.ease.apply(t)).round() as u64;
        v.min(self.target)
    }

    /// Start counting from `0`. Returns `false` if already running or complete.
    pub fn trigger(&mut self, now_ms: u64) -> bool {
        if self.state != CounterState::Idle {
            return false;
        }
        self.state = CounterState::Running { started_ms: now_ms };
        self.value = 0;
        if self.duration_ms == 0 {
            self.finish();
        }
        true
    }

    /// Advance to `now_ms` and return the displayed value.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        if let CounterState::Running { started_ms } = self.state {
            let next = self.value_at(now_ms.saturating_sub(started_ms));
            self.value = self.value.max(next);
            if self.value >= self.target {
                self.finish();
            }
        }
        self.value
    }

    /// The element left its trigger region: reset so the next trigger replays.
    pub fn leave(&mut self) {
        self.state = CounterState::Idle;
        self.value = 0;
    }

    fn finish(&mut self) {
        self.state = CounterState::Complete;
        self.value = self.target;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/counter.rs"]
mod tests;
