use crate::foundation::error::{ScrollPhaseError, ScrollPhaseResult};

/// Result of feeding a value into a [`ContentSwap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwapOutcome {
    /// The active index was already the resolved one.
    Unchanged,
    /// The active index moved.
    Changed {
        /// Previous index.
        from: usize,
        /// New index.
        to: usize,
    },
}

/// Discrete index into a finite content list, switched by scroll progress.
///
/// The active index is always a pure function of the most recent input (progress or item
/// progresses), never of the order in which thresholds were crossed.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentSwap {
    len: usize,
    active: usize,
    thresholds: Vec<f64>, // sorted, strictly increasing, each in (0, 1)
}

impl ContentSwap {
    /// Swap over `len` variants with no thresholds (index `0` until set explicitly or driven by
    /// item progress).
    pub fn new(len: usize) -> ScrollPhaseResult<Self> {
        if len == 0 {
            return Err(ScrollPhaseError::trigger("ContentSwap needs at least one variant"));
        }
        Ok(Self {
            len,
            active: 0,
            thresholds: Vec::new(),
        })
    }

    /// Swap over `len` variants switching at explicit progress thresholds.
    ///
    /// Crossing the k-th threshold (in ascending order) activates index `k`.
    pub fn with_thresholds(
        len: usize,
        thresholds: impl IntoIterator<Item = f64>,
    ) -> ScrollPhaseResult<Self> {
        let mut swap = Self::new(len)?;
        let mut thresholds: Vec<f64> = thresholds.into_iter().collect();
        if thresholds.iter().any(|t| !(t.is_finite() && *t > 0.0 && *t < 1.0)) {
            return Err(ScrollPhaseError::trigger(
                "ContentSwap thresholds must lie strictly inside (0, 1)",
            ));
        }
        thresholds.sort_by(f64::total_cmp);
        if thresholds.windows(2).any(|w| w[0] == w[1]) {
            return Err(ScrollPhaseError::trigger("ContentSwap thresholds must be distinct"));
        }
        if thresholds.len() >= len {
            return Err(ScrollPhaseError::trigger(format!(
                "ContentSwap with {len} variants accepts at most {} thresholds, got {}",
                len - 1,
                thresholds.len()
            )));
        }
        swap.thresholds = thresholds;
        Ok(swap)
    }

    /// Swap over `len` variants with thresholds at `1/len, 2/len, ...`.
    pub fn evenly_spaced(len: usize) -> ScrollPhaseResult<Self> {
        Self::with_thresholds(len, (1..len).map(|i| i as f64 / len as f64))
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a swap holds at least one variant.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Currently active index.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Sorted thresholds.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Index resolved for `progress` in threshold mode.
    pub fn index_for_progress(&self, progress: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= progress)
    }

    /// Index resolved from per-item sub-region progresses: the last item that has been entered.
    pub fn index_for_items(&self, items: &[f64]) -> usize {
        items
            .iter()
            .rposition(|p| *p > 0.0)
            .unwrap_or(0)
            .min(self.len - 1)
    }

    /// Drive the swap with region progress.
    pub fn on_progress(&mut self, progress: f64) -> SwapOutcome {
        self.apply(self.index_for_progress(progress))
    }

    /// Drive the swap with item sub-region progresses.
    pub fn on_items(&mut self, items: &[f64]) -> SwapOutcome {
        self.apply(self.index_for_items(items))
    }

    /// Activate `index` directly. Re-activating the current index is a no-op.
    pub fn set_active(&mut self, index: usize) -> ScrollPhaseResult<SwapOutcome> {
        if index >= self.len {
            return Err(ScrollPhaseError::trigger(format!(
                "ContentSwap index {index} out of range (len {})",
                self.len
            )));
        }
        Ok(self.apply(index))
    }

    fn apply(&mut self, index: usize) -> SwapOutcome {
        if index == self.active {
            return SwapOutcome::Unchanged;
        }
        let from = std::mem::replace(&mut self.active, index);
        SwapOutcome::Changed { from, to: index }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/swap.rs"]
mod tests;
