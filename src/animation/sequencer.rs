use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::curve::PhaseCurve,
    foundation::core::ElementId,
    foundation::error::{ScrollPhaseError, ScrollPhaseResult},
    foundation::math::inverse_lerp_clamped,
};

/// Property values grouped by target element.
pub type ElementValues = BTreeMap<ElementId, BTreeMap<String, f64>>;

/// A phase curve placed on the master progress axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceTrack {
    /// Element the curve's properties apply to.
    pub target: ElementId,
    /// Curve sampled with the track-local progress.
    pub curve: PhaseCurve,
    /// Master progress at which the track starts.
    pub start_offset: f64,
    /// Master progress span covered by the track. `0` is a step at `start_offset`.
    pub duration: f64,
}

impl SequenceTrack {
    /// Track-local progress for a master progress value.
    pub fn local_progress(&self, master: f64) -> f64 {
        inverse_lerp_clamped(self.start_offset, self.start_offset + self.duration, master)
    }
}

/// Several phase curves sharing one master progress axis.
///
/// Tracks are evaluated in declaration order, so when two tracks drive the same property on the
/// same element the later one wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequencer {
    tracks: Vec<SequenceTrack>,
}

impl Sequencer {
    /// Create an empty sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track.
    pub fn push(
        &mut self,
        target: impl Into<ElementId>,
        curve: PhaseCurve,
        start_offset: f64,
        duration: f64,
    ) -> ScrollPhaseResult<&mut Self> {
        if !start_offset.is_finite() || start_offset < 0.0 {
            return Err(ScrollPhaseError::animation(
                "Sequencer start_offset must be finite and >= 0",
            ));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(ScrollPhaseError::animation(
                "Sequencer duration must be finite and >= 0",
            ));
        }
        self.tracks.push(SequenceTrack {
            target: target.into(),
            curve,
            start_offset,
            duration,
        });
        Ok(self)
    }

    /// Builder form of [`Sequencer::push`].
    pub fn track(
        mut self,
        target: impl Into<ElementId>,
        curve: PhaseCurve,
        start_offset: f64,
        duration: f64,
    ) -> ScrollPhaseResult<Self> {
        self.push(target, curve, start_offset, duration)?;
        Ok(self)
    }

    /// Append one track per target, offsetting each start by `each` from `start`.
    pub fn stagger<I, E>(
        &mut self,
        targets: I,
        curve: &PhaseCurve,
        start: f64,
        each: f64,
        duration: f64,
    ) -> ScrollPhaseResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<ElementId>,
    {
        if !each.is_finite() || each < 0.0 {
            return Err(ScrollPhaseError::animation(
                "Sequencer stagger spacing must be finite and >= 0",
            ));
        }
        for (i, target) in targets.into_iter().enumerate() {
            self.push(target, curve.clone(), start + each * i as f64, duration)?;
        }
        Ok(self)
    }

    /// All tracks in declaration order.
    pub fn tracks(&self) -> &[SequenceTrack] {
        &self.tracks
    }

    /// `true` when no tracks were added.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Every element the sequencer writes to.
    pub fn targets(&self) -> BTreeSet<&ElementId> {
        self.tracks.iter().map(|t| &t.target).collect()
    }

    /// Evaluate all tracks at `master` progress.
    pub fn evaluate(&self, master: f64) -> ElementValues {
        let mut out = ElementValues::new();
        self.evaluate_into(master, &mut out);
        out
    }

    /// Evaluate all tracks at `master` progress into `out`.
    pub fn evaluate_into(&self, master: f64, out: &mut ElementValues) {
        for track in &self.tracks {
            let local = track.local_progress(master);
            track
                .curve
                .evaluate_into(local, out.entry(track.target.clone()).or_default());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequencer.rs"]
mod tests;
