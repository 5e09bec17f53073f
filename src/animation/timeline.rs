use std::fmt;
use std::str::FromStr;

use crate::{
    animation::curve::PhaseCurve,
    animation::sequencer::Sequencer,
    foundation::core::ElementId,
    foundation::error::{ScrollPhaseError, ScrollPhaseResult},
};

/// Where a timeline entry is placed, in timeline time units.
///
/// String form: `">"` (after the previous entry, the default), `"<"` (with the previous entry),
/// `"<0.2"` / `">-0.1"` (offset from those anchors), `"+=1"` / `"-=0.5"` (relative to the current
/// end of the timeline) or a bare number (absolute).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// After the most recently added entry.
    #[default]
    AfterPrevious,
    /// After the most recently added entry plus an offset.
    AfterPreviousBy(f64),
    /// Aligned with the start of the most recently added entry plus an offset.
    WithPrevious(f64),
    /// Relative to the current end of the whole timeline.
    FromEnd(f64),
    /// Absolute time.
    At(f64),
}

impl Position {
    fn resolve(self, prev_start: f64, prev_end: f64, end: f64) -> f64 {
        let t = match self {
            Self::AfterPrevious => prev_end,
            Self::AfterPreviousBy(d) => prev_end + d,
            Self::WithPrevious(d) => prev_start + d,
            Self::FromEnd(d) => end + d,
            Self::At(t) => t,
        };
        t.max(0.0)
    }
}

fn parse_offset(s: &str, whole: &str) -> ScrollPhaseResult<f64> {
    if s.is_empty() {
        return Ok(0.0);
    }
    let v: f64 = s
        .parse()
        .map_err(|_| ScrollPhaseError::animation(format!("invalid timeline position \"{whole}\"")))?;
    if !v.is_finite() {
        return Err(ScrollPhaseError::animation(format!(
            "timeline position \"{whole}\" must be finite"
        )));
    }
    Ok(v)
}

impl FromStr for Position {
    type Err = ScrollPhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() || t == ">" {
            return Ok(Self::AfterPrevious);
        }
        if let Some(rest) = t.strip_prefix("+=") {
            return Ok(Self::FromEnd(parse_offset(rest, s)?));
        }
        if let Some(rest) = t.strip_prefix("-=") {
            return Ok(Self::FromEnd(-parse_offset(rest, s)?));
        }
        if let Some(rest) = t.strip_prefix('>') {
            return Ok(Self::AfterPreviousBy(parse_offset(rest, s)?));
        }
        if let Some(rest) = t.strip_prefix('<') {
            return Ok(Self::WithPrevious(parse_offset(rest, s)?));
        }
        Ok(Self::At(parse_offset(t, s)?))
    }
}

impl TryFrom<String> for Position {
    type Error = ScrollPhaseError;

    fn try_from(v: String) -> Result<Self, Self::Error> {
        v.parse()
    }
}

impl From<Position> for String {
    fn from(v: Position) -> Self {
        v.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::AfterPrevious => write!(f, ">"),
            Self::AfterPreviousBy(d) => write!(f, ">{d}"),
            Self::WithPrevious(d) => write!(f, "<{d}"),
            Self::FromEnd(d) if d < 0.0 => write!(f, "-={}", -d),
            Self::FromEnd(d) => write!(f, "+={d}"),
            Self::At(t) => write!(f, "{t}"),
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    target: ElementId,
    curve: PhaseCurve,
    start: f64,
    duration: f64,
}

/// Time-based layout of phase curves, normalized onto a [`Sequencer`] when built.
///
/// Durations are in arbitrary units; only their ratios matter once the timeline is scrubbed by
/// scroll progress.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    prev_start: f64,
    prev_end: f64,
    end: f64,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `curve` on `target` for `duration` units at `position`.
    ///
    /// Returns the resolved start time.
    pub fn add(
        &mut self,
        target: impl Into<ElementId>,
        curve: PhaseCurve,
        duration: f64,
        position: Position,
    ) -> ScrollPhaseResult<f64> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(ScrollPhaseError::animation(
                "Timeline duration must be finite and >= 0",
            ));
        }
        let start = position.resolve(self.prev_start, self.prev_end, self.end);
        self.entries.push(Entry {
            target: target.into(),
            curve,
            start,
            duration,
        });
        self.prev_start = start;
        self.prev_end = start + duration;
        self.end = self.end.max(self.prev_end);
        Ok(start)
    }

    /// Place one copy of `curve` per target, each starting `each` units after the previous.
    ///
    /// The first copy is placed at `position`; afterwards "previous" refers to the last copy.
    pub fn add_staggered<I, E>(
        &mut self,
        targets: I,
        curve: &PhaseCurve,
        duration: f64,
        each: f64,
        position: Position,
    ) -> ScrollPhaseResult<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<ElementId>,
    {
        if !each.is_finite() || each < 0.0 {
            return Err(ScrollPhaseError::animation(
                "Timeline stagger spacing must be finite and >= 0",
            ));
        }
        let mut base = None;
        for (i, target) in targets.into_iter().enumerate() {
            let pos = match base {
                None => position,
                Some(b) => Position::At(b + each * i as f64),
            };
            let start = self.add(target, curve.clone(), duration, pos)?;
            if base.is_none() {
                base = Some(start);
            }
        }
        Ok(())
    }

    /// Total length in timeline units.
    pub fn duration(&self) -> f64 {
        self.end
    }

    /// Normalize every entry by the total duration onto one master progress axis.
    ///
    /// A zero-length timeline collapses every entry to a step at progress `0`.
    pub fn build(&self) -> ScrollPhaseResult<Sequencer> {
        let mut seq = Sequencer::new();
        for e in &self.entries {
            let (start, duration) = if self.end > 0.0 {
                (e.start / self.end, e.duration / self.end)
            } else {
                (0.0, 0.0)
            };
            seq.push(e.target.clone(), e.curve.clone(), start, duration)?;
        }
        Ok(seq)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
