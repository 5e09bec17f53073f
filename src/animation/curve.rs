use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::error::{ScrollPhaseError, ScrollPhaseResult},
    foundation::math::{clamp01, lerp},
};

fn default_end() -> f64 {
    1.0
}

/// One authored interpolation of a property over a progress window.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseSpec {
    /// Property name handed to the rendering layer (`"opacity"`, `"y_percent"`, ...).
    pub property: String,
    /// Value at `start`.
    pub from: f64,
    /// Value at `end`.
    pub to: f64,
    /// Progress at which interpolation begins.
    #[serde(default)]
    pub start: f64,
    /// Progress at which interpolation completes.
    #[serde(default = "default_end")]
    pub end: f64,
    /// Curve applied between `start` and `end`.
    #[serde(default)]
    pub ease: Ease,
}

impl PhaseSpec {
    /// Interpolate `property` from `from` to `to` across the whole `[0, 1]` window.
    pub fn new(property: impl Into<String>, from: f64, to: f64) -> Self {
        Self {
            property: property.into(),
            from,
            to,
            start: 0.0,
            end: 1.0,
            ease: Ease::default(),
        }
    }

    /// Restrict the interpolation window.
    pub fn window(mut self, start: f64, end: f64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Override the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    fn validate(&self) -> ScrollPhaseResult<()> {
        if self.property.is_empty() {
            return Err(ScrollPhaseError::animation("PhaseSpec property must be non-empty"));
        }
        if !(self.from.is_finite() && self.to.is_finite()) {
            return Err(ScrollPhaseError::animation(format!(
                "PhaseSpec '{}' values must be finite",
                self.property
            )));
        }
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !(in_unit(self.start) && in_unit(self.end)) || self.start > self.end {
            return Err(ScrollPhaseError::animation(format!(
                "PhaseSpec '{}' window must satisfy 0 <= start <= end <= 1 (got {}..{})",
                self.property, self.start, self.end
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    start: f64,
    end: f64,
    from: f64,
    to: f64,
    ease: Ease,
}

/// Pure mapping from progress to a set of property values.
///
/// Each property owns a sorted list of non-overlapping segments. Outside every segment the most
/// recently completed segment's end value holds; before the first segment its start value holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseCurve {
    segments: BTreeMap<String, Vec<Segment>>, // sorted by start, non-overlapping
}

impl PhaseCurve {
    /// Build and validate a curve from authored specs.
    pub fn new(specs: impl IntoIterator<Item = PhaseSpec>) -> ScrollPhaseResult<Self> {
        let mut segments: BTreeMap<String, Vec<Segment>> = BTreeMap::new();
        for spec in specs {
            spec.validate()?;
            segments.entry(spec.property).or_default().push(Segment {
                start: spec.start,
                end: spec.end,
                from: spec.from,
                to: spec.to,
                ease: spec.ease,
            });
        }

        for (property, segs) in segments.iter_mut() {
            segs.sort_by(|a, b| a.start.total_cmp(&b.start));
            if let Some(w) = segs.windows(2).find(|w| w[0].end > w[1].start) {
                return Err(ScrollPhaseError::animation(format!(
                    "PhaseSpec windows for '{property}' overlap ({}..{} and {}..{})",
                    w[0].start, w[0].end, w[1].start, w[1].end
                )));
            }
        }

        Ok(Self { segments })
    }

    /// Names of every property this curve drives.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    /// `true` when the curve drives no properties.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sample one property, or `None` if the curve does not drive it.
    pub fn sample(&self, property: &str, progress: f64) -> Option<f64> {
        self.segments
            .get(property)
            .map(|segs| sample_segments(segs, clamp01(progress)))
    }

    /// Evaluate every property at `progress`.
    pub fn evaluate(&self, progress: f64) -> BTreeMap<String, f64> {
        let mut out = BTreeMap::new();
        self.evaluate_into(progress, &mut out);
        out
    }

    /// Evaluate every property at `progress`, overwriting entries in `out`.
    pub fn evaluate_into(&self, progress: f64, out: &mut BTreeMap<String, f64>) {
        let p = clamp01(progress);
        for (property, segs) in &self.segments {
            out.insert(property.clone(), sample_segments(segs, p));
        }
    }
}

fn sample_segments(segs: &[Segment], p: f64) -> f64 {
    let idx = segs.partition_point(|s| s.start <= p);
    if idx == 0 {
        return segs.first().map_or(0.0, |s| s.from);
    }

    let s = &segs[idx - 1];
    if p >= s.end {
        return s.to;
    }
    let t = (p - s.start) / (s.end - s.start);
    lerp(s.from, s.to, s.ease.apply(t))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
