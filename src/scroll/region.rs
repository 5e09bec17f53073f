use crate::{
    foundation::core::{ElementId, Rect, Viewport},
    foundation::error::{ScrollPhaseError, ScrollPhaseResult},
    foundation::math::inverse_lerp_clamped,
    scroll::position::TriggerPosition,
};

/// Scroll range bound to one trigger element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRegion {
    /// Element whose document position defines the range.
    #[serde(rename = "trigger")]
    pub element: ElementId,
    /// Where progress is `0`.
    #[serde(default = "TriggerPosition::default_start")]
    pub start: TriggerPosition,
    /// Where progress is `1`.
    #[serde(default = "TriggerPosition::default_end")]
    pub end: TriggerPosition,
    /// Freeze the element in place while progress is strictly inside `(0, 1)`.
    #[serde(default, alias = "pin")]
    pub pinned: bool,
    /// Log resolved start/end scroll offsets at `debug` level.
    #[serde(default)]
    pub markers: bool,
}

impl ScrollRegion {
    /// Region over `element` with default start/end positions.
    pub fn new(element: impl Into<ElementId>) -> Self {
        Self {
            element: element.into(),
            start: TriggerPosition::default_start(),
            end: TriggerPosition::default_end(),
            pinned: false,
            markers: false,
        }
    }

    /// Override the start position.
    pub fn start(mut self, start: TriggerPosition) -> Self {
        self.start = start;
        self
    }

    /// Override the end position.
    pub fn end(mut self, end: TriggerPosition) -> Self {
        self.end = end;
        self
    }

    /// Parse and set both positions from their string forms.
    pub fn between(mut self, start: &str, end: &str) -> ScrollPhaseResult<Self> {
        self.start = start.parse()?;
        self.end = end.parse()?;
        self.validate()?;
        Ok(self)
    }

    /// Pin the element while the region is active.
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Enable marker logging.
    pub fn markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    /// Check static invariants.
    pub fn validate(&self) -> ScrollPhaseResult<()> {
        if self.element.as_str().is_empty() {
            return Err(ScrollPhaseError::trigger("ScrollRegion trigger must be non-empty"));
        }
        if self.start.is_relative() {
            return Err(ScrollPhaseError::trigger(format!(
                "ScrollRegion '{}' start must be anchored, got \"{}\"",
                self.element, self.start
            )));
        }
        Ok(())
    }

    /// Resolve start/end scroll offsets from the element's document rect.
    pub fn resolve(&self, rect: Rect, viewport: Viewport) -> ScrollPhaseResult<ResolvedRange> {
        let anchored = |pos: TriggerPosition| match pos {
            TriggerPosition::Anchored { element, viewport: vp } => {
                Some(rect.y0 + element.resolve(rect.height()) - vp.resolve(viewport.height))
            }
            TriggerPosition::Relative(_) => None,
        };

        let start = anchored(self.start).ok_or_else(|| {
            ScrollPhaseError::trigger(format!("ScrollRegion '{}' start must be anchored", self.element))
        })?;
        let end = match self.end {
            TriggerPosition::Relative(d) => start + d.resolve(viewport.height),
            anchored_end => anchored(anchored_end).unwrap_or(start),
        };

        Ok(ResolvedRange { start, end })
    }
}

/// Scroll offsets at which a region's progress is `0` and `1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedRange {
    /// Scroll offset where progress becomes non-zero.
    pub start: f64,
    /// Scroll offset where progress reaches `1`.
    pub end: f64,
}

impl ResolvedRange {
    /// Clamped progress at `scroll`; a non-positive span is a step at `start`.
    pub fn progress(&self, scroll: f64) -> f64 {
        inverse_lerp_clamped(self.start, self.end, scroll)
    }

    /// Extra scroll distance a pinned element consumes.
    pub fn pin_spacing(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Pin state at `scroll`.
    pub fn pin_state(&self, scroll: f64) -> PinState {
        let p = self.progress(scroll);
        if p <= 0.0 {
            PinState::Before
        } else if p >= 1.0 {
            PinState::After {
                spacing: self.pin_spacing(),
            }
        } else {
            PinState::Pinned {
                offset: scroll - self.start,
            }
        }
    }
}

/// Layout freeze reported for pinned regions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PinState {
    /// Normal flow, region not reached yet.
    Before,
    /// Frozen; the element must be shifted down by `offset` to stay in place.
    Pinned {
        /// Scroll distance consumed since the region start.
        offset: f64,
    },
    /// Released after the region; following content is pushed down by `spacing`.
    After {
        /// Total scroll distance the pin consumed.
        spacing: f64,
    },
}

/// Boundary crossing between two consecutive progress values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeEvent {
    /// Scrolled forward past the start.
    Enter,
    /// Scrolled forward past the end.
    Leave,
    /// Scrolled backward past the end.
    EnterBack,
    /// Scrolled backward past the start.
    LeaveBack,
}

/// Edge events fired when progress moves from `prev` to `next`, in firing order.
///
/// Jumping over the whole region in one step fires both of its edges.
pub fn edge_events(prev: f64, next: f64) -> Vec<EdgeEvent> {
    let mut out = Vec::new();
    if next > prev {
        if prev <= 0.0 && next > 0.0 {
            out.push(EdgeEvent::Enter);
        }
        if next >= 1.0 {
            out.push(EdgeEvent::Leave);
        }
    } else if next < prev {
        if prev >= 1.0 && next < 1.0 {
            out.push(EdgeEvent::EnterBack);
        }
        if next <= 0.0 {
            out.push(EdgeEvent::LeaveBack);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/region.rs"]
mod tests;
