use crate::foundation::error::{ScrollPhaseError, ScrollPhaseResult};

pub use kurbo::{Point, Rect, Vec2};

/// Opaque key naming an element owned by the rendering layer.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Create an element id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for ElementId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized scroll progress in `[0, 1]`.
///
/// Construction always clamps, and `NaN` collapses to `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Progress at the start of a region.
    pub const START: Self = Self(0.0);
    /// Progress at the end of a region.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`.
    pub fn new(v: f64) -> Self {
        Self(crate::foundation::math::clamp01(v))
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// `true` strictly inside the region (neither at the start nor at the end).
    pub fn is_active(self) -> bool {
        self.0 > 0.0 && self.0 < 1.0
    }
}

/// Visible viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> ScrollPhaseResult<Self> {
        let v = Self { width, height };
        v.validate()?;
        Ok(v)
    }

    /// Validate dimensions.
    pub fn validate(&self) -> ScrollPhaseResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ScrollPhaseError::validation("Viewport width must be > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ScrollPhaseError::validation("Viewport height must be > 0"));
        }
        Ok(())
    }
}

/// Direction of the most recent scroll movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Scrolling down the page (scroll offset increasing).
    #[default]
    Forward,
    /// Scrolling back up.
    Backward,
}

impl ScrollDirection {
    /// Direction implied by moving from `prev` to `next`; ties keep `self`.
    pub fn between(self, prev: f64, next: f64) -> Self {
        if next > prev {
            Self::Forward
        } else if next < prev {
            Self::Backward
        } else {
            self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
