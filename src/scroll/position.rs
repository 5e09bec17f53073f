use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ScrollPhaseError, ScrollPhaseResult};

/// A point along an element or the viewport, measured from its top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Fraction of the extent: `top` = 0, `center` = 0.5, `bottom` = 1, `"60%"` = 0.6.
    Fraction(f64),
    /// Fixed pixel distance from the top.
    Px(f64),
}

impl Edge {
    /// Resolve to pixels from the top of something `extent` pixels tall.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Fraction(f) => f * extent,
            Self::Px(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = ScrollPhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ScrollPhaseError::trigger(format!("invalid edge \"{s}\""));
        let edge = match s {
            "top" => Self::Fraction(0.0),
            "center" => Self::Fraction(0.5),
            "bottom" => Self::Fraction(1.0),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    Self::Fraction(pct.parse::<f64>().map_err(|_| bad())? / 100.0)
                } else {
                    let px = s.strip_suffix("px").unwrap_or(s);
                    Self::Px(px.parse::<f64>().map_err(|_| bad())?)
                }
            }
        };
        let v = match edge {
            Self::Fraction(v) | Self::Px(v) => v,
        };
        if !v.is_finite() {
            return Err(bad());
        }
        Ok(edge)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Fraction(v) if v == 0.0 => write!(f, "top"),
            Self::Fraction(v) if v == 0.5 => write!(f, "center"),
            Self::Fraction(v) if v == 1.0 => write!(f, "bottom"),
            Self::Fraction(v) => write!(f, "{}%", v * 100.0),
            Self::Px(px) => write!(f, "{px}px"),
        }
    }
}

/// Scroll distance for relative end positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    /// Pixels.
    Px(f64),
    /// Percent of the viewport height.
    ViewportPercent(f64),
}

impl Distance {
    /// Resolve to pixels for a viewport `viewport_height` pixels tall.
    pub fn resolve(self, viewport_height: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::ViewportPercent(pct) => pct / 100.0 * viewport_height,
        }
    }
}

/// Where a scroll region starts or ends.
///
/// String form is `"<element edge> <viewport edge>"`: the region boundary is the scroll offset at
/// which the element edge meets the viewport edge. A single edge applies to both. End positions may
/// instead be relative to the start: `"+=300"` (pixels) or `"+=150%"` (of viewport height).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TriggerPosition {
    /// Element edge meets viewport edge.
    Anchored {
        /// Edge on the trigger element.
        element: Edge,
        /// Edge on the viewport.
        viewport: Edge,
    },
    /// Fixed distance past the region start.
    Relative(Distance),
}

impl TriggerPosition {
    /// Shorthand for an anchored position.
    pub fn anchored(element: Edge, viewport: Edge) -> Self {
        Self::Anchored { element, viewport }
    }

    /// Default region start: element top meets viewport bottom.
    pub fn default_start() -> Self {
        Self::anchored(Edge::Fraction(0.0), Edge::Fraction(1.0))
    }

    /// Default region end: element bottom meets viewport top.
    pub fn default_end() -> Self {
        Self::anchored(Edge::Fraction(1.0), Edge::Fraction(0.0))
    }

    /// `true` for `+=` positions.
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative(_))
    }
}

impl FromStr for TriggerPosition {
    type Err = ScrollPhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Some(rest) = t.strip_prefix("+=") {
            let bad = || ScrollPhaseError::trigger(format!("invalid relative position \"{s}\""));
            let rest = rest.trim();
            let dist = if let Some(pct) = rest.strip_suffix('%') {
                Distance::ViewportPercent(pct.parse().map_err(|_| bad())?)
            } else {
                Distance::Px(rest.strip_suffix("px").unwrap_or(rest).parse().map_err(|_| bad())?)
            };
            let v = match dist {
                Distance::Px(v) | Distance::ViewportPercent(v) => v,
            };
            if !v.is_finite() || v < 0.0 {
                return Err(bad());
            }
            return Ok(Self::Relative(dist));
        }

        let mut parts = t.split_whitespace();
        let (Some(first), second, None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScrollPhaseError::trigger(format!(
                "trigger position \"{s}\" must be \"<element edge> [viewport edge]\""
            )));
        };
        let element: Edge = first.parse()?;
        let viewport = match second {
            Some(v) => v.parse()?,
            None => element,
        };
        Ok(Self::Anchored { element, viewport })
    }
}

impl TryFrom<String> for TriggerPosition {
    type Error = ScrollPhaseError;

    fn try_from(v: String) -> ScrollPhaseResult<Self> {
        v.parse()
    }
}

impl From<TriggerPosition> for String {
    fn from(v: TriggerPosition) -> Self {
        v.to_string()
    }
}

impl fmt::Display for TriggerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchored { element, viewport } => write!(f, "{element} {viewport}"),
            Self::Relative(Distance::Px(px)) => write!(f, "+={px}"),
            Self::Relative(Distance::ViewportPercent(pct)) => write!(f, "+={pct}%"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/position.rs"]
mod tests;
