use std::collections::{BTreeMap, HashMap};

use crate::{
    foundation::core::{ElementId, Rect, ScrollDirection, Viewport},
    scroll::region::{EdgeEvent, PinState, ResolvedRange, ScrollRegion, edge_events},
};

/// Source of element geometry, implemented by the rendering layer.
///
/// Rects are in document coordinates (already offset by the page scroll origin).
pub trait LayoutSource {
    /// Current document rect of `id`, or `None` if the element is not mounted.
    fn element_rect(&self, id: &ElementId) -> Option<Rect>;
}

impl LayoutSource for BTreeMap<ElementId, Rect> {
    fn element_rect(&self, id: &ElementId) -> Option<Rect> {
        self.get(id).copied()
    }
}

impl LayoutSource for HashMap<ElementId, Rect> {
    fn element_rect(&self, id: &ElementId) -> Option<Rect> {
        self.get(id).copied()
    }
}

/// Handle for a registered region.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RegionId(pub u32);

/// Progress change for one region.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionUpdate {
    /// Region that changed.
    pub id: RegionId,
    /// Progress before the event.
    pub previous: f64,
    /// Progress after the event.
    pub progress: f64,
    /// Scroll direction at the time of the event.
    pub direction: ScrollDirection,
    /// Pin state, only for pinned regions.
    pub pin: Option<PinState>,
    /// Boundary crossings, in firing order.
    pub edges: Vec<EdgeEvent>,
}

impl RegionUpdate {
    /// `true` strictly inside the region.
    pub fn is_active(&self) -> bool {
        self.progress > 0.0 && self.progress < 1.0
    }
}

#[derive(Clone, Debug)]
struct Tracked {
    region: ScrollRegion,
    range: ResolvedRange,
    progress: f64,
}

/// Computes per-region progress from the viewport scroll position.
///
/// Every registered region counts as one live scroll/resize listener until it is unregistered or
/// dropped by a refresh.
#[derive(Debug)]
pub struct ViewportTracker {
    viewport: Viewport,
    scroll: f64,
    direction: ScrollDirection,
    regions: BTreeMap<RegionId, Tracked>,
    next_id: u32,
    layout_dirty: bool,
}

impl ViewportTracker {
    /// Create a tracker at scroll offset `0`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll: 0.0,
            direction: ScrollDirection::Forward,
            regions: BTreeMap::new(),
            next_id: 0,
            layout_dirty: false,
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current scroll offset.
    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Direction of the last scroll movement.
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Number of live listeners (registered regions).
    pub fn listener_count(&self) -> usize {
        self.regions.len()
    }

    /// `true` after a resize until the next refresh.
    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Region definition for `id`.
    pub fn region(&self, id: RegionId) -> Option<&ScrollRegion> {
        self.regions.get(&id).map(|t| &t.region)
    }

    /// Resolved scroll range for `id`.
    pub fn range(&self, id: RegionId) -> Option<ResolvedRange> {
        self.regions.get(&id).map(|t| t.range)
    }

    /// Last computed progress for `id`.
    pub fn progress(&self, id: RegionId) -> Option<f64> {
        self.regions.get(&id).map(|t| t.progress)
    }

    /// Register `region`, resolving its range from `layout`.
    ///
    /// Returns `None` (and registers nothing) when the region is invalid or its trigger element is
    /// not in the layout. Progress starts at `0`; call [`ViewportTracker::poll`] to catch up with
    /// the current scroll position.
    pub fn register(&mut self, region: ScrollRegion, layout: &dyn LayoutSource) -> Option<RegionId> {
        if let Err(e) = region.validate() {
            tracing::warn!(trigger = %region.element, error = %e, "skipping invalid scroll region");
            return None;
        }
        let Some(rect) = layout.element_rect(&region.element) else {
            tracing::warn!(trigger = %region.element, "trigger element not found; region skipped");
            return None;
        };
        let range = match region.resolve(rect, self.viewport) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(trigger = %region.element, error = %e, "region skipped");
                return None;
            }
        };
        log_markers(&region, range);

        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.insert(
            id,
            Tracked {
                region,
                range,
                progress: 0.0,
            },
        );
        Some(id)
    }

    /// Remove a region. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: RegionId) -> bool {
        self.regions.remove(&id).is_some()
    }

    /// Recompute `id` against the current scroll position.
    ///
    /// Always returns an update (even without a progress change) so freshly registered regions
    /// can publish their initial state.
    pub fn poll(&mut self, id: RegionId) -> Option<RegionUpdate> {
        let scroll = self.scroll;
        let direction = self.direction;
        let tracked = self.regions.get_mut(&id)?;
        Some(update_tracked(id, tracked, scroll, direction))
    }

    /// Handle a scroll event. Returns updates for regions whose progress changed.
    pub fn on_scroll(&mut self, scroll: f64) -> Vec<RegionUpdate> {
        if !scroll.is_finite() {
            return Vec::new();
        }
        self.direction = self.direction.between(self.scroll, scroll);
        self.scroll = scroll;
        self.recompute_changed()
    }

    /// Handle a resize event. Ranges are stale until [`ViewportTracker::refresh`].
    pub fn on_resize(&mut self, viewport: Viewport) {
        if viewport.validate().is_err() {
            return;
        }
        self.viewport = viewport;
        self.layout_dirty = true;
    }

    /// Re-resolve every region against `layout`.
    ///
    /// Regions whose trigger element disappeared are unregistered and returned in `dropped`.
    #[tracing::instrument(skip(self, layout), fields(regions = self.regions.len()))]
    pub fn refresh(&mut self, layout: &dyn LayoutSource) -> RefreshOutcome {
        let viewport = self.viewport;
        let mut dropped = Vec::new();
        let mut moved_pins = Vec::new();
        for (id, tracked) in self.regions.iter_mut() {
            let resolved = layout
                .element_rect(&tracked.region.element)
                .and_then(|rect| tracked.region.resolve(rect, viewport).ok());
            match resolved {
                Some(range) => {
                    if tracked.region.pinned && range != tracked.range {
                        moved_pins.push(*id);
                    }
                    tracked.range = range;
                    log_markers(&tracked.region, range);
                }
                None => {
                    tracing::warn!(trigger = %tracked.region.element, "trigger element gone; region dropped");
                    dropped.push(*id);
                }
            }
        }
        for id in &dropped {
            self.regions.remove(id);
        }
        self.layout_dirty = false;

        // Pin offsets and spacing follow the range even when progress stays put.
        let mut updates = self.recompute_changed();
        for id in moved_pins {
            if updates.iter().all(|u| u.id != id) {
                updates.extend(self.poll(id));
            }
        }
        updates.sort_by_key(|u| u.id);

        RefreshOutcome { updates, dropped }
    }

    fn recompute_changed(&mut self) -> Vec<RegionUpdate> {
        let scroll = self.scroll;
        let direction = self.direction;
        self.regions
            .iter_mut()
            .filter(|(_, t)| t.range.progress(scroll) != t.progress)
            .map(|(id, t)| update_tracked(*id, t, scroll, direction))
            .collect()
    }
}

/// Result of [`ViewportTracker::refresh`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefreshOutcome {
    /// Regions whose progress changed under the new layout.
    pub updates: Vec<RegionUpdate>,
    /// Regions removed because their trigger element is gone.
    pub dropped: Vec<RegionId>,
}

fn update_tracked(
    id: RegionId,
    tracked: &mut Tracked,
    scroll: f64,
    direction: ScrollDirection,
) -> RegionUpdate {
    let previous = tracked.progress;
    let progress = tracked.range.progress(scroll);
    tracked.progress = progress;
    RegionUpdate {
        id,
        previous,
        progress,
        direction,
        pin: tracked
            .region
            .pinned
            .then(|| tracked.range.pin_state(scroll)),
        edges: edge_events(previous, progress),
    }
}

fn log_markers(region: &ScrollRegion, range: ResolvedRange) {
    if region.markers {
        tracing::debug!(
            trigger = %region.element,
            start = range.start,
            end = range.end,
            "scroll region markers"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
