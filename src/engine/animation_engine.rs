use std::collections::BTreeMap;

use crate::{
    animation::playhead::Playhead,
    animation::sequencer::Sequencer,
    engine::frame::{FrameHandle, FrameScheduler},
    engine::presentation::Presentation,
    engine::scope::Scope,
    foundation::core::{ElementId, Viewport},
    scroll::region::{EdgeEvent, ScrollRegion},
    scroll::tracker::{LayoutSource, RegionId, RegionUpdate, ViewportTracker},
    timing::fps::FpsSampler,
    timing::throttle::{Debounce, Throttle},
    trigger::counter::CounterAnimator,
    trigger::swap::{ContentSwap, SwapOutcome},
};

/// Handle for one mounted binding.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BindingId(pub u32);

/// How a sequence follows its region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Master progress is the region progress.
    Scrub,
    /// Play forward over `duration_ms` on enter, reverse when scrolled back above the start.
    Play {
        /// Time for a full forward pass.
        duration_ms: u64,
    },
}

/// Engine tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Quiet period after the last resize before ranges are recomputed.
    pub resize_debounce_ms: u64,
    /// Window for the scroll-rate sampler.
    pub fps_window_ms: u64,
    /// Minimum spacing between scroll-rate log lines.
    pub fps_log_interval_ms: u64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 150,
            fps_window_ms: 1000,
            fps_log_interval_ms: 1000,
        }
    }
}

#[derive(Debug)]
enum BindingKind {
    Sequence {
        sequencer: Sequencer,
        playhead: Option<Playhead>,
    },
    Swap {
        target: ElementId,
        swap: ContentSwap,
    },
    ItemSwap {
        target: ElementId,
        swap: ContentSwap,
        items: Vec<Option<RegionId>>,
    },
    Counter {
        target: ElementId,
        counter: CounterAnimator,
    },
    Pin,
}

#[derive(Debug)]
struct Binding {
    kind: BindingKind,
    regions: Vec<RegionId>,
    // Pinned trigger elements captured at mount. Outlives the tracker entry on refresh drops.
    pins: Vec<(RegionId, ElementId)>,
    frame: Option<FrameHandle>,
}

/// The one animation engine of a page.
///
/// Constructed once at start-up and handed by `&mut` to every component that mounts scroll
/// animations. Event handlers (`on_scroll`, `on_resize`, `on_frame`) each run to completion; the
/// renderer reads the result from [`AnimationEngine::presentation`].
#[derive(Debug)]
pub struct AnimationEngine {
    opts: EngineOpts,
    tracker: ViewportTracker,
    bindings: BTreeMap<BindingId, Binding>,
    owners: BTreeMap<RegionId, BindingId>,
    frames: FrameScheduler,
    presentation: Presentation,
    next_binding: u32,
    clock_ms: u64,
    resize: Debounce,
    fps: FpsSampler,
    fps_log: Throttle,
}

impl AnimationEngine {
    /// Create an engine for `viewport` with default options.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_opts(viewport, EngineOpts::default())
    }

    /// Create an engine with explicit options.
    pub fn with_opts(viewport: Viewport, opts: EngineOpts) -> Self {
        Self {
            opts,
            tracker: ViewportTracker::new(viewport),
            bindings: BTreeMap::new(),
            owners: BTreeMap::new(),
            frames: FrameScheduler::default(),
            presentation: Presentation::default(),
            next_binding: 0,
            clock_ms: 0,
            resize: Debounce::new(opts.resize_debounce_ms),
            fps: FpsSampler::new(opts.fps_window_ms),
            fps_log: Throttle::new(opts.fps_log_interval_ms),
        }
    }

    /// Options the engine was built with.
    pub fn opts(&self) -> EngineOpts {
        self.opts
    }

    /// Current output for the renderer.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Underlying progress tracker.
    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// Live scroll/resize listeners across all scopes.
    pub fn listener_count(&self) -> usize {
        self.tracker.listener_count()
    }

    /// Pending per-frame callbacks across all scopes.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Mounted bindings across all scopes.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Scroll events per second over the sampler window.
    pub fn scroll_fps(&mut self) -> Option<f64> {
        self.fps.fps(self.clock_ms)
    }

    /// Drive `sequencer` from `region`.
    pub fn mount_sequence(
        &mut self,
        scope: &mut Scope,
        region: ScrollRegion,
        sequencer: Sequencer,
        playback: Playback,
        layout: &dyn LayoutSource,
    ) -> Option<BindingId> {
        let rid = self.tracker.register(region, layout)?;
        let playhead = match playback {
            Playback::Scrub => None,
            Playback::Play { duration_ms } => Some(Playhead::new(duration_ms)),
        };
        Some(self.attach(
            scope,
            BindingKind::Sequence {
                sequencer,
                playhead,
            },
            vec![rid],
        ))
    }

    /// Switch `target`'s active content index at progress thresholds of `region`.
    pub fn mount_swap(
        &mut self,
        scope: &mut Scope,
        region: ScrollRegion,
        target: impl Into<ElementId>,
        swap: ContentSwap,
        layout: &dyn LayoutSource,
    ) -> Option<BindingId> {
        let rid = self.tracker.register(region, layout)?;
        let target = target.into();
        self.presentation.active.insert(target.clone(), swap.active());
        Some(self.attach(scope, BindingKind::Swap { target, swap }, vec![rid]))
    }

    /// Switch `target`'s active index to the last entered item region.
    ///
    /// Items whose element is missing stay unentered; if none can be registered nothing is
    /// mounted.
    pub fn mount_item_swap(
        &mut self,
        scope: &mut Scope,
        items: Vec<ScrollRegion>,
        target: impl Into<ElementId>,
        swap: ContentSwap,
        layout: &dyn LayoutSource,
    ) -> Option<BindingId> {
        let items: Vec<Option<RegionId>> = items
            .into_iter()
            .map(|r| self.tracker.register(r, layout))
            .collect();
        let regions: Vec<RegionId> = items.iter().flatten().copied().collect();
        if regions.is_empty() {
            tracing::warn!(scope = scope.name(), "no item regions registered; swap skipped");
            return None;
        }
        let target = target.into();
        self.presentation.active.insert(target.clone(), swap.active());
        Some(self.attach(
            scope,
            BindingKind::ItemSwap {
                target,
                swap,
                items,
            },
            regions,
        ))
    }

    /// Count `target` up once `region` is entered.
    pub fn mount_counter(
        &mut self,
        scope: &mut Scope,
        region: ScrollRegion,
        target: impl Into<ElementId>,
        counter: CounterAnimator,
        layout: &dyn LayoutSource,
    ) -> Option<BindingId> {
        let rid = self.tracker.register(region, layout)?;
        let target = target.into();
        self.presentation.counters.insert(target.clone(), counter.value());
        Some(self.attach(scope, BindingKind::Counter { target, counter }, vec![rid]))
    }

    /// Pin `region`'s element without animating anything.
    pub fn mount_pin(
        &mut self,
        scope: &mut Scope,
        region: ScrollRegion,
        layout: &dyn LayoutSource,
    ) -> Option<BindingId> {
        let region = region.pinned(true);
        let rid = self.tracker.register(region, layout)?;
        Some(self.attach(scope, BindingKind::Pin, vec![rid]))
    }

    fn attach(&mut self, scope: &mut Scope, kind: BindingKind, regions: Vec<RegionId>) -> BindingId {
        let id = BindingId(self.next_binding);
        self.next_binding += 1;
        for rid in &regions {
            self.owners.insert(*rid, id);
        }
        let pins = regions
            .iter()
            .filter_map(|rid| {
                let region = self.tracker.region(*rid)?;
                region.pinned.then(|| (*rid, region.element.clone()))
            })
            .collect();
        self.bindings.insert(
            id,
            Binding {
                kind,
                regions: regions.clone(),
                pins,
                frame: None,
            },
        );
        scope.push(id);

        for rid in regions {
            if let Some(update) = self.tracker.poll(rid) {
                self.dispatch(update);
            }
        }
        tracing::debug!(scope = scope.name(), binding = id.0, "binding mounted");
        id
    }

    /// Remove everything `scope` mounted: regions, bindings, pending frames and their outputs.
    pub fn revert(&mut self, scope: Scope) {
        let name = scope.name().to_owned();
        let ids = scope.into_bindings();
        let removed = ids.iter().filter(|id| self.remove_binding(**id)).count();
        tracing::debug!(scope = %name, removed, "scope reverted");
    }

    fn remove_binding(&mut self, id: BindingId) -> bool {
        let Some(binding) = self.bindings.remove(&id) else {
            return false;
        };
        for (_, element) in &binding.pins {
            self.presentation.pins.remove(element);
        }
        for rid in &binding.regions {
            self.tracker.unregister(*rid);
            self.owners.remove(rid);
        }
        if let Some(handle) = binding.frame {
            self.frames.cancel(handle);
        }
        match &binding.kind {
            BindingKind::Sequence { sequencer, .. } => {
                for track in sequencer.tracks() {
                    for property in track.curve.properties() {
                        self.presentation.remove_property(&track.target, property);
                    }
                }
            }
            BindingKind::Swap { target, .. } | BindingKind::ItemSwap { target, .. } => {
                self.presentation.active.remove(target);
            }
            BindingKind::Counter { target, .. } => {
                self.presentation.counters.remove(target);
            }
            BindingKind::Pin => {}
        }
        true
    }

    /// Handle a scroll event at `now_ms`.
    pub fn on_scroll(&mut self, scroll: f64, now_ms: u64) {
        self.clock_ms = now_ms;
        self.fps.record(now_ms);
        for update in self.tracker.on_scroll(scroll) {
            self.dispatch(update);
        }
    }

    /// Handle a resize event. Ranges are recomputed by a later `on_frame` once resizing settles.
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) {
        self.clock_ms = now_ms;
        self.tracker.on_resize(viewport);
        self.resize.call(now_ms);
    }

    /// Run one animation frame at `now_ms`.
    pub fn on_frame(&mut self, now_ms: u64, layout: &dyn LayoutSource) {
        self.clock_ms = now_ms;
        if self.resize.poll(now_ms) {
            self.refresh(layout);
        }
        if self.fps_log.ready(now_ms) {
            if let Some(fps) = self.fps.fps(now_ms) {
                tracing::debug!(fps, "scroll event rate");
            }
        }

        for (handle, bid) in self.frames.due() {
            let Some(binding) = self.bindings.get_mut(&bid) else {
                self.frames.cancel(handle);
                continue;
            };
            let still_running = match &mut binding.kind {
                BindingKind::Counter { target, counter } => {
                    let v = counter.tick(now_ms);
                    self.presentation.counters.insert(target.clone(), v);
                    counter.is_running()
                }
                BindingKind::Sequence {
                    sequencer,
                    playhead: Some(playhead),
                } => {
                    let moving = playhead.advance(now_ms);
                    sequencer.evaluate_into(playhead.position(), &mut self.presentation.properties);
                    moving
                }
                _ => false,
            };
            if !still_running {
                self.frames.cancel(handle);
                binding.frame = None;
            }
        }
    }

    /// Re-resolve every region against `layout` now, dropping bindings whose trigger vanished.
    pub fn refresh(&mut self, layout: &dyn LayoutSource) {
        self.resize.cancel();
        let outcome = self.tracker.refresh(layout);
        for rid in outcome.dropped {
            self.drop_region(rid);
        }
        for update in outcome.updates {
            self.dispatch(update);
        }
    }

    fn drop_region(&mut self, rid: RegionId) {
        let Some(bid) = self.owners.remove(&rid) else {
            return;
        };
        let remove_all = match self.bindings.get_mut(&bid) {
            Some(Binding {
                kind: BindingKind::ItemSwap { items, .. },
                regions,
                pins,
                ..
            }) => {
                for item in items.iter_mut() {
                    if *item == Some(rid) {
                        *item = None;
                    }
                }
                regions.retain(|r| *r != rid);
                pins.retain(|(r, element)| {
                    let gone = *r == rid;
                    if gone {
                        self.presentation.pins.remove(element);
                    }
                    !gone
                });
                regions.is_empty()
            }
            Some(_) => true,
            None => false,
        };
        if remove_all {
            self.remove_binding(bid);
        }
    }

    fn dispatch(&mut self, update: RegionUpdate) {
        let Some(&bid) = self.owners.get(&update.id) else {
            return;
        };
        if let (Some(pin), Some(region)) = (update.pin, self.tracker.region(update.id)) {
            self.presentation.pins.insert(region.element.clone(), pin);
        }
        let Some(binding) = self.bindings.get_mut(&bid) else {
            return;
        };

        let entered = update
            .edges
            .iter()
            .any(|e| matches!(e, EdgeEvent::Enter | EdgeEvent::EnterBack));
        let left = update
            .edges
            .iter()
            .any(|e| matches!(e, EdgeEvent::Leave | EdgeEvent::LeaveBack));
        let mut wants_frame = false;

        match &mut binding.kind {
            BindingKind::Sequence {
                sequencer,
                playhead: None,
            } => {
                sequencer.evaluate_into(update.progress, &mut self.presentation.properties);
            }
            BindingKind::Sequence {
                sequencer,
                playhead: Some(playhead),
            } => {
                for edge in &update.edges {
                    match edge {
                        EdgeEvent::Enter | EdgeEvent::EnterBack => playhead.play(),
                        EdgeEvent::LeaveBack => playhead.reverse(),
                        EdgeEvent::Leave => {}
                    }
                }
                sequencer.evaluate_into(playhead.position(), &mut self.presentation.properties);
                wants_frame = playhead.is_moving();
            }
            BindingKind::Swap { target, swap } => {
                if let SwapOutcome::Changed { from, to } = swap.on_progress(update.progress) {
                    tracing::debug!(%target, from, to, "content swap");
                    self.presentation.active.insert(target.clone(), to);
                }
            }
            BindingKind::ItemSwap {
                target,
                swap,
                items,
            } => {
                let progresses: Vec<f64> = items
                    .iter()
                    .map(|r| r.and_then(|r| self.tracker.progress(r)).unwrap_or(0.0))
                    .collect();
                if let SwapOutcome::Changed { from, to } = swap.on_items(&progresses) {
                    tracing::debug!(%target, from, to, "content swap");
                    self.presentation.active.insert(target.clone(), to);
                }
            }
            BindingKind::Counter { target, counter } => {
                for edge in &update.edges {
                    match edge {
                        EdgeEvent::Enter | EdgeEvent::EnterBack => {
                            counter.trigger(self.clock_ms);
                        }
                        EdgeEvent::Leave | EdgeEvent::LeaveBack => counter.leave(),
                    }
                }
                if entered || left {
                    self.presentation
                        .counters
                        .insert(target.clone(), counter.value());
                }
                wants_frame = counter.is_running();
            }
            BindingKind::Pin => {}
        }

        match (wants_frame, binding.frame) {
            (true, None) => binding.frame = Some(self.frames.request(bid)),
            (false, Some(handle)) => {
                self.frames.cancel(handle);
                binding.frame = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/animation_engine.rs"]
mod tests;
