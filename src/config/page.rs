use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::curve::{PhaseCurve, PhaseSpec},
    animation::ease::Ease,
    animation::sequencer::Sequencer,
    animation::timeline::{Position, Timeline},
    config::validate::validate_page,
    engine::animation_engine::{AnimationEngine, EngineOpts, Playback},
    engine::scope::Scope,
    foundation::core::{ElementId, Viewport},
    foundation::error::{ScrollPhaseError, ScrollPhaseResult},
    scroll::region::ScrollRegion,
    scroll::tracker::LayoutSource,
    trigger::counter::CounterAnimator,
    trigger::swap::ContentSwap,
};

fn default_track_duration() -> f64 {
    1.0
}

fn default_counter_ms() -> u64 {
    2000
}

fn default_counter_ease() -> Ease {
    Ease::OutCubic
}

/// JSON description of a scroll-driven page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    /// Initial viewport size.
    pub viewport: Viewport,
    /// Engine tuning.
    #[serde(default)]
    pub engine: EngineOpts,
    /// Sections in page order.
    #[serde(default)]
    pub sections: Vec<SectionDef>,
}

/// One scroll region and what it drives.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionDef {
    /// Section name, used as log context.
    pub id: String,
    /// Trigger element and range.
    #[serde(flatten)]
    pub region: ScrollRegion,
    /// Animation bound to the region.
    pub binding: BindingDef,
}

/// Animation kinds a section can mount.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingDef {
    /// Phase curves laid out on a timeline.
    Sequence {
        /// Timeline entries in order.
        tracks: Vec<TrackDef>,
        /// Play over this many milliseconds on enter instead of scrubbing.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        play_ms: Option<u64>,
    },
    /// Progress-threshold content swap.
    Swap {
        /// Element whose content index is switched.
        target: ElementId,
        /// Number of variants.
        len: usize,
        /// Explicit thresholds; evenly spaced when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thresholds: Option<Vec<f64>>,
    },
    /// Content swap driven by per-item sub-regions.
    ItemSwap {
        /// Element whose content index is switched.
        target: ElementId,
        /// One region per variant.
        items: Vec<ScrollRegion>,
    },
    /// Count-up triggered on entry.
    Counter {
        /// Element showing the number.
        target: ElementId,
        /// Final value.
        value: u64,
        /// Count duration.
        #[serde(default = "default_counter_ms")]
        duration_ms: u64,
        /// Count easing.
        #[serde(default = "default_counter_ease")]
        ease: Ease,
    },
    /// Pin only.
    Pin,
}

/// One timeline entry, optionally staggered across several targets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackDef {
    /// Elements animated by this entry.
    pub targets: Vec<ElementId>,
    /// Property phases applied to every target.
    pub phases: Vec<PhaseSpec>,
    /// Length in timeline units.
    #[serde(default = "default_track_duration")]
    pub duration: f64,
    /// Placement relative to the previous entry.
    #[serde(default)]
    pub position: Position,
    /// Offset between consecutive targets.
    #[serde(default)]
    pub stagger: f64,
}

enum Mount {
    Sequence(Sequencer, Playback),
    Swap(ElementId, ContentSwap),
    ItemSwap(ElementId, Vec<ScrollRegion>, ContentSwap),
    Counter(ElementId, CounterAnimator),
    Pin,
}

impl PageConfig {
    /// Parse a page config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollPhaseResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollPhaseError::serde(format!("parse page config JSON: {e}")))
    }

    /// Parse a page config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollPhaseResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollPhaseError::config(format!("open page config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section, reporting all problems at once.
    pub fn validate(&self) -> ScrollPhaseResult<()> {
        validate_page(self)
            .map_err(|e| ScrollPhaseError::config(format!("page config validation failed: {e}")))
    }

    /// Engine configured with this page's viewport and options.
    pub fn engine(&self) -> AnimationEngine {
        AnimationEngine::with_opts(self.viewport, self.engine)
    }

    /// Mount every section on `engine` under one scope.
    ///
    /// The whole config is validated and built before anything is mounted, so an error leaves the
    /// engine untouched. Sections whose trigger element is missing from `layout` are skipped.
    #[tracing::instrument(skip(self, engine, layout), fields(sections = self.sections.len()))]
    pub fn mount(
        &self,
        engine: &mut AnimationEngine,
        layout: &dyn LayoutSource,
    ) -> ScrollPhaseResult<Scope> {
        self.validate()?;
        let built = self
            .sections
            .iter()
            .map(|s| s.build().map(|m| (s, m)))
            .collect::<ScrollPhaseResult<Vec<_>>>()?;

        let mut scope = Scope::new("page");
        for (section, mount) in built {
            let region = section.region.clone();
            let id = match mount {
                Mount::Sequence(seq, playback) => {
                    engine.mount_sequence(&mut scope, region, seq, playback, layout)
                }
                Mount::Swap(target, swap) => {
                    engine.mount_swap(&mut scope, region, target, swap, layout)
                }
                Mount::ItemSwap(target, items, swap) => {
                    engine.mount_item_swap(&mut scope, items, target, swap, layout)
                }
                Mount::Counter(target, counter) => {
                    engine.mount_counter(&mut scope, region, target, counter, layout)
                }
                Mount::Pin => engine.mount_pin(&mut scope, region, layout),
            };
            if id.is_none() {
                tracing::warn!(section = %section.id, "section not mounted");
            }
        }
        Ok(scope)
    }
}

impl SectionDef {
    fn build(&self) -> ScrollPhaseResult<Mount> {
        let wrap = |e: ScrollPhaseError| ScrollPhaseError::config(format!("section '{}': {e}", self.id));
        let mount = match &self.binding {
            BindingDef::Sequence { tracks, play_ms } => {
                let seq = build_timeline(tracks).map_err(wrap)?;
                let playback = match play_ms {
                    Some(duration_ms) => Playback::Play {
                        duration_ms: *duration_ms,
                    },
                    None => Playback::Scrub,
                };
                Mount::Sequence(seq, playback)
            }
            BindingDef::Swap {
                target,
                len,
                thresholds,
            } => {
                let swap = match thresholds {
                    Some(t) => ContentSwap::with_thresholds(*len, t.iter().copied()),
                    None => ContentSwap::evenly_spaced(*len),
                }
                .map_err(wrap)?;
                Mount::Swap(target.clone(), swap)
            }
            BindingDef::ItemSwap { target, items } => {
                let swap = ContentSwap::new(items.len()).map_err(wrap)?;
                Mount::ItemSwap(target.clone(), items.clone(), swap)
            }
            BindingDef::Counter {
                target,
                value,
                duration_ms,
                ease,
            } => Mount::Counter(
                target.clone(),
                CounterAnimator::new(*value, *duration_ms).with_ease(*ease),
            ),
            BindingDef::Pin => Mount::Pin,
        };
        Ok(mount)
    }
}

pub(crate) fn build_timeline(tracks: &[TrackDef]) -> ScrollPhaseResult<Sequencer> {
    let mut timeline = Timeline::new();
    for track in tracks {
        let curve = PhaseCurve::new(track.phases.iter().cloned())?;
        timeline.add_staggered(
            track.targets.iter().cloned(),
            &curve,
            track.duration,
            track.stagger,
            track.position,
        )?;
    }
    timeline.build()
}

#[cfg(test)]
#[path = "../../tests/unit/config/page.rs"]
mod tests;
