//! scrollphase is a headless scroll-phase animation engine.
//!
//! It turns a viewport scroll position into per-element numeric outputs that a rendering layer
//! applies however it likes:
//!
//! - Describe scroll ranges with [`ScrollRegion`] and track them with a [`ViewportTracker`]
//! - Map progress to property values with [`PhaseCurve`], [`Sequencer`] and [`Timeline`]
//! - Switch discrete content with [`ContentSwap`] and count numbers up with [`CounterAnimator`]
//! - Mount all of it on one [`AnimationEngine`] through a [`Scope`], and read [`Presentation`]
//!
//! Pages can also be described in JSON ([`PageConfig`]). Contact form handling lives in
//! [`submit_contact`].
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod config;
mod contact;
mod engine;
mod foundation;
mod scroll;
mod timing;
mod trigger;

pub use crate::foundation::core::{
    ElementId, Point, Progress, Rect, ScrollDirection, Vec2, Viewport,
};
pub use crate::foundation::error::{ScrollPhaseError, ScrollPhaseResult};

pub use crate::animation::curve::{PhaseCurve, PhaseSpec};
pub use crate::animation::ease::Ease;
pub use crate::animation::playhead::Playhead;
pub use crate::animation::sequencer::{ElementValues, SequenceTrack, Sequencer};
pub use crate::animation::timeline::{Position, Timeline};

pub use crate::scroll::position::{Distance, Edge, TriggerPosition};
pub use crate::scroll::region::{EdgeEvent, PinState, ResolvedRange, ScrollRegion, edge_events};
pub use crate::scroll::tracker::{
    LayoutSource, RefreshOutcome, RegionId, RegionUpdate, ViewportTracker,
};

pub use crate::trigger::counter::{CounterAnimator, CounterState};
pub use crate::trigger::swap::{ContentSwap, SwapOutcome};

pub use crate::timing::fps::FpsSampler;
pub use crate::timing::throttle::{Debounce, Throttle};

pub use crate::engine::animation_engine::{AnimationEngine, BindingId, EngineOpts, Playback};
pub use crate::engine::frame::FrameHandle;
pub use crate::engine::presentation::Presentation;
pub use crate::engine::scope::Scope;

pub use crate::config::page::{BindingDef, PageConfig, SectionDef, TrackDef};

pub use crate::contact::submit::{
    ContactDelivery, ContactError, ContactResponse, SimulatedDelivery, submit_contact,
};
pub use crate::contact::validate::{ContactField, ContactSubmission, FieldErrors};
