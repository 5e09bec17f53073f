use super::*;
use crate::{
    animation::curve::{PhaseCurve, PhaseSpec},
    foundation::core::Rect,
    scroll::region::PinState,
};

fn layout() -> BTreeMap<ElementId, Rect> {
    BTreeMap::from([
        (ElementId::new("hero"), Rect::new(0.0, 0.0, 1280.0, 800.0)),
        (ElementId::new("stats"), Rect::new(0.0, 1000.0, 1280.0, 1500.0)),
        (ElementId::new("item-0"), Rect::new(0.0, 2000.0, 1280.0, 2200.0)),
        (ElementId::new("item-1"), Rect::new(0.0, 2200.0, 1280.0, 2400.0)),
        (ElementId::new("item-2"), Rect::new(0.0, 2400.0, 1280.0, 2600.0)),
    ])
}

fn engine() -> AnimationEngine {
    AnimationEngine::new(Viewport::new(1280.0, 800.0).unwrap())
}

fn hero_region() -> ScrollRegion {
    ScrollRegion::new("hero").between("top top", "bottom top").unwrap()
}

fn fade_out() -> Sequencer {
    let curve = PhaseCurve::new([PhaseSpec::new("opacity", 1.0, 0.0)]).unwrap();
    Sequencer::new().track("title", curve, 0.0, 1.0).unwrap()
}

#[test]
fn scrub_sequence_follows_scroll() {
    let mut e = engine();
    let mut scope = Scope::new("hero");
    e.mount_sequence(&mut scope, hero_region(), fade_out(), Playback::Scrub, &layout())
        .unwrap();
    assert_eq!(e.presentation().property("title", "opacity"), Some(1.0));

    e.on_scroll(400.0, 16);
    let v = e.presentation().property("title", "opacity").unwrap();
    assert!(v > 0.0 && v < 1.0);

    e.on_scroll(900.0, 32);
    assert_eq!(e.presentation().property("title", "opacity"), Some(0.0));

    e.on_scroll(0.0, 48);
    assert_eq!(e.presentation().property("title", "opacity"), Some(1.0));
    e.revert(scope);
}

#[test]
fn missing_trigger_mounts_nothing() {
    let mut e = engine();
    let mut scope = Scope::new("ghost");
    let id = e.mount_sequence(
        &mut scope,
        ScrollRegion::new("ghost"),
        fade_out(),
        Playback::Scrub,
        &layout(),
    );
    assert!(id.is_none());
    assert!(scope.is_empty());
    assert_eq!(e.listener_count(), 0);
    assert!(e.presentation().is_empty());
    e.revert(scope);
}

#[test]
fn revert_releases_listeners_frames_and_outputs() {
    let mut e = engine();
    let mut scope = Scope::new("page");
    e.mount_sequence(&mut scope, hero_region(), fade_out(), Playback::Scrub, &layout())
        .unwrap();
    e.mount_counter(
        &mut scope,
        ScrollRegion::new("stats"),
        "projects",
        CounterAnimator::new(120, 2000),
        &layout(),
    )
    .unwrap();
    e.mount_pin(&mut scope, hero_region(), &layout()).unwrap();

    e.on_scroll(400.0, 100);
    assert_eq!(e.listener_count(), 3);
    assert_eq!(e.pending_frames(), 1);

    e.revert(scope);
    assert_eq!(e.listener_count(), 0);
    assert_eq!(e.pending_frames(), 0);
    assert_eq!(e.binding_count(), 0);
    assert!(e.presentation().is_empty());
}

#[test]
fn revert_leaves_other_scopes_alone() {
    let mut e = engine();
    let mut a = Scope::new("a");
    let mut b = Scope::new("b");
    e.mount_sequence(&mut a, hero_region(), fade_out(), Playback::Scrub, &layout())
        .unwrap();
    e.mount_swap(
        &mut b,
        hero_region(),
        "gallery",
        ContentSwap::evenly_spaced(3).unwrap(),
        &layout(),
    )
    .unwrap();

    e.revert(a);
    assert_eq!(e.listener_count(), 1);
    assert_eq!(e.presentation().property("title", "opacity"), None);
    assert_eq!(e.presentation().active("gallery"), Some(0));
    e.revert(b);
}

#[test]
fn counter_counts_up_once_per_entry() {
    let mut e = engine();
    let mut scope = Scope::new("stats");
    e.mount_counter(
        &mut scope,
        ScrollRegion::new("stats"),
        "projects",
        CounterAnimator::new(120, 2000),
        &layout(),
    )
    .unwrap();
    assert_eq!(e.presentation().counter("projects"), Some(0));

    // stats starts at 1000 - 800 = 200.
    e.on_scroll(300.0, 1000);
    assert_eq!(e.pending_frames(), 1);

    e.on_frame(2000, &layout());
    let mid = e.presentation().counter("projects").unwrap();
    assert!(mid > 0 && mid < 120);

    e.on_frame(3000, &layout());
    assert_eq!(e.presentation().counter("projects"), Some(120));
    assert_eq!(e.pending_frames(), 0);

    e.on_scroll(350.0, 3100);
    assert_eq!(e.presentation().counter("projects"), Some(120));

    e.on_scroll(0.0, 3200);
    assert_eq!(e.presentation().counter("projects"), Some(0));
    e.revert(scope);
}

#[test]
fn swap_publishes_threshold_index() {
    let mut e = engine();
    let mut scope = Scope::new("gallery");
    e.mount_swap(
        &mut scope,
        hero_region(),
        "gallery",
        ContentSwap::with_thresholds(3, [0.3, 0.6]).unwrap(),
        &layout(),
    )
    .unwrap();
    assert_eq!(e.presentation().active("gallery"), Some(0));

    e.on_scroll(400.0, 10);
    assert_eq!(e.presentation().active("gallery"), Some(1));
    e.on_scroll(700.0, 20);
    assert_eq!(e.presentation().active("gallery"), Some(2));
    e.on_scroll(100.0, 30);
    assert_eq!(e.presentation().active("gallery"), Some(0));
    e.revert(scope);
}

#[test]
fn item_swap_tracks_last_entered_item() {
    let mut e = engine();
    let mut scope = Scope::new("features");
    let items = (0..3)
        .map(|i| {
            ScrollRegion::new(format!("item-{i}"))
                .between("top center", "bottom center")
                .unwrap()
        })
        .collect();
    e.mount_item_swap(
        &mut scope,
        items,
        "feature-image",
        ContentSwap::new(3).unwrap(),
        &layout(),
    )
    .unwrap();
    assert_eq!(e.listener_count(), 3);

    // item-1 starts at 2200 - 400 = 1800.
    e.on_scroll(1850.0, 10);
    assert_eq!(e.presentation().active("feature-image"), Some(1));
    e.on_scroll(1700.0, 20);
    assert_eq!(e.presentation().active("feature-image"), Some(0));
    e.revert(scope);
}

#[test]
fn pin_reports_offset_and_spacing() {
    let mut e = engine();
    let mut scope = Scope::new("hero");
    e.mount_pin(&mut scope, hero_region(), &layout()).unwrap();
    assert_eq!(e.presentation().pin("hero"), Some(PinState::Before));

    e.on_scroll(300.0, 10);
    assert_eq!(
        e.presentation().pin("hero"),
        Some(PinState::Pinned { offset: 300.0 })
    );
    e.on_scroll(2000.0, 20);
    assert_eq!(
        e.presentation().pin("hero"),
        Some(PinState::After { spacing: 800.0 })
    );
    e.revert(scope);
}

#[test]
fn play_sequence_runs_on_frames_and_reverses() {
    let mut e = engine();
    let mut scope = Scope::new("intro");
    e.mount_sequence(
        &mut scope,
        hero_region(),
        fade_out(),
        Playback::Play { duration_ms: 1000 },
        &layout(),
    )
    .unwrap();

    e.on_scroll(100.0, 0);
    assert_eq!(e.pending_frames(), 1);
    e.on_frame(0, &layout());
    e.on_frame(500, &layout());
    let v = e.presentation().property("title", "opacity").unwrap();
    assert!(v > 0.0 && v < 1.0);
    e.on_frame(1500, &layout());
    assert_eq!(e.presentation().property("title", "opacity"), Some(0.0));
    assert_eq!(e.pending_frames(), 0);

    e.on_scroll(0.0, 2000);
    assert_eq!(e.pending_frames(), 1);
    e.on_frame(2000, &layout());
    e.on_frame(4000, &layout());
    assert_eq!(e.presentation().property("title", "opacity"), Some(1.0));
    assert_eq!(e.pending_frames(), 0);
    e.revert(scope);
}

#[test]
fn resize_refreshes_after_debounce() {
    let mut e = engine();
    let mut scope = Scope::new("stats");
    let id = e
        .mount_sequence(
            &mut scope,
            ScrollRegion::new("stats"),
            fade_out(),
            Playback::Scrub,
            &layout(),
        )
        .unwrap();
    assert_eq!(scope.bindings(), &[id]);

    e.on_scroll(200.0, 0);
    assert_eq!(e.presentation().property("title", "opacity"), Some(1.0));

    // Taller viewport moves the start to 1000 - 1000 = 0.
    e.on_resize(Viewport::new(1280.0, 1000.0).unwrap(), 10);
    e.on_frame(100, &layout());
    assert!(e.tracker().is_layout_dirty());
    e.on_frame(200, &layout());
    assert!(!e.tracker().is_layout_dirty());
    let v = e.presentation().property("title", "opacity").unwrap();
    assert!(v < 1.0);
    e.revert(scope);
}

#[test]
fn refresh_drops_bindings_whose_trigger_vanished() {
    let mut e = engine();
    let mut scope = Scope::new("page");
    e.mount_sequence(&mut scope, hero_region(), fade_out(), Playback::Scrub, &layout())
        .unwrap();
    let mut shrunk = layout();
    shrunk.remove(&ElementId::new("hero"));

    e.refresh(&shrunk);
    assert_eq!(e.listener_count(), 0);
    assert_eq!(e.binding_count(), 0);
    assert_eq!(e.presentation().property("title", "opacity"), None);
    e.revert(scope);
}

#[test]
fn refresh_clears_pin_of_vanished_trigger() {
    let mut e = engine();
    let mut scope = Scope::new("hero");
    e.mount_pin(&mut scope, hero_region(), &layout()).unwrap();
    e.on_scroll(300.0, 10);
    assert_eq!(
        e.presentation().pin("hero"),
        Some(PinState::Pinned { offset: 300.0 })
    );

    let mut shrunk = layout();
    shrunk.remove(&ElementId::new("hero"));
    e.refresh(&shrunk);
    assert_eq!(e.presentation().pin("hero"), None);
    assert!(e.presentation().is_empty());
    e.revert(scope);
}

#[test]
fn clock_going_backwards_does_not_break_scroll_rate() {
    let mut e = engine();
    e.on_scroll(0.0, 100);
    e.on_scroll(10.0, 50);
    assert_eq!(e.scroll_fps(), None);
    e.on_frame(60, &layout());

    e.on_scroll(20.0, 150);
    let fps = e.scroll_fps().unwrap();
    assert!(fps.is_finite() && fps > 0.0);
}

#[test]
fn refresh_updates_pin_spacing_past_the_end() {
    let mut e = engine();
    let mut scope = Scope::new("hero");
    e.mount_pin(&mut scope, hero_region(), &layout()).unwrap();
    e.on_scroll(2000.0, 10);
    assert_eq!(
        e.presentation().pin("hero"),
        Some(PinState::After { spacing: 800.0 })
    );

    let mut taller = layout();
    taller.insert(ElementId::new("hero"), Rect::new(0.0, 0.0, 1280.0, 1000.0));
    e.refresh(&taller);
    assert_eq!(
        e.presentation().pin("hero"),
        Some(PinState::After { spacing: 1000.0 })
    );
    e.revert(scope);
}
