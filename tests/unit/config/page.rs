use std::collections::BTreeMap;

use super::*;
use crate::{foundation::core::Rect, scroll::region::PinState};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn layout() -> BTreeMap<ElementId, Rect> {
    let f = File::open(fixture("layout.json")).unwrap();
    serde_json::from_reader(f).unwrap()
}

#[test]
fn fixture_parses_and_validates() {
    let page = PageConfig::from_path(fixture("page.json")).unwrap();
    assert_eq!(page.sections.len(), 5);
    assert_eq!(page.viewport.height, 800.0);
    assert_eq!(page.engine.resize_debounce_ms, 150);
    assert!(page.sections[0].region.pinned);
    page.validate().unwrap();
}

#[test]
fn counter_defaults_apply() {
    let page = PageConfig::from_path(fixture("page.json")).unwrap();
    let BindingDef::Counter {
        duration_ms, ease, ..
    } = &page.sections[3].binding
    else {
        panic!("stats section should be a counter");
    };
    assert_eq!(*duration_ms, 2000);
    assert_eq!(*ease, Ease::OutCubic);
}

#[test]
fn timeline_tracks_are_staggered() {
    let page = PageConfig::from_path(fixture("page.json")).unwrap();
    let BindingDef::Sequence { tracks, play_ms } = &page.sections[0].binding else {
        panic!("hero section should be a sequence");
    };
    assert_eq!(*play_ms, None);
    let seq = build_timeline(tracks).unwrap();
    let offsets: Vec<f64> = seq.tracks().iter().map(|t| t.start_offset).collect();
    assert_eq!(seq.tracks().len(), 4);
    assert_eq!(offsets[0], 0.0);
    assert_eq!(offsets[1], 0.0);
    assert!((offsets[2] - 0.1).abs() < 1e-9);
    assert!((offsets[3] - 0.2).abs() < 1e-9);
}

#[test]
fn mount_skips_sections_without_trigger() {
    let page = PageConfig::from_path(fixture("page.json")).unwrap();
    let mut engine = page.engine();
    let scope = page.mount(&mut engine, &layout()).unwrap();

    // contact is absent from the layout; features mounts three item regions.
    assert_eq!(scope.bindings().len(), 4);
    assert_eq!(engine.listener_count(), 6);

    let p = engine.presentation();
    assert_eq!(p.property("hero-title", "opacity"), Some(1.0));
    assert_eq!(p.active("gallery-image"), Some(0));
    assert_eq!(p.active("feature-image"), Some(0));
    assert_eq!(p.counter("projects"), Some(0));
    assert_eq!(p.pin("hero"), Some(PinState::Before));

    engine.revert(scope);
    assert_eq!(engine.listener_count(), 0);
    assert!(engine.presentation().is_empty());
}

#[test]
fn invalid_config_mounts_nothing() {
    let json = r#"{
        "viewport": { "width": 1280, "height": 800 },
        "sections": [
            { "id": "a", "trigger": "hero", "binding": { "kind": "pin" } },
            { "id": "b", "trigger": "hero", "binding": { "kind": "swap", "target": "g", "len": 0 } }
        ]
    }"#;
    let page = PageConfig::from_reader(json.as_bytes()).unwrap();
    let mut engine = page.engine();
    let err = page.mount(&mut engine, &layout()).unwrap_err();
    assert!(matches!(err, ScrollPhaseError::Config(_)));
    assert_eq!(engine.listener_count(), 0);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PageConfig::from_reader("{ \"viewport\": ".as_bytes()).unwrap_err();
    assert!(matches!(err, ScrollPhaseError::Serde(_)));
}

#[test]
fn unknown_binding_kind_is_rejected() {
    let json = r#"{
        "viewport": { "width": 1280, "height": 800 },
        "sections": [{ "id": "a", "trigger": "hero", "binding": { "kind": "parallax" } }]
    }"#;
    assert!(PageConfig::from_reader(json.as_bytes()).is_err());
}
