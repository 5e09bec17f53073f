use super::*;

#[test]
fn progress_clamps_and_collapses_nan() {
    assert_eq!(Progress::new(-0.5), Progress::START);
    assert_eq!(Progress::new(2.0), Progress::END);
    assert_eq!(Progress::new(f64::NAN).get(), 0.0);
    assert_eq!(Progress::new(0.25).get(), 0.25);
}

#[test]
fn progress_active_excludes_endpoints() {
    assert!(!Progress::START.is_active());
    assert!(!Progress::END.is_active());
    assert!(Progress::new(0.5).is_active());
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(1280.0, 800.0).is_ok());
    assert!(Viewport::new(0.0, 800.0).is_err());
    assert!(Viewport::new(1280.0, f64::INFINITY).is_err());
}

#[test]
fn direction_keeps_previous_on_ties() {
    let d = ScrollDirection::Backward;
    assert_eq!(d.between(10.0, 10.0), ScrollDirection::Backward);
    assert_eq!(d.between(10.0, 11.0), ScrollDirection::Forward);
    assert_eq!(ScrollDirection::Forward.between(5.0, 1.0), ScrollDirection::Backward);
}

#[test]
fn element_id_serializes_as_plain_string() {
    let id = ElementId::new("hero");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"hero\"");
    assert_eq!(id.to_string(), "hero");
}
