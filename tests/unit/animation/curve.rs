use super::*;

fn fade_and_rise() -> PhaseCurve {
    PhaseCurve::new([
        PhaseSpec::new("opacity", 0.0, 1.0)
            .window(0.0, 0.5)
            .ease(Ease::Linear),
        PhaseSpec::new("y", 100.0, 0.0).ease(Ease::OutCubic),
    ])
    .unwrap()
}

#[test]
fn linear_window_interpolates_and_holds() {
    let curve = fade_and_rise();
    assert_eq!(curve.sample("opacity", 0.25), Some(0.5));
    assert_eq!(curve.sample("opacity", 0.5), Some(1.0));
    assert_eq!(curve.sample("opacity", 0.9), Some(1.0));
    assert_eq!(curve.sample("missing", 0.5), None);
}

#[test]
fn evaluate_is_deterministic() {
    let curve = fade_and_rise();
    for i in 0..=100 {
        let p = f64::from(i) / 100.0;
        assert_eq!(curve.evaluate(p), curve.evaluate(p));
    }
}

#[test]
fn progress_is_clamped_not_extrapolated() {
    let curve = fade_and_rise();
    assert_eq!(curve.evaluate(-1.0), curve.evaluate(0.0));
    assert_eq!(curve.evaluate(3.0), curve.evaluate(1.0));
    assert_eq!(curve.sample("y", 5.0), Some(0.0));
}

#[test]
fn gap_between_segments_holds_last_value() {
    let curve = PhaseCurve::new([
        PhaseSpec::new("x", 0.0, 10.0)
            .window(0.1, 0.3)
            .ease(Ease::Linear),
        PhaseSpec::new("x", 10.0, -5.0)
            .window(0.6, 0.8)
            .ease(Ease::Linear),
    ])
    .unwrap();

    let x = |p: f64| curve.sample("x", p).unwrap();
    assert_eq!(x(0.0), 0.0);
    assert!((x(0.2) - 5.0).abs() < 1e-9);
    assert_eq!(x(0.45), 10.0);
    assert!((x(0.7) - 2.5).abs() < 1e-9);
    assert_eq!(x(1.0), -5.0);
}

#[test]
fn declaration_order_does_not_matter() {
    let a = PhaseSpec::new("x", 0.0, 1.0).window(0.0, 0.4);
    let b = PhaseSpec::new("x", 1.0, 2.0).window(0.5, 1.0);
    let forward = PhaseCurve::new([a.clone(), b.clone()]).unwrap();
    let backward = PhaseCurve::new([b, a]).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn zero_width_window_is_a_step() {
    let curve = PhaseCurve::new([PhaseSpec::new("visible", 0.0, 1.0).window(0.5, 0.5)]).unwrap();
    assert_eq!(curve.sample("visible", 0.49), Some(0.0));
    assert_eq!(curve.sample("visible", 0.5), Some(1.0));
}

#[test]
fn invalid_specs_are_rejected() {
    assert!(PhaseCurve::new([PhaseSpec::new("", 0.0, 1.0)]).is_err());
    assert!(PhaseCurve::new([PhaseSpec::new("x", f64::NAN, 1.0)]).is_err());
    assert!(PhaseCurve::new([PhaseSpec::new("x", 0.0, 1.0).window(0.6, 0.2)]).is_err());
    assert!(PhaseCurve::new([PhaseSpec::new("x", 0.0, 1.0).window(0.0, 1.5)]).is_err());

    let err = PhaseCurve::new([
        PhaseSpec::new("x", 0.0, 1.0).window(0.0, 0.6),
        PhaseSpec::new("x", 1.0, 0.0).window(0.5, 1.0),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("overlap"));
}

#[test]
fn spec_defaults_cover_full_window() {
    let spec: PhaseSpec = serde_json::from_str(r#"{"property":"scale","from":0.8,"to":1}"#).unwrap();
    assert_eq!(spec.start, 0.0);
    assert_eq!(spec.end, 1.0);
    assert_eq!(spec.ease, Ease::OutQuad);
}
