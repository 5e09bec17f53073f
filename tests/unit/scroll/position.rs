use super::*;

#[test]
fn keywords_and_units_parse() {
    assert_eq!("top".parse::<Edge>().unwrap(), Edge::Fraction(0.0));
    assert_eq!("center".parse::<Edge>().unwrap(), Edge::Fraction(0.5));
    assert_eq!("bottom".parse::<Edge>().unwrap(), Edge::Fraction(1.0));
    assert_eq!("70%".parse::<Edge>().unwrap(), Edge::Fraction(0.7));
    assert_eq!("120px".parse::<Edge>().unwrap(), Edge::Px(120.0));
    assert_eq!("-40".parse::<Edge>().unwrap(), Edge::Px(-40.0));
    assert!("middle".parse::<Edge>().is_err());
    assert!("nan%".parse::<Edge>().is_err());
}

#[test]
fn anchored_positions_parse() {
    let p: TriggerPosition = "top 60%".parse().unwrap();
    assert_eq!(p, TriggerPosition::anchored(Edge::Fraction(0.0), Edge::Fraction(0.6)));

    let p: TriggerPosition = "center bottom".parse().unwrap();
    assert_eq!(p, TriggerPosition::anchored(Edge::Fraction(0.5), Edge::Fraction(1.0)));

    let p: TriggerPosition = "  center ".parse().unwrap();
    assert_eq!(p, TriggerPosition::anchored(Edge::Fraction(0.5), Edge::Fraction(0.5)));

    assert!("top center bottom".parse::<TriggerPosition>().is_err());
    assert!("".parse::<TriggerPosition>().is_err());
}

#[test]
fn relative_positions_parse() {
    let p: TriggerPosition = "+=300%".parse().unwrap();
    assert_eq!(p, TriggerPosition::Relative(Distance::ViewportPercent(300.0)));
    assert!(p.is_relative());

    let p: TriggerPosition = "+=800px".parse().unwrap();
    assert_eq!(p, TriggerPosition::Relative(Distance::Px(800.0)));

    assert!("+=-10".parse::<TriggerPosition>().is_err());
    assert!("+=lots".parse::<TriggerPosition>().is_err());
}

#[test]
fn distance_resolves_against_viewport() {
    assert_eq!(Distance::ViewportPercent(150.0).resolve(800.0), 1200.0);
    assert_eq!(Distance::Px(90.0).resolve(800.0), 90.0);
}

#[test]
fn serde_uses_string_form() {
    let p: TriggerPosition = serde_json::from_str("\"bottom 40%\"").unwrap();
    assert_eq!(p, TriggerPosition::anchored(Edge::Fraction(1.0), Edge::Fraction(0.4)));
    assert_eq!(
        serde_json::to_string(&TriggerPosition::default_start()).unwrap(),
        "\"top bottom\""
    );
}
