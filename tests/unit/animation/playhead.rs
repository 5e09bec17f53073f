use super::*;

#[test]
fn plays_forward_over_duration() {
    let mut ph = Playhead::new(1000);
    ph.play();
    assert!(ph.advance(5000));
    assert_eq!(ph.position(), 0.0);
    assert!(ph.advance(5500));
    assert_eq!(ph.position(), 0.5);
    assert!(!ph.advance(6200));
    assert_eq!(ph.position(), 1.0);
    assert!(!ph.advance(7000));
}

#[test]
fn reverse_mid_flight_continues_from_current_position() {
    let mut ph = Playhead::new(1000);
    ph.play();
    ph.advance(0);
    ph.advance(750);
    ph.reverse();
    assert!(ph.advance(800));
    assert_eq!(ph.position(), 0.75);
    assert!(ph.advance(1300));
    assert_eq!(ph.position(), 0.25);
    assert!(!ph.advance(2000));
    assert_eq!(ph.position(), 0.0);
}

#[test]
fn reset_stops_immediately() {
    let mut ph = Playhead::new(100);
    ph.play();
    ph.advance(0);
    ph.advance(50);
    ph.reset();
    assert!(!ph.is_moving());
    assert_eq!(ph.position(), 0.0);
}
