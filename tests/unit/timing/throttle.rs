use super::*;

#[test]
fn throttle_passes_once_per_interval() {
    let mut t = Throttle::new(100);
    assert!(t.ready(0));
    assert!(!t.ready(50));
    assert!(!t.ready(99));
    assert!(t.ready(100));
    assert!(!t.ready(150));
}

#[test]
fn debounce_fires_after_quiet_period() {
    let mut d = Debounce::new(150);
    d.call(0);
    d.call(100);
    assert!(!d.poll(200));
    assert!(d.poll(250));
    assert!(!d.poll(400));
    assert!(!d.is_pending());
}

#[test]
fn debounce_cancel_drops_pending_call() {
    let mut d = Debounce::new(10);
    d.call(0);
    d.cancel();
    assert!(!d.poll(100));
}
