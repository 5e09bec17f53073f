use super::*;

#[test]
fn stats_reach_exact_targets() {
    for target in [15u64, 200, 30, 100] {
        let mut c = CounterAnimator::new(target, 2000);
        assert!(c.trigger(10_000));
        let mut now = 10_000;
        let mut last = 0;
        while c.is_running() {
            now += 16;
            let v = c.tick(now);
            assert!(v >= last, "counter went backwards for {target}");
            last = v;
        }
        assert_eq!(c.value(), target);
        assert_eq!(c.state(), CounterState::Complete);
    }
}

#[test]
fn ease_out_slows_near_completion() {
    let c = CounterAnimator::new(200, 1000);
    let first_tenth = c.value_at(100) - c.value_at(0);
    let last_tenth = c.value_at(1000) - c.value_at(900);
    assert!(first_tenth > last_tenth);
}

#[test]
fn dropped_frames_do_not_delay_completion() {
    let mut c = CounterAnimator::new(100, 1000);
    c.trigger(0);
    assert!(c.tick(200) > 0);
    assert_eq!(c.tick(5_000), 100);
    assert!(!c.is_running());
}

#[test]
fn retrigger_while_running_or_complete_is_ignored() {
    let mut c = CounterAnimator::new(30, 1000);
    assert!(c.trigger(0));
    let mid = c.tick(500);
    assert!(!c.trigger(600));
    assert!(c.tick(600) >= mid);

    c.tick(2000);
    assert!(!c.trigger(3000));
    assert_eq!(c.tick(3001), 30);
}

#[test]
fn leaving_rearms_replay() {
    let mut c = CounterAnimator::new(15, 500);
    c.trigger(0);
    c.tick(1000);
    c.leave();
    assert_eq!(c.value(), 0);
    assert_eq!(c.state(), CounterState::Idle);
    assert!(c.trigger(2000));
    assert!(c.tick(2100) < 15);
    assert_eq!(c.tick(2500), 15);
}

#[test]
fn zero_duration_completes_on_trigger() {
    let mut c = CounterAnimator::new(7, 0);
    c.trigger(0);
    assert_eq!(c.value(), 7);
    assert_eq!(c.state(), CounterState::Complete);
}

#[test]
fn idle_counter_shows_zero() {
    let mut c = CounterAnimator::new(50, 1000);
    assert_eq!(c.tick(123), 0);
}
