use instant::Duration;
use scene_ngin::clock::Clock;

#[test]
fn ticks_are_monotonic() {
    let mut clock = Clock::new();
    let first = clock.tick();
    std::thread::sleep(Duration::from_millis(5));
    let second = clock.tick();

    assert!(second.elapsed > first.elapsed);
    assert!(second.delta >= Duration::from_millis(5));
    assert!(second.elapsed >= second.delta);
    assert!(second.elapsed_secs() > 0.0);
}

#[test]
fn first_tick_is_near_zero() {
    let mut clock = Clock::new();
    let time = clock.tick();
    assert!(time.elapsed < Duration::from_secs(1));
    assert_eq!(time.elapsed, time.delta);
}
