use rate_gauge::metrics::CounterFn;
use rate_gauge::RateCounter;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn counter_handle_drives_the_gauge() {
    let counter = Arc::new(RateCounter::with_window(Duration::from_millis(50)));
    let handle = counter.as_counter();

    let start = Instant::now();
    while start.elapsed() < Duration::from_millis(100) {
        handle.increment(1);
        std::thread::sleep(Duration::from_millis(1));
    }

    assert!(counter.rate() > 0.0, "facade increments were not recorded");
}

#[test]
fn counter_fn_increment_matches_add() {
    let counter = RateCounter::with_window(Duration::from_millis(50));

    CounterFn::increment(&counter, 80);
    std::thread::sleep(Duration::from_millis(60));
    counter.tick();

    assert!(counter.rate() > 0.0);
}

#[test]
fn counter_fn_absolute_replaces_the_tally() {
    let counter = RateCounter::with_window(Duration::from_millis(50));

    counter.add(5);
    counter.absolute(0);
    std::thread::sleep(Duration::from_millis(60));
    // The wiped tally means this tick rolls over with a single event
    counter.tick();

    let rate = counter.rate();
    assert!(rate > 0.0);
    // One event over at least 60ms
    assert!(rate <= 1.0 / 0.06, "rate {} exceeds ceiling", rate);
}
