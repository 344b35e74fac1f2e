use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Window length applied by [`RateCounter::new`]
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5);

/// Thread-safe counter measuring events per second over a configurable window.
///
/// Every call to [`tick`](RateCounter::tick) records one event. Once the
/// window has elapsed, the thread that wins the rollover publishes
/// `events / elapsed_seconds` as the new [`rate`](RateCounter::rate) and the
/// count starts over. The rate stays at `0.0` until the first window
/// completes.
///
/// All state lives in atomics; no operation takes a lock or blocks, so the
/// counter can sit on hot paths (frame loops, message pumps) shared across
/// threads.
#[derive(Debug)]
pub struct RateCounter {
    window: Duration,
    origin: Instant,
    // Nanoseconds since `origin` at which the current window opened.
    started: AtomicU64,
    count: AtomicU64,
    // f64 bits of the last published rate.
    rate: AtomicU64,
}

impl RateCounter {
    /// Creates a counter with the [`DEFAULT_WINDOW`] of 5 seconds
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    /// Creates a counter that recomputes its rate every `window`
    ///
    /// A zero window is valid: a rollover is then attempted on nearly every
    /// event, which makes the rate noisy but never fails.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            origin: Instant::now(),
            started: AtomicU64::new(0),
            count: AtomicU64::new(0),
            rate: AtomicU64::new(0),
        }
    }

    /// The configured measure window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records a single event
    ///
    /// If the window has elapsed this also recomputes the rate; the claiming
    /// swap guarantees at most one thread performs that rollover.
    #[inline]
    pub fn tick(&self) {
        self.add(1);
    }

    /// Records `n` events in a single atomic increment
    #[inline]
    pub fn add(&self, n: u64) {
        self.count.fetch_add(n, Ordering::AcqRel);

        let now = self.origin.elapsed();
        let started = Duration::from_nanos(self.started.load(Ordering::Acquire));
        let elapsed = now.saturating_sub(started);
        if elapsed < self.window {
            return;
        }

        // Claim the rollover. Only the thread whose swap captures a non-zero
        // count proceeds; concurrent losers see zero and return.
        let captured = self.count.swap(0, Ordering::AcqRel);
        if captured > 0 {
            let secs = elapsed.as_secs_f64();
            if secs > 0.0 {
                self.rate
                    .store((captured as f64 / secs).to_bits(), Ordering::Release);
            }
            self.started
                .store(self.origin.elapsed().as_nanos() as u64, Ordering::Release);
        }
    }

    /// Records a single event and returns the counter for chaining
    ///
    /// Observably identical to [`tick`](RateCounter::tick).
    #[inline]
    pub fn increment(&self) -> &Self {
        self.tick();
        self
    }

    /// The last published rate in events per second
    ///
    /// Returns `0.0` until the first window completes. Safe to call from any
    /// thread concurrently with [`tick`](RateCounter::tick).
    #[inline]
    pub fn rate(&self) -> f64 {
        f64::from_bits(self.rate.load(Ordering::Relaxed))
    }

    /// The current rate as a plain number, equivalent to [`rate`](RateCounter::rate)
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.rate()
    }

    /// Resets count and rate to zero and reopens the window
    ///
    /// Each field is reset atomically but the three stores are not one
    /// transaction: a [`tick`](RateCounter::tick) racing a reset may land
    /// its event before or after the wipe. Accepted behavior for an
    /// approximate gauge, not a correctness bug.
    pub fn reset(&self) {
        self.count.store(0, Ordering::Release);
        self.rate.store(0f64.to_bits(), Ordering::Release);
        self.started
            .store(self.origin.elapsed().as_nanos() as u64, Ordering::Release);
    }

    /// Wraps the counter in a [`metrics::Counter`] handle
    ///
    /// Incrementing the handle records events here, so code paths already
    /// instrumented through the `metrics` facade feed the gauge without
    /// touching this crate's API.
    pub fn as_counter(self: &Arc<Self>) -> metrics::Counter {
        metrics::Counter::from_arc(self.clone())
    }
}

impl Default for RateCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the rate with one decimal digit, e.g. `42.7/s`
impl fmt::Display for RateCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}/s", self.rate())
    }
}

impl From<&RateCounter> for f64 {
    fn from(counter: &RateCounter) -> f64 {
        counter.rate()
    }
}

impl metrics::CounterFn for RateCounter {
    /// Records `value` events
    fn increment(&self, value: u64) {
        self.add(value);
    }

    /// Replaces the in-window tally with an absolute value
    ///
    /// The rollover still publishes `tally / elapsed`, so driving the counter
    /// with absolute snapshots only makes sense if they are deltas in
    /// disguise; facade-driven callers normally use `increment`.
    fn absolute(&self, value: u64) {
        self.count.store(value, Ordering::Release);
    }
}
