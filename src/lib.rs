//! Lock-free events-per-second rate counter.
//!
//! [`RateCounter`] counts discrete events and republishes an
//! events-per-second figure at the end of each measure window (5 seconds by
//! default). Updates are a handful of atomic operations, so it can
//! instrument frame loops, message pumps or request handlers shared across
//! threads without lock contention.
//!
//! ```
//! use rate_gauge::RateCounter;
//! use std::time::Duration;
//!
//! let fps = RateCounter::with_window(Duration::from_secs(1));
//! // In your frame loop:
//! fps.tick();
//! println!("FPS: {}", fps); // "0.0/s" until the first window completes
//! ```

mod rate;

/// Export the counter type
pub use crate::rate::{RateCounter, DEFAULT_WINDOW};
/// Re-export metrics crate
pub use ::metrics;
