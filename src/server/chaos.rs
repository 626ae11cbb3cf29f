//! Randomized failure and delay injection.

use std::time::Duration;

use rand::Rng;

/// Decide whether to inject a failure.
pub fn flip(probability: f64) -> bool {
    rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0))
}

/// Sample a uniformly random delay strictly below `max_ms`.
pub fn delay_below(max_ms: u64) -> Duration {
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
}
