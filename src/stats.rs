// Session scoring metrics, derived from counters and never stored

use crate::difficulty::Difficulty;
use std::time::Duration;

/// Final tallies of a finished session, handed to the score store
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub player: String,
    pub difficulty: Difficulty,
    pub elapsed: Duration,
    pub hits: u32,
    pub clicks: u32,
}

impl SessionSummary {
    pub fn speed(&self) -> u32 {
        speed(self.hits, self.elapsed)
    }

    pub fn accuracy(&self) -> f64 {
        accuracy(self.hits, self.clicks)
    }
}

/// Whole targets hit per second, rounded down. Zero before any time has passed.
pub fn speed(hits: u32, elapsed: Duration) -> u32 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    (hits as f64 / secs).floor() as u32
}

/// Percentage of clicks that hit a target, zero when nothing was clicked
pub fn accuracy(hits: u32, clicks: u32) -> f64 {
    if clicks == 0 {
        return 0.0;
    }
    hits as f64 / clicks as f64 * 100.0
}

pub fn lives_remaining(lives: u32, misses: u32) -> u32 {
    lives.saturating_sub(misses)
}
