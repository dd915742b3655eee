//! Injectable time and randomness
//!
//! The timing rule reads the local hour and the pattern rule samples a random
//! source. Both are reached only through these traits so callers decide
//! whether scoring sees the real world or a scripted one.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Timelike, Utc};
use rand::Rng;

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Current local time
    fn now(&self) -> DateTime<FixedOffset>;

    /// Local hour of day (0-23)
    fn local_hour(&self) -> u32 {
        self.now().hour()
    }

    /// Seconds since the Unix epoch
    fn unix_timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Source of randomness
pub trait RandomSource: Send + Sync {
    /// Returns true with the given probability
    fn chance(&self, probability: f64) -> bool;

    /// Uniform integer in `low..=high`
    fn range_inclusive(&self, low: u32, high: u32) -> u32;
}

/// Wall clock in the host's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Freeze at `instant`
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }

    /// Freeze at `hour`:00 UTC on 2024-01-15
    pub fn at_hour(hour: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(2024, 1, 15, hour % 24, 0, 0)
            .single()
            .unwrap_or_default();
        Self::new(instant.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// Thread-local RNG from `rand`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn chance(&self, probability: f64) -> bool {
        // gen_bool panics outside [0, 1]; NaN falls through to false
        if probability >= 1.0 {
            true
        } else if probability > 0.0 {
            rand::thread_rng().gen_bool(probability)
        } else {
            false
        }
    }

    fn range_inclusive(&self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Random source with scripted answers
#[derive(Debug, Clone, Copy)]
pub struct ScriptedRandom {
    hit: bool,
    value: u32,
}

impl ScriptedRandom {
    /// Every `chance` returns `hit`; every range returns `value` clamped into range
    pub fn new(hit: bool, value: u32) -> Self {
        Self { hit, value }
    }

    /// Never hits; ranges yield their lower bound
    pub fn never() -> Self {
        Self::new(false, 0)
    }

    /// Always hits; ranges yield their lower bound
    pub fn always() -> Self {
        Self::new(true, 0)
    }
}

impl RandomSource for ScriptedRandom {
    fn chance(&self, _probability: f64) -> bool {
        self.hit
    }

    fn range_inclusive(&self, low: u32, high: u32) -> u32 {
        self.value.clamp(low, high.max(low))
    }
}
