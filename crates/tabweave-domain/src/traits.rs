//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the engine and the platform.
//! Implementations live in host crates (browser bridge, CLI, tests).

use crate::{Partition, TabSnapshot};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of tab snapshots
///
/// Implemented by the platform enumeration layer
pub trait TabSource {
    /// Error type for enumeration
    type Error;

    /// Enumerate the tabs to classify
    fn tabs(&self) -> Result<Vec<TabSnapshot>, Self::Error>;
}

/// Sink for computed partitions
///
/// Implemented by the platform mutation layer
pub trait PartitionSink {
    /// Error type for applying partitions
    type Error;

    /// Apply partitions as real regroup operations
    fn apply(&mut self, partitions: &[Partition]) -> Result<(), Self::Error>;
}

/// Wall clock used for age bucketing
pub trait Clock {
    /// Current time in epoch milliseconds
    fn now_ms(&self) -> f64;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as f64)
            .unwrap_or(0.0)
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(1234.0).now_ms(), 1234.0);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000.0);
    }
}
