/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};

/// Simulated process ID (index into the process table)
pub type Pid = u32;

/// Simulated time in abstract units
pub type Ticks = u64;

/// Bounds on accepted simulation inputs
///
/// The classic exercise hardcodes a cap of 10 processes; here the cap is a
/// policy value so callers can raise or drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimLimits {
    pub max_processes: usize,
}

impl Default for SimLimits {
    fn default() -> Self {
        Self { max_processes: 10 }
    }
}

impl SimLimits {
    /// Create limits with a custom process-count cap
    #[inline]
    #[must_use]
    pub const fn with_max_processes(max_processes: usize) -> Self {
        Self { max_processes }
    }

    /// Accept any non-zero process count
    #[inline]
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_processes: usize::MAX,
        }
    }
}
