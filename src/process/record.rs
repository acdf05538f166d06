/*!
 * Process Records
 * Passive bookkeeping for one simulated process
 */

use crate::core::types::{Pid, Ticks};
use serde::{Deserialize, Serialize};

/// Bookkeeping for one simulated process.
///
/// `remaining` and `finish` are written exclusively by the coordinator;
/// worker threads never see this struct. That keeps a single writer for the
/// burst accounting, so no lock guards these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRecord {
    pub pid: Pid,
    /// Simulated time at which the process becomes runnable (immutable)
    pub arrival: Ticks,
    /// Total work required (immutable)
    pub burst: Ticks,
    /// Work left; decreases monotonically, only while this process owns the turn
    pub remaining: Ticks,
    /// Simulated clock value when `remaining` first hit zero
    pub finish: Option<Ticks>,
}

impl ProcessRecord {
    #[inline]
    #[must_use]
    pub const fn new(pid: Pid, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            pid,
            arrival,
            burst,
            remaining: burst,
            finish: None,
        }
    }

    /// Check if the process has consumed its full burst
    #[inline(always)]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finish.is_some()
    }

    /// Check if the process has arrived and still has work left
    ///
    /// Hot path - evaluated once per scan position in the coordinator
    #[inline(always)]
    #[must_use]
    pub const fn is_runnable_at(&self, now: Ticks) -> bool {
        self.remaining > 0 && self.arrival <= now
    }
}
