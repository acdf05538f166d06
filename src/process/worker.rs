/*!
 * Worker Threads
 * One thread per simulated process, consuming granted slices
 */

use super::rendezvous::{Rendezvous, Turn};
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Ticks};
use log::{debug, trace};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Spawn the worker thread for one simulated process.
///
/// The worker never self-selects a turn and never touches the process table;
/// it only consumes what the coordinator grants and reports it back.
pub fn spawn(
    pid: Pid,
    channel: Arc<Rendezvous>,
    work_unit: Duration,
) -> SimResult<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("sim-worker-{}", pid))
        .spawn(move || run(pid, &channel, work_unit))
        .map_err(|e| SimError::SpawnFailed {
            pid,
            reason: e.to_string(),
        })
}

fn run(pid: Pid, channel: &Rendezvous, work_unit: Duration) {
    loop {
        match channel.await_turn(pid) {
            Turn::Stop => {
                debug!("worker {} stopping", pid);
                break;
            }
            Turn::Granted(0) => {
                // Zero grant means the burst is already exhausted; hand the
                // turn straight back without simulating anything.
                channel.complete(pid, 0);
            }
            Turn::Granted(quantum) => {
                trace!("worker {} running for {} units", pid, quantum);
                simulate_work(quantum, work_unit);
                channel.complete(pid, quantum);
            }
        }
    }
}

/// Burn wall-clock time proportional to the granted quantum.
///
/// Runs outside the channel lock. The contract is only that the delay is
/// monotonic in the quantum; tests pass a zero work unit to skip it entirely.
fn simulate_work(quantum: Ticks, work_unit: Duration) {
    if work_unit.is_zero() {
        return;
    }
    for _ in 0..quantum {
        thread::sleep(work_unit);
    }
}
