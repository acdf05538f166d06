/*!
 * Scheduling Coordinator
 * Round-robin selection, quantum grants, and the simulated clock
 */

use super::record::ProcessRecord;
use super::rendezvous::Rendezvous;
use super::worker;
use crate::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Ticks};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// One granted slice, recorded in grant order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GrantRecord {
    pub pid: Pid,
    pub quantum: Ticks,
    /// Simulated clock value when the slice was granted
    pub started_at: Ticks,
}

/// Aggregate counters for one simulation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimStats {
    pub total_grants: u64,
    /// Grants after which the process still had work left
    pub preemptions: u64,
    /// Times the clock jumped forward because nothing had arrived yet
    pub idle_jumps: u64,
    /// Final value of the simulated clock
    pub sim_duration: Ticks,
}

/// Everything a finished simulation produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimOutcome {
    pub records: Vec<ProcessRecord>,
    pub grants: Vec<GrantRecord>,
    pub stats: SimStats,
}

/// Owns the process table and drives the rendezvous channel.
///
/// Selection, clock advancement, and all writes to `remaining`/`finish`
/// happen here, serialized by the single grant-then-wait handshake, so no
/// race exists between "who is runnable" and "whose remaining changes".
pub struct Coordinator {
    records: Vec<ProcessRecord>,
    quantum: Ticks,
    work_unit: Duration,
    channel: Arc<Rendezvous>,
}

impl Coordinator {
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        let records = config
            .processes
            .iter()
            .enumerate()
            .map(|(pid, spec)| ProcessRecord::new(pid as Pid, spec.arrival, spec.burst))
            .collect();

        Self {
            records,
            quantum: config.quantum,
            work_unit: config.work_unit,
            channel: Arc::new(Rendezvous::new()),
        }
    }

    /// Run the simulation to completion.
    ///
    /// Spawns one worker per process, opens the start gate, drives the
    /// round-robin loop until every process finishes, then stops and joins
    /// every worker before the records are handed out.
    pub fn run(mut self) -> SimResult<SimOutcome> {
        let handles = self.spawn_workers()?;
        self.channel.open();

        let (grants, stats) = self.drive();

        self.channel.shutdown();
        Self::join_workers(handles)?;

        Ok(SimOutcome {
            records: self.records,
            grants,
            stats,
        })
    }

    fn spawn_workers(&self) -> SimResult<Vec<JoinHandle<()>>> {
        let mut handles = Vec::with_capacity(self.records.len());
        for record in &self.records {
            match worker::spawn(record.pid, Arc::clone(&self.channel), self.work_unit) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Release the workers that did start before bailing out
                    self.channel.open();
                    self.channel.shutdown();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(e);
                }
            }
        }
        Ok(handles)
    }

    /// Selection/grant loop per the round-robin discipline.
    fn drive(&mut self) -> (Vec<GrantRecord>, SimStats) {
        let n = self.records.len();
        let mut now: Ticks = 0;
        let mut cursor = 0usize;
        let mut finished = 0usize;
        let mut grants = Vec::new();
        let mut stats = SimStats::default();

        info!("scheduling {} processes with quantum {}", n, self.quantum);

        while finished < n {
            let Some(picked) = self.select(cursor, now) else {
                // Nothing runnable: jump the clock to the next arrival among
                // unfinished processes and retry without granting a turn.
                let next = self.next_arrival();
                debug!("idle at {}, advancing clock to {}", now, next);
                now = next;
                stats.idle_jumps += 1;
                continue;
            };

            let pid = self.records[picked].pid;
            let quantum = self.quantum.min(self.records[picked].remaining);
            grants.push(GrantRecord {
                pid,
                quantum,
                started_at: now,
            });
            stats.total_grants += 1;

            let consumed = self.channel.grant(pid, quantum);

            let record = &mut self.records[picked];
            record.remaining = record.remaining.saturating_sub(consumed);
            now += consumed;

            if record.remaining == 0 {
                if record.finish.is_none() {
                    record.finish = Some(now);
                    finished += 1;
                    info!("process {} finished at {}", pid, now);
                }
            } else {
                stats.preemptions += 1;
            }

            // Standard rotation: the next scan starts right after the picked
            // process, whether or not it finished.
            cursor = (picked + 1) % n;
        }

        stats.sim_duration = now;
        (grants, stats)
    }

    /// Circular scan from `cursor` for the first arrived process with work
    /// left. Among simultaneously runnable processes the one closest to the
    /// cursor in circular distance wins; that is the fairness rule.
    fn select(&self, cursor: usize, now: Ticks) -> Option<usize> {
        let n = self.records.len();
        (0..n)
            .map(|offset| (cursor + offset) % n)
            .find(|&i| self.records[i].is_runnable_at(now))
    }

    /// Earliest arrival among processes that still have work left.
    ///
    /// Only called while at least one process is unfinished, so the minimum
    /// exists; the fallback is never reached.
    fn next_arrival(&self) -> Ticks {
        self.records
            .iter()
            .filter(|record| record.remaining > 0)
            .map(|record| record.arrival)
            .min()
            .unwrap_or(0)
    }

    fn join_workers(handles: Vec<JoinHandle<()>>) -> SimResult<()> {
        for (pid, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| SimError::WorkerPanicked(pid as Pid))?;
        }
        Ok(())
    }
}
