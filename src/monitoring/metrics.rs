/*!
 * Simulation Metrics
 * Turnaround and waiting time derived from finished process records
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Ticks};
use crate::process::ProcessRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived timing metrics for one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub burst: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
}

/// Per-process rows plus arithmetic means across all processes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsReport {
    pub rows: Vec<ProcessMetrics>,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
}

impl MetricsReport {
    /// Compute the report from finished process records.
    ///
    /// Pure function of its input: running it twice over the same records
    /// yields the same report. Errors if any record has not finished.
    pub fn from_records(records: &[ProcessRecord]) -> SimResult<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let finish = record.finish.ok_or(SimError::Unfinished(record.pid))?;
            let turnaround = finish - record.arrival;
            rows.push(ProcessMetrics {
                pid: record.pid,
                burst: record.burst,
                turnaround,
                waiting: turnaround.saturating_sub(record.burst),
            });
        }

        let count = rows.len().max(1) as f64;
        let avg_turnaround = rows.iter().map(|row| row.turnaround as f64).sum::<f64>() / count;
        let avg_waiting = rows.iter().map(|row| row.waiting as f64).sum::<f64>() / count;

        Ok(Self {
            rows,
            avg_turnaround,
            avg_waiting,
        })
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>10} {:>16} {:>14}",
            "Process", "Burst", "Turnaround", "Waiting"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<10} {:>10} {:>16} {:>14}",
                format!("P{}", row.pid),
                row.burst,
                row.turnaround,
                row.waiting
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Average turnaround time: {:.2}", self.avg_turnaround)?;
        writeln!(f, "Average waiting time: {:.2}", self.avg_waiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn finished(pid: Pid, arrival: Ticks, burst: Ticks, finish: Ticks) -> ProcessRecord {
        let mut record = ProcessRecord::new(pid, arrival, burst);
        record.remaining = 0;
        record.finish = Some(finish);
        record
    }

    #[test]
    fn test_turnaround_and_waiting() {
        let records = vec![finished(0, 0, 5, 9), finished(1, 1, 3, 7)];
        let report = MetricsReport::from_records(&records).unwrap();

        assert_eq!(
            report.rows,
            vec![
                ProcessMetrics {
                    pid: 0,
                    burst: 5,
                    turnaround: 9,
                    waiting: 4
                },
                ProcessMetrics {
                    pid: 1,
                    burst: 3,
                    turnaround: 6,
                    waiting: 3
                },
            ]
        );
        assert_eq!(report.avg_turnaround, 7.5);
        assert_eq!(report.avg_waiting, 3.5);
    }

    #[test]
    fn test_waiting_clamps_at_zero() {
        // A process that ran back-to-back from its arrival waits for nothing
        let records = vec![finished(0, 2, 4, 6)];
        let report = MetricsReport::from_records(&records).unwrap();
        assert_eq!(report.rows[0].waiting, 0);
    }

    #[test]
    fn test_reporting_is_idempotent() {
        let records = vec![finished(0, 0, 5, 9), finished(1, 1, 3, 7)];
        let first = MetricsReport::from_records(&records).unwrap();
        let second = MetricsReport::from_records(&records).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_unfinished_record_is_an_error() {
        let records = vec![ProcessRecord::new(4, 0, 5)];
        let err = MetricsReport::from_records(&records).unwrap_err();
        assert_eq!(err, SimError::Unfinished(4));
    }
}
