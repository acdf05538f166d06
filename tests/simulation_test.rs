/*!
 * Simulation Tests
 * End-to-end scenarios for the round-robin coordinator
 */

use pretty_assertions::assert_eq;
use std::time::Duration;
use timeslice_sim::{Coordinator, GrantRecord, MetricsReport, SimConfig, SimOutcome, Ticks};

fn run_sim(quantum: Ticks, specs: &[(Ticks, Ticks)]) -> SimOutcome {
    let mut builder = SimConfig::builder()
        .with_quantum(quantum)
        .with_work_unit(Duration::ZERO);
    for &(arrival, burst) in specs {
        builder = builder.with_process(arrival, burst);
    }
    let config = builder.build().expect("valid simulation input");
    Coordinator::new(&config).run().expect("simulation completes")
}

fn finish_of(outcome: &SimOutcome, pid: u32) -> Ticks {
    outcome.records[pid as usize].finish.expect("finished")
}

#[test]
fn test_three_process_trace() {
    // Regression fixture: staggered arrivals with one preemption
    let outcome = run_sim(4, &[(0, 5), (1, 3), (2, 1)]);

    assert_eq!(
        outcome.grants,
        vec![
            GrantRecord { pid: 0, quantum: 4, started_at: 0 },
            GrantRecord { pid: 1, quantum: 3, started_at: 4 },
            GrantRecord { pid: 2, quantum: 1, started_at: 7 },
            GrantRecord { pid: 0, quantum: 1, started_at: 8 },
        ]
    );

    assert_eq!(finish_of(&outcome, 1), 7);
    assert_eq!(finish_of(&outcome, 2), 8);
    assert_eq!(finish_of(&outcome, 0), 9);

    assert_eq!(outcome.stats.total_grants, 4);
    assert_eq!(outcome.stats.preemptions, 1);
    assert_eq!(outcome.stats.idle_jumps, 0);
    assert_eq!(outcome.stats.sim_duration, 9);
}

#[test]
fn test_single_process() {
    let outcome = run_sim(3, &[(0, 10)]);

    let quanta: Vec<Ticks> = outcome.grants.iter().map(|g| g.quantum).collect();
    assert_eq!(quanta, vec![3, 3, 3, 1]);
    assert_eq!(finish_of(&outcome, 0), 10);

    let report = MetricsReport::from_records(&outcome.records).unwrap();
    assert_eq!(report.rows[0].turnaround, 10);
    assert_eq!(report.rows[0].waiting, 0);
}

#[test]
fn test_idle_gap_before_late_arrival() {
    // The coordinator must jump the clock to 10 with no spurious grants
    let outcome = run_sim(5, &[(0, 3), (10, 2)]);

    assert_eq!(
        outcome.grants,
        vec![
            GrantRecord { pid: 0, quantum: 3, started_at: 0 },
            GrantRecord { pid: 1, quantum: 2, started_at: 10 },
        ]
    );
    assert_eq!(outcome.stats.idle_jumps, 1);
    assert_eq!(finish_of(&outcome, 0), 3);
    assert_eq!(finish_of(&outcome, 1), 12);
}

#[test]
fn test_round_robin_fairness() {
    // Equal arrivals, equal bursts: each process gets ceil(8/4) = 2 grants
    // in strict rotation
    let outcome = run_sim(4, &[(0, 8), (0, 8), (0, 8)]);

    let order: Vec<u32> = outcome.grants.iter().map(|g| g.pid).collect();
    assert_eq!(order, vec![0, 1, 2, 0, 1, 2]);

    for pair in outcome.grants.windows(2) {
        assert_ne!(pair[0].pid, pair[1].pid);
    }
}

#[test]
fn test_oversized_quantum_degenerates_to_fcfs() {
    let outcome = run_sim(10, &[(0, 3), (0, 2), (5, 4)]);

    let order: Vec<u32> = outcome.grants.iter().map(|g| g.pid).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(outcome.stats.preemptions, 0);
}

#[test]
fn test_granted_slices_conserve_burst() {
    let outcome = run_sim(4, &[(0, 5), (1, 3), (2, 1)]);

    for record in &outcome.records {
        let consumed: Ticks = outcome
            .grants
            .iter()
            .filter(|g| g.pid == record.pid)
            .map(|g| g.quantum)
            .sum();
        assert_eq!(consumed, record.burst);
        assert_eq!(record.remaining, 0);
    }
}

#[test]
fn test_finish_respects_arrival_plus_burst() {
    let outcome = run_sim(2, &[(0, 4), (3, 6), (3, 1), (9, 2)]);

    for record in &outcome.records {
        let finish = record.finish.expect("finished");
        assert!(finish >= record.arrival + record.burst);
    }
}

#[test]
fn test_report_matches_trace() {
    let outcome = run_sim(4, &[(0, 5), (1, 3), (2, 1)]);
    let report = MetricsReport::from_records(&outcome.records).unwrap();

    let turnarounds: Vec<Ticks> = report.rows.iter().map(|r| r.turnaround).collect();
    let waits: Vec<Ticks> = report.rows.iter().map(|r| r.waiting).collect();
    assert_eq!(turnarounds, vec![9, 6, 6]);
    assert_eq!(waits, vec![4, 3, 5]);
    assert_eq!(report.avg_turnaround, 7.0);
    assert_eq!(report.avg_waiting, 4.0);
}

#[test]
fn test_nonzero_work_unit_still_terminates() {
    // Same trace as the fixture, with the workers actually sleeping
    let mut builder = SimConfig::builder()
        .with_quantum(4)
        .with_work_unit(Duration::from_millis(1));
    for &(arrival, burst) in &[(0u64, 5u64), (1, 3), (2, 1)] {
        builder = builder.with_process(arrival, burst);
    }
    let config = builder.build().unwrap();

    let outcome = Coordinator::new(&config).run().unwrap();
    assert_eq!(outcome.stats.sim_duration, 9);
    assert!(outcome.records.iter().all(|r| r.is_finished()));
}
