/*!
 * Timeslice Simulator - Main Entry Point
 *
 * Preemptive round-robin scheduling simulation:
 * - One real worker thread per simulated process
 * - Coordinator-driven quantum grants over a rendezvous channel
 * - Turnaround and waiting time report
 */

use anyhow::Context;
use tracing::{info, warn};

use timeslice_sim::{init_tracing, Coordinator, LogPool, MetricsReport, SimConfig};

fn main() -> anyhow::Result<()> {
    // Initialize structured tracing
    init_tracing();

    info!("Timeslice simulator starting...");

    let config = SimConfig::from_env().context("invalid simulation input")?;
    info!(
        "{} processes, quantum {}, work unit {:?}",
        config.processes.len(),
        config.quantum,
        config.work_unit
    );

    // The log pool runs independently of the scheduler
    let log_pool =
        LogPool::spawn(&config.log_dir, config.log_workers).context("could not start log pool")?;

    let coordinator = Coordinator::new(&config);
    let outcome = coordinator.run().context("simulation failed")?;

    info!(
        "simulation complete: {} grants, {} preemptions, {} idle jumps, {} ticks",
        outcome.stats.total_grants,
        outcome.stats.preemptions,
        outcome.stats.idle_jumps,
        outcome.stats.sim_duration
    );

    // Per-worker log failures are reported but never fail the run
    for result in log_pool.join() {
        match result {
            Ok(path) => info!(artifact = %path.display(), "log artifact written"),
            Err(e) => warn!(error = %e, "log worker failed"),
        }
    }

    let report = MetricsReport::from_records(&outcome.records)
        .context("metrics require finished records")?;

    let use_json = std::env::var("TIMESLICE_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if use_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
