/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for configuration and input validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result alias for simulation runs
pub type SimResult<T> = Result<T, SimError>;

/// Result alias for the artifact log pool
pub type LogResult<T> = Result<T, LogError>;

/// Input validation errors with serialization support
///
/// All of these are fatal and reported before any thread is started.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("process count {count} out of range (1..={max})")]
    #[diagnostic(
        code(config::process_count),
        help("Adjust the process list, or raise the cap via SimLimits.")
    )]
    ProcessCountOutOfRange { count: usize, max: usize },

    #[error("time quantum must be positive")]
    #[diagnostic(
        code(config::zero_quantum),
        help("Set the quantum to at least one simulated time unit.")
    )]
    ZeroQuantum,

    #[error("process {0} has zero burst time")]
    #[diagnostic(
        code(config::zero_burst),
        help("Every process needs at least one unit of work.")
    )]
    ZeroBurst(Pid),

    #[error("missing required input: {0}")]
    #[diagnostic(
        code(config::missing_input),
        help("Set the named environment variable; see SimConfig::from_env.")
    )]
    MissingInput(String),

    #[error("cannot parse {field} from {value:?}")]
    #[diagnostic(
        code(config::unparsable),
        help("Expected a non-negative integer, or arrival:burst pairs for the process list.")
    )]
    Unparsable { field: String, value: String },
}

/// Simulation errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("failed to spawn worker thread for process {pid}: {reason}")]
    #[diagnostic(
        code(sim::spawn_failed),
        help("The OS refused a new thread. Check resource limits.")
    )]
    SpawnFailed { pid: Pid, reason: String },

    #[error("worker thread for process {0} panicked")]
    #[diagnostic(
        code(sim::worker_panicked),
        help("A bug in the worker loop. Inspect logs for the panic payload.")
    )]
    WorkerPanicked(Pid),

    #[error("process {0} has not finished")]
    #[diagnostic(
        code(sim::unfinished),
        help("Metrics are only defined once the coordinator has joined all workers.")
    )]
    Unfinished(Pid),
}

/// Artifact log pool errors with serialization support
///
/// Only `DirUnavailable` is fatal; per-worker failures are reported and
/// never affect scheduling correctness.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LogError {
    #[error("log directory {path} unavailable: {reason}")]
    #[diagnostic(
        code(logs::dir_unavailable),
        help("Check permissions on the artifact directory.")
    )]
    DirUnavailable { path: String, reason: String },

    #[error("failed to spawn log worker {worker}: {reason}")]
    #[diagnostic(
        code(logs::spawn_failed),
        help("The OS refused a new thread. Check resource limits.")
    )]
    SpawnFailed { worker: usize, reason: String },

    #[error("log worker {worker} could not write {path}: {reason}")]
    #[diagnostic(
        code(logs::artifact_failed),
        help("Scheduling output is unaffected; only this artifact is missing.")
    )]
    ArtifactFailed {
        worker: usize,
        path: String,
        reason: String,
    },

    #[error("log worker {0} panicked")]
    #[diagnostic(
        code(logs::worker_panicked),
        help("A bug in the artifact writer. Inspect logs for the panic payload.")
    )]
    WorkerPanicked(usize),
}
