/*!
 * Timeslice Simulator Library
 * Preemptive round-robin scheduling over real worker threads
 */

pub mod config;
pub mod core;
pub mod logging;
pub mod monitoring;
pub mod process;

// Re-exports
pub use config::{ProcessSpec, SimConfig, SimConfigBuilder};
pub use crate::core::errors::{ConfigError, LogError, SimError};
pub use crate::core::types::{Pid, SimLimits, Ticks};
pub use logging::LogPool;
pub use monitoring::metrics::{MetricsReport, ProcessMetrics};
pub use monitoring::tracer::init_tracing;
pub use process::{Coordinator, GrantRecord, ProcessRecord, SimOutcome, SimStats};
