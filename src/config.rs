/*!
 * Simulation Configuration
 * Input parameters, environment loading, and validation
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::types::{Pid, SimLimits, Ticks};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Process list, e.g. "0:5,1:3,2:1" (arrival:burst pairs)
pub const ENV_PROCESSES: &str = "TIMESLICE_PROCESSES";
/// Time quantum in simulated units
pub const ENV_QUANTUM: &str = "TIMESLICE_QUANTUM";
/// Wall-clock milliseconds one simulated unit takes inside a worker
pub const ENV_WORK_UNIT_MS: &str = "TIMESLICE_WORK_UNIT_MS";
/// Number of artifact log workers
pub const ENV_LOG_WORKERS: &str = "TIMESLICE_LOG_WORKERS";
/// Directory for log artifacts
pub const ENV_LOG_DIR: &str = "TIMESLICE_LOG_DIR";
/// Process-count cap override
pub const ENV_MAX_PROCESSES: &str = "TIMESLICE_MAX_PROCESSES";

const DEFAULT_WORK_UNIT: Duration = Duration::from_millis(5);
const DEFAULT_LOG_WORKERS: usize = 4;
const DEFAULT_LOG_DIR: &str = "logs";

/// Arrival and burst description of one synthetic process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl ProcessSpec {
    #[inline]
    #[must_use]
    pub const fn new(arrival: Ticks, burst: Ticks) -> Self {
        Self { arrival, burst }
    }
}

/// Validated simulation parameters
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub quantum: Ticks,
    pub processes: Vec<ProcessSpec>,
    pub work_unit: Duration,
    pub log_workers: usize,
    pub log_dir: PathBuf,
}

impl SimConfig {
    /// Start building a configuration
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::new()
    }

    /// Load and validate a configuration from environment variables.
    ///
    /// `TIMESLICE_PROCESSES` and `TIMESLICE_QUANTUM` are required; everything
    /// else falls back to defaults.
    pub fn from_env() -> ConfigResult<Self> {
        let raw = env::var(ENV_PROCESSES)
            .map_err(|_| ConfigError::MissingInput(ENV_PROCESSES.into()))?;
        let processes = parse_process_list(&raw)?;

        let quantum = env::var(ENV_QUANTUM)
            .map_err(|_| ConfigError::MissingInput(ENV_QUANTUM.into()))
            .and_then(|v| parse_field(ENV_QUANTUM, &v))?;

        let mut builder = Self::builder()
            .with_quantum(quantum)
            .with_processes(processes);

        if let Ok(value) = env::var(ENV_WORK_UNIT_MS) {
            let ms = parse_field(ENV_WORK_UNIT_MS, &value)?;
            builder = builder.with_work_unit(Duration::from_millis(ms));
        }
        if let Ok(value) = env::var(ENV_LOG_WORKERS) {
            let count = parse_field(ENV_LOG_WORKERS, &value)? as usize;
            builder = builder.with_log_workers(count);
        }
        if let Ok(dir) = env::var(ENV_LOG_DIR) {
            builder = builder.with_log_dir(dir);
        }
        if let Ok(value) = env::var(ENV_MAX_PROCESSES) {
            let max = parse_field(ENV_MAX_PROCESSES, &value)? as usize;
            builder = builder.with_limits(SimLimits::with_max_processes(max));
        }

        builder.build()
    }
}

/// Builder for [`SimConfig`] with input validation on `build`
#[derive(Debug, Clone)]
pub struct SimConfigBuilder {
    quantum: Ticks,
    processes: Vec<ProcessSpec>,
    work_unit: Duration,
    log_workers: usize,
    log_dir: PathBuf,
    limits: SimLimits,
}

impl SimConfigBuilder {
    #[must_use]
    fn new() -> Self {
        Self {
            quantum: 0,
            processes: Vec::new(),
            work_unit: DEFAULT_WORK_UNIT,
            log_workers: DEFAULT_LOG_WORKERS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            limits: SimLimits::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = quantum;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_process(mut self, arrival: Ticks, burst: Ticks) -> Self {
        self.processes.push(ProcessSpec::new(arrival, burst));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_processes<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = ProcessSpec>,
    {
        self.processes.extend(specs);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_work_unit(mut self, work_unit: Duration) -> Self {
        self.work_unit = work_unit;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_log_workers(mut self, count: usize) -> Self {
        self.log_workers = count;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_limits(mut self, limits: SimLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validate the collected inputs and produce the final configuration
    pub fn build(self) -> ConfigResult<SimConfig> {
        let count = self.processes.len();
        if count == 0 || count > self.limits.max_processes {
            return Err(ConfigError::ProcessCountOutOfRange {
                count,
                max: self.limits.max_processes,
            });
        }
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        for (pid, spec) in self.processes.iter().enumerate() {
            if spec.burst == 0 {
                return Err(ConfigError::ZeroBurst(pid as Pid));
            }
        }

        Ok(SimConfig {
            quantum: self.quantum,
            processes: self.processes,
            work_unit: self.work_unit,
            log_workers: self.log_workers,
            log_dir: self.log_dir,
        })
    }
}

impl Default for SimConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse "arrival:burst,arrival:burst,..." into process specs
fn parse_process_list(raw: &str) -> ConfigResult<Vec<ProcessSpec>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (arrival, burst) = pair.split_once(':').ok_or_else(|| ConfigError::Unparsable {
                field: ENV_PROCESSES.into(),
                value: pair.into(),
            })?;
            Ok(ProcessSpec::new(
                parse_field(ENV_PROCESSES, arrival.trim())?,
                parse_field(ENV_PROCESSES, burst.trim())?,
            ))
        })
        .collect()
}

fn parse_field(field: &str, value: &str) -> ConfigResult<u64> {
    value.parse().map_err(|_| ConfigError::Unparsable {
        field: field.into(),
        value: value.into(),
    })
}
