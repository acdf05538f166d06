/*!
 * Monitoring Module
 * Metrics reporting and tracing setup
 */

pub mod metrics;
pub mod tracer;

// Re-export for convenience
pub use metrics::{MetricsReport, ProcessMetrics};
pub use tracer::init_tracing;
