/*!
 * Process Module
 * Process records, worker threads, and the scheduling coordinator
 */

pub mod coordinator;
pub mod record;
pub mod rendezvous;
pub mod worker;

// Re-export for convenience
pub use coordinator::{Coordinator, GrantRecord, SimOutcome, SimStats};
pub use record::ProcessRecord;
pub use rendezvous::{Rendezvous, Turn};
