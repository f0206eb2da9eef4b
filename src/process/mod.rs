/*!
 * Process Module
 * Process descriptions, per-queue state and workload input
 */

pub mod queue;
pub mod types;
pub mod workload;

// Re-export for convenience
pub use queue::ProcessQueue;
pub use types::{Process, ProcessState, QueueKind};
pub use workload::Workload;
