/*!
 * Scheduler Module
 * Scheduling policies and the trait the engine consults
 */

pub mod policy;
pub mod traits;
pub mod types;

// Re-export public API
pub use policy::{Fcfs, RoundRobin, Sjf};
pub use traits::SchedulingPolicy;
pub use types::PolicyKind;
