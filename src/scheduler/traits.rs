/*!
 * Scheduling Policy Traits
 * The pluggable decision point consulted by the simulation engine
 */

use crate::core::types::ProcessId;
use crate::process::ProcessQueue;

/// Chooses which process runs next
///
/// The engine only consults a policy when the previously selected process has
/// left the bursting queue, so implementations never preempt. A policy may
/// return a process that has not arrived yet; the engine then waits for it.
pub trait SchedulingPolicy: Send {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Pick a process from `bursting`, or `None` when it is empty
    fn select_process(&mut self, bursting: &ProcessQueue) -> Option<ProcessId>;
}
