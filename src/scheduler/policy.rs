/*!
 * Scheduling Policies
 * Reference strategies plugged into the simulation engine
 */

use super::traits::SchedulingPolicy;
use crate::core::types::ProcessId;
use crate::process::{ProcessQueue, ProcessState};

/// Earliest arrival among entries that have not arrived yet
fn earliest_arrival(bursting: &ProcessQueue) -> Option<&ProcessState> {
    bursting.iter().min_by_key(|e| e.arrive_at)
}

/// First come, first served
///
/// Picks the entry with the smallest arrival countdown; already-arrived
/// entries all sit at zero so insertion order decides between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn select_process(&mut self, bursting: &ProcessQueue) -> Option<ProcessId> {
        earliest_arrival(bursting).map(ProcessState::id)
    }
}

/// Shortest remaining work first among arrived entries
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn select_process(&mut self, bursting: &ProcessQueue) -> Option<ProcessId> {
        bursting
            .past_time_processes()
            .min_by_key(|e| e.time_remaining())
            .or_else(|| earliest_arrival(bursting))
            .map(ProcessState::id)
    }
}

/// Rotates through arrived entries in id order
///
/// The engine never preempts, so rotation happens at burst boundaries: each
/// pick is the next id after the previous pick, wrapping to the lowest.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    last: Option<ProcessId>,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the most recent pick
    pub fn last(&self) -> Option<ProcessId> {
        self.last
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn select_process(&mut self, bursting: &ProcessQueue) -> Option<ProcessId> {
        let after = |pid: ProcessId| self.last.map_or(true, |last| pid > last);

        let next = bursting
            .past_time_processes()
            .map(ProcessState::id)
            .filter(|&pid| after(pid))
            .min()
            .or_else(|| bursting.past_time_processes().map(ProcessState::id).min())
            .or_else(|| earliest_arrival(bursting).map(ProcessState::id));

        if next.is_some() {
            self.last = next;
        }
        next
    }
}
