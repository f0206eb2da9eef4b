/*!
 * Process Types
 * Immutable process descriptions and their per-queue run-time records
 */

use crate::core::types::{ProcessId, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which role a queue plays in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Processes waiting out their sleep before they may burst again
    Sleeping,
    /// Processes eligible to run, or counting down to their arrival
    Bursting,
}

impl QueueKind {
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Bursting => "bursting",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of a schedulable unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    /// CPU time needed for one burst
    pub burst_time: SimTime,
    /// Offset from simulation start before the process first becomes eligible
    #[serde(default)]
    pub arrival_time: SimTime,
}

impl Process {
    #[inline]
    #[must_use]
    pub fn new(id: ProcessId, burst_time: SimTime, arrival_time: SimTime) -> Self {
        Self {
            id,
            burst_time,
            arrival_time,
        }
    }

    /// Wrap for sharing between queue entries
    #[inline]
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Run-time record of a process inside one queue
///
/// The `Process` is shared, not owned: entries in snapshots and in both queues
/// point at the same description. Equality is structural over the process and
/// both counters, which is what snapshot comparison relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessState {
    pub process: Arc<Process>,
    /// Time left until this entry becomes eligible in its current queue
    pub arrive_at: SimTime,
    /// Remaining work (bursting) or remaining sleep (sleeping)
    pub time: SimTime,
}

impl ProcessState {
    /// New entry carrying a full burst worth of time
    #[inline]
    #[must_use]
    pub fn new(process: Arc<Process>, arrive_at: SimTime) -> Self {
        let time = process.burst_time;
        Self {
            process,
            arrive_at,
            time,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn id(&self) -> ProcessId {
        self.process.id
    }

    #[inline(always)]
    #[must_use]
    pub const fn time_remaining(&self) -> SimTime {
        self.time
    }

    /// Whether the arrival countdown has run out
    #[inline(always)]
    #[must_use]
    pub const fn has_arrived(&self) -> bool {
        self.arrive_at == 0
    }

    /// Time until a sleeping entry wakes: the eligibility delay plus the sleep itself
    #[inline]
    #[must_use]
    pub const fn wakes_in(&self) -> SimTime {
        self.arrive_at.saturating_add(self.time)
    }

    /// Consume `delta` from the arrival countdown, returning what was left over
    #[inline]
    pub(crate) fn consume_arrival(&mut self, delta: SimTime) -> SimTime {
        let used = delta.min(self.arrive_at);
        self.arrive_at -= used;
        delta - used
    }

    /// Consume `delta` from the remaining time
    #[inline]
    pub(crate) fn consume_time(&mut self, delta: SimTime) {
        self.time = self.time.saturating_sub(delta);
    }
}
