/*!
 * Process Queue
 * Ordered, kind-tagged collection of process states with time bookkeeping
 */

use super::types::{Process, ProcessState, QueueKind};
use crate::core::errors::{Result, SimulationError};
use crate::core::types::{ProcessId, SimTime};
use std::sync::Arc;
use tracing::trace;

/// Ordered collection of `ProcessState` entries
///
/// Insertion order only matters for tie-breaks. `Clone` produces an
/// independent copy of every entry; the shared `Process` descriptions are
/// immutable so sharing them is safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessQueue {
    kind: QueueKind,
    entries: Vec<ProcessState>,
}

impl ProcessQueue {
    pub fn new(kind: QueueKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn sleeping() -> Self {
        Self::new(QueueKind::Sleeping)
    }

    pub fn bursting() -> Self {
        Self::new(QueueKind::Bursting)
    }

    #[inline(always)]
    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    /// Insert a new entry for `process`, eligible after `arrive_at`
    ///
    /// Fails if the process already has an entry in this queue.
    pub fn add_process(
        &mut self,
        process: Arc<Process>,
        arrive_at: SimTime,
    ) -> Result<&mut ProcessState> {
        if self.contains(process.id) {
            return Err(SimulationError::DuplicateProcess {
                pid: process.id,
                queue: self.kind,
            });
        }

        trace!(
            pid = process.id,
            queue = %self.kind,
            arrive_at,
            time = process.burst_time,
            "process added"
        );
        self.entries.push(ProcessState::new(process, arrive_at));
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last])
    }

    /// Remove the entry for `pid`, keeping the order of the rest
    pub fn remove_process(&mut self, pid: ProcessId) -> Result<ProcessState> {
        let pos = self
            .position(pid)
            .ok_or(SimulationError::ProcessNotFound {
                pid,
                queue: self.kind,
            })?;

        trace!(pid, queue = %self.kind, "process removed");
        Ok(self.entries.remove(pos))
    }

    pub fn get(&self, pid: ProcessId) -> Option<&ProcessState> {
        self.entries.iter().find(|e| e.id() == pid)
    }

    pub fn contains(&self, pid: ProcessId) -> bool {
        self.position(pid).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessState> {
        self.entries.iter()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[ProcessState] {
        &self.entries
    }

    /// Advance this queue's clock by `delta`
    ///
    /// The arrival countdown is consumed first; in a sleeping queue whatever
    /// remains of `delta` then runs down the sleep. Both counters clamp at
    /// zero, so many small deltas land where one large delta would.
    pub fn update_time(&mut self, delta: SimTime) {
        if delta == 0 {
            return;
        }

        let kind = self.kind;
        for entry in &mut self.entries {
            let leftover = entry.consume_arrival(delta);
            if kind == QueueKind::Sleeping {
                entry.consume_time(leftover);
            }
        }
    }

    /// Run down only the arrival countdowns
    ///
    /// Used while another process holds the CPU: waiting entries get closer to
    /// arriving but no sleep or work is consumed.
    pub fn update_arrive_at(&mut self, delta: SimTime) {
        if delta == 0 {
            return;
        }

        for entry in &mut self.entries {
            entry.consume_arrival(delta);
        }
    }

    /// Entries whose wait in this queue is over
    ///
    /// Bursting entries qualify once arrived; sleeping entries once arrived and
    /// fully slept. The iterator borrows the queue and can be re-derived freely.
    pub fn past_time_processes(&self) -> impl Iterator<Item = &ProcessState> + '_ {
        let kind = self.kind;
        self.entries.iter().filter(move |e| match kind {
            QueueKind::Bursting => e.has_arrived(),
            QueueKind::Sleeping => e.has_arrived() && e.time_remaining() == 0,
        })
    }

    /// The entry that wakes last, earliest-inserted on ties
    pub fn latest_waking(&self) -> Option<&ProcessState> {
        self.entries
            .iter()
            .reduce(|best, e| if e.wakes_in() > best.wakes_in() { e } else { best })
    }

    fn position(&self, pid: ProcessId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == pid)
    }
}

impl<'a> IntoIterator for &'a ProcessQueue {
    type Item = &'a ProcessState;
    type IntoIter = std::slice::Iter<'a, ProcessState>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
