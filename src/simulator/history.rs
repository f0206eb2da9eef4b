/*!
 * Snapshot History
 * Value snapshots of both queues used for cycle detection
 */

use crate::core::types::{ProcessId, SimTime};
use crate::process::{ProcessQueue, ProcessState};
use ahash::AHashSet;

/// Immutable picture of the simulation after one cycle
///
/// Equality is structural: same running time and the same entries, in the
/// same order, in both queues. The running time is compared first since it
/// differs between almost all snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    running_time: SimTime,
    bursting: Vec<ProcessState>,
    sleeping: Vec<ProcessState>,
}

impl Snapshot {
    pub fn capture(bursting: &ProcessQueue, sleeping: &ProcessQueue, running_time: SimTime) -> Self {
        Self {
            running_time,
            bursting: bursting.entries().to_vec(),
            sleeping: sleeping.entries().to_vec(),
        }
    }

    pub fn running_time(&self) -> SimTime {
        self.running_time
    }

    pub fn bursting(&self) -> &[ProcessState] {
        &self.bursting
    }

    pub fn sleeping(&self) -> &[ProcessState] {
        &self.sleeping
    }

    /// Ids present in either queue, bursting first
    pub fn process_ids(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.bursting
            .iter()
            .chain(self.sleeping.iter())
            .map(ProcessState::id)
    }

    pub fn is_bursting(&self, pid: ProcessId) -> bool {
        self.bursting.iter().any(|e| e.id() == pid)
    }
}

/// Append-only list of snapshots for one run
///
/// Nothing is removed while a run is in progress, so any earlier state can be
/// matched again. Lookups go through a hash index instead of scanning.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    seen: AHashSet<Snapshot>,
    first_repeat: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `snapshot`, returning true if an equal one was already recorded
    pub fn record(&mut self, snapshot: Snapshot) -> bool {
        let seen_before = !self.seen.insert(snapshot.clone());
        if seen_before && self.first_repeat.is_none() {
            self.first_repeat = Some(self.snapshots.len());
        }
        self.snapshots.push(snapshot);
        seen_before
    }

    pub fn contains(&self, snapshot: &Snapshot) -> bool {
        self.seen.contains(snapshot)
    }

    /// Index of the first snapshot that repeated an earlier one
    pub fn first_repeat(&self) -> Option<usize> {
        self.first_repeat
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Drop everything; only called between runs
    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
        self.seen.clear();
        self.first_repeat = None;
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
