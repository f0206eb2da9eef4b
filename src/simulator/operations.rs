/*!
 * Engine Operations
 * Selection, single-step time advance, wake-up and cycle detection
 */

use super::history::Snapshot;
use super::SchedulingEngine;
use crate::core::errors::{Result, SimulationError};
use crate::core::types::{ProcessId, SimTime};
use crate::process::{ProcessState, QueueKind};
use tracing::{debug, trace};

/// Result of one `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Selected process has not arrived; time skips to its arrival
    Waiting { delta: SimTime },
    /// Selected process ran its whole burst and went to sleep
    Burst { delta: SimTime },
}

impl Tick {
    #[inline(always)]
    pub const fn delta(&self) -> SimTime {
        match *self {
            Self::Waiting { delta } | Self::Burst { delta } => delta,
        }
    }

    #[inline(always)]
    pub const fn is_burst(&self) -> bool {
        matches!(self, Self::Burst { .. })
    }
}

impl SchedulingEngine {
    /// Ask the policy for the next process
    ///
    /// The pick must be in the bursting queue; it may still be counting down
    /// to its arrival.
    pub fn select_process(&mut self) -> Result<ProcessId> {
        let pid = self
            .policy
            .select_process(&self.bursting)
            .ok_or(SimulationError::NoRunnableProcess)?;

        if !self.bursting.contains(pid) {
            return Err(SimulationError::InvalidSelection(pid));
        }

        self.stats.record_dispatch(pid, self.running_time);
        debug!(
            pid,
            policy = self.policy.name(),
            at = self.running_time,
            "process selected"
        );
        Ok(pid)
    }

    /// Age the sleeping queue by `delta` and move woken sleepers to bursting
    ///
    /// Expects the running time to already include `delta`. Returns how many
    /// processes woke up. A woken process re-enters with a full burst of work
    /// and its leftover sleep (zero) as arrival delay. It counts as ready from
    /// the instant its sleep ran out, which may fall inside the step.
    pub fn populate(&mut self, delta: SimTime) -> Result<usize> {
        let step_start = self.running_time.saturating_sub(delta);
        let wake_at: Vec<(ProcessId, SimTime)> = self
            .sleeping
            .iter()
            .filter(|e| e.wakes_in() <= delta)
            .map(|e| (e.id(), step_start.saturating_add(e.wakes_in())))
            .collect();

        self.sleeping.update_time(delta);

        let woken: Vec<ProcessState> = self.sleeping.past_time_processes().cloned().collect();
        for state in &woken {
            let pid = state.id();
            let remaining = state.time_remaining();
            self.sleeping.remove_process(pid)?;
            self.bursting.add_process(state.process.clone(), remaining)?;

            let ready_at = wake_at
                .iter()
                .find(|&&(id, _)| id == pid)
                .map_or(self.running_time, |&(_, at)| at);
            self.stats.record_ready(pid, ready_at);
            trace!(pid, ready_at, at = self.running_time, "process woke");
        }

        Ok(woken.len())
    }

    /// Single-step time-advance rule for the selected process
    ///
    /// A process still counting down to its arrival only yields its countdown
    /// and nothing moves. Otherwise it leaves the bursting queue for the
    /// sleeping queue, sleeping for as long as its burst, and its remaining
    /// work is the step's delta. Its sleep only starts once the burst is over,
    /// so it enters the sleeping queue with the burst as eligibility delay.
    /// Right after `tick` its sleeping entry therefore shows `arrive_at` equal
    /// to the burst, not zero; the step's `populate(delta)` brings it back to
    /// zero with the full sleep still ahead.
    pub fn tick(&mut self, pid: ProcessId) -> Result<Tick> {
        let entry = self
            .bursting
            .get(pid)
            .ok_or(SimulationError::ProcessNotFound {
                pid,
                queue: QueueKind::Bursting,
            })?;

        if !entry.has_arrived() {
            return Ok(Tick::Waiting {
                delta: entry.arrive_at,
            });
        }

        let entry = self.bursting.remove_process(pid)?;
        let delta = entry.time_remaining();
        self.sleeping.add_process(entry.process, delta)?;

        Ok(Tick::Burst { delta })
    }

    /// Run one step for `pid` and move the clock forward
    ///
    /// Time spent is charged to the running time, to every waiting arrival in
    /// the bursting queue and to the sleeping queue.
    pub fn advance(&mut self, pid: ProcessId) -> Result<Tick> {
        let started_at = self.running_time;
        let tick = self.tick(pid)?;
        let delta = tick.delta();

        self.running_time = self.running_time.saturating_add(delta);
        self.stats.add_running_time(delta);
        self.bursting.update_arrive_at(delta);

        if tick.is_burst() {
            self.stats.record_burst(pid, started_at, self.running_time);
        }

        let woken = self.populate(delta)?;
        debug!(
            pid,
            ?tick,
            woken,
            running_time = self.running_time,
            "advanced"
        );
        Ok(tick)
    }

    /// Skip dead time while nothing can burst
    ///
    /// Jumps to the moment the latest sleeper wakes, so every sleeper is back
    /// in the bursting queue afterwards. Fails when there is nobody asleep.
    pub fn pop_next_sleeping(&mut self) -> Result<()> {
        let delta = self
            .sleeping
            .latest_waking()
            .map(ProcessState::wakes_in)
            .ok_or(SimulationError::NoRunnableProcess)?;

        self.running_time = self.running_time.saturating_add(delta);
        self.stats.add_running_time(delta);
        self.bursting.update_arrive_at(delta);
        let woken = self.populate(delta)?;

        debug!(
            delta,
            woken,
            running_time = self.running_time,
            "fast-forwarded to sleeper"
        );
        Ok(())
    }

    /// Record the current state; true if it was seen before in this run
    pub fn complete(&mut self) -> bool {
        let snapshot = Snapshot::capture(&self.bursting, &self.sleeping, self.running_time);
        let seen_before = self.history.record(snapshot);
        trace!(
            snapshot = self.history.len() - 1,
            seen_before,
            running_time = self.running_time,
            "snapshot recorded"
        );
        seen_before
    }
}
