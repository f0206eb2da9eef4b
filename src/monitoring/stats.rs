/*!
 * Simulation Statistics
 * Per-run accumulation of time and per-process metrics
 */

use crate::core::types::{ProcessId, SimTime};
use crate::process::Process;
use crate::simulator::history::History;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Stopped early at a repeated snapshot (`stop_on_convergence`)
    Converged { cycle: usize },
    /// Ran the full `max_cycles`; the history may or may not contain a repeat
    CycleLimitReached,
}

/// Derived metrics for one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessStats {
    pub id: ProcessId,
    pub burst_time: SimTime,
    pub arrival_time: SimTime,
    /// Bursts run to completion
    pub bursts: u64,
    /// Times the policy picked this process
    pub dispatches: u64,
    pub cpu_time: SimTime,
    /// Time spent eligible in the bursting queue before each burst started
    pub wait_time: SimTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_dispatch: Option<SimTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_completion: Option<SimTime>,
    /// First completion minus arrival
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround: Option<SimTime>,
    /// Snapshots in which this process sat in the bursting queue
    pub ready_samples: usize,
}

impl ProcessStats {
    fn new(process: &Process) -> Self {
        Self {
            id: process.id,
            burst_time: process.burst_time,
            arrival_time: process.arrival_time,
            bursts: 0,
            dispatches: 0,
            cpu_time: 0,
            wait_time: 0,
            first_dispatch: None,
            first_completion: None,
            turnaround: None,
            ready_samples: 0,
        }
    }

    /// Mean wait per completed burst
    pub fn average_wait(&self) -> f64 {
        if self.bursts == 0 {
            0.0
        } else {
            self.wait_time as f64 / self.bursts as f64
        }
    }
}

/// Final result of a run, produced for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationReport {
    pub policy: String,
    pub outcome: RunOutcome,
    /// Whether any snapshot repeated an earlier one
    pub converged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_repeat: Option<usize>,
    pub cycles: usize,
    pub snapshots: usize,
    pub total_time: SimTime,
    pub busy_time: SimTime,
    pub context_switches: u64,
    pub switch_time: SimTime,
    pub total_bursts: u64,
    pub average_wait: f64,
    /// Completed bursts per simulated time unit
    pub throughput: f64,
    pub processes: BTreeMap<ProcessId, ProcessStats>,
}

/// Run metadata the collector cannot know by itself
#[derive(Debug, Clone, Copy)]
pub struct RunInfo<'a> {
    pub policy: &'a str,
    pub outcome: RunOutcome,
    pub cycles: usize,
}

#[derive(Debug, Clone)]
struct Tracker {
    stats: ProcessStats,
    /// When the process last became eligible; cleared once a burst starts
    ready_since: Option<SimTime>,
}

/// Per-run statistics accumulator
///
/// Owned by a single engine. `reset` must run before each simulation so
/// nothing leaks from a previous run.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    running_time: SimTime,
    total_time: SimTime,
    context_switches: u64,
    switch_time: SimTime,
    processes: BTreeMap<ProcessId, Tracker>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every counter and tracked process
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start tracking `process`, eligible from `ready_at`
    pub fn register(&mut self, process: &Process, ready_at: SimTime) {
        self.processes.insert(
            process.id,
            Tracker {
                stats: ProcessStats::new(process),
                ready_since: Some(ready_at),
            },
        );
    }

    pub fn record_ready(&mut self, pid: ProcessId, at: SimTime) {
        if let Some(tracker) = self.processes.get_mut(&pid) {
            tracker.ready_since = Some(at);
        }
    }

    pub fn record_dispatch(&mut self, pid: ProcessId, at: SimTime) {
        if let Some(tracker) = self.processes.get_mut(&pid) {
            tracker.stats.dispatches += 1;
            tracker.stats.first_dispatch.get_or_insert(at);
        }
    }

    pub fn record_burst(&mut self, pid: ProcessId, started_at: SimTime, finished_at: SimTime) {
        let Some(tracker) = self.processes.get_mut(&pid) else {
            return;
        };

        let stats = &mut tracker.stats;
        stats.bursts += 1;
        stats.cpu_time = stats
            .cpu_time
            .saturating_add(finished_at.saturating_sub(started_at));
        if let Some(ready) = tracker.ready_since.take() {
            stats.wait_time = stats.wait_time.saturating_add(started_at.saturating_sub(ready));
        }
        if stats.first_completion.is_none() {
            stats.first_completion = Some(finished_at);
            stats.turnaround = Some(finished_at.saturating_sub(stats.arrival_time));
        }
    }

    pub fn record_context_switch(&mut self, cost: SimTime) {
        self.context_switches += 1;
        self.switch_time = self.switch_time.saturating_add(cost);
    }

    pub fn add_running_time(&mut self, delta: SimTime) {
        self.running_time = self.running_time.saturating_add(delta);
    }

    pub fn set_total_time(&mut self, total: SimTime) {
        self.total_time = total;
    }

    /// Time accumulated through `add_running_time`
    pub fn running_time(&self) -> SimTime {
        self.running_time
    }

    pub fn total_time(&self) -> SimTime {
        self.total_time
    }

    pub fn context_switches(&self) -> u64 {
        self.context_switches
    }

    pub fn process(&self, pid: ProcessId) -> Option<&ProcessStats> {
        self.processes.get(&pid).map(|t| &t.stats)
    }

    /// Finalize the run into a report, folding in snapshot-derived metrics
    pub fn create_stats(&self, history: &History, info: RunInfo<'_>) -> SimulationReport {
        let mut processes: BTreeMap<ProcessId, ProcessStats> = self
            .processes
            .iter()
            .map(|(&pid, t)| (pid, t.stats.clone()))
            .collect();

        for snapshot in history {
            for entry in snapshot.bursting() {
                if let Some(stats) = processes.get_mut(&entry.id()) {
                    stats.ready_samples += 1;
                }
            }
        }

        let total_bursts: u64 = processes.values().map(|s| s.bursts).sum();
        let total_wait = saturating_total(processes.values().map(|s| s.wait_time));
        let busy_time = saturating_total(processes.values().map(|s| s.cpu_time));

        let average_wait = if total_bursts == 0 {
            0.0
        } else {
            total_wait as f64 / total_bursts as f64
        };
        let throughput = if self.total_time == 0 {
            0.0
        } else {
            total_bursts as f64 / self.total_time as f64
        };

        SimulationReport {
            policy: info.policy.to_string(),
            outcome: info.outcome,
            converged: history.first_repeat().is_some(),
            first_repeat: history.first_repeat(),
            cycles: info.cycles,
            snapshots: history.len(),
            total_time: self.total_time,
            busy_time,
            context_switches: self.context_switches,
            switch_time: self.switch_time,
            total_bursts,
            average_wait,
            throughput,
            processes,
        }
    }
}

/// Sum of simulated durations, clamped at the top of the clock
fn saturating_total(times: impl Iterator<Item = SimTime>) -> SimTime {
    times.fold(0, SimTime::saturating_add)
}
