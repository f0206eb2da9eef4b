/*!
 * Scheduling Engine
 * Time-stepped simulation of a non-preemptive CPU scheduler
 */

use crate::core::errors::{Result, SimulationError};
use crate::core::types::SimTime;
use crate::monitoring::StatsCollector;
use crate::process::{ProcessQueue, QueueKind, Workload};
use crate::scheduler::{PolicyKind, SchedulingPolicy};
use tracing::info;

pub mod config;
pub mod history;
mod operations;
mod run;

pub use config::EngineConfig;
pub use history::{History, Snapshot};
pub use operations::Tick;

/// Simulation engine
///
/// Holds one bursting and one sleeping queue and drives them forward in
/// simulated time. Which process runs is delegated to the policy; everything
/// else (arrival, sleep/wake, context-switch overhead, cycle detection) lives
/// here. All state is owned by the engine, including statistics, so separate
/// engines never observe each other.
pub struct SchedulingEngine {
    bursting: ProcessQueue,
    sleeping: ProcessQueue,
    running_time: SimTime,
    config: EngineConfig,
    policy: Box<dyn SchedulingPolicy>,
    history: History,
    /// Next `run` extends the seeded history instead of starting afresh
    resume_history: bool,
    stats: StatsCollector,
}

impl SchedulingEngine {
    /// Engine with an empty sleeping queue and default configuration
    pub fn new(bursting: ProcessQueue, policy: Box<dyn SchedulingPolicy>) -> Result<Self> {
        Self::with_config(bursting, policy, EngineConfig::default())
    }

    pub fn with_config(
        bursting: ProcessQueue,
        policy: Box<dyn SchedulingPolicy>,
        config: EngineConfig,
    ) -> Result<Self> {
        Self::with_queues(bursting, ProcessQueue::sleeping(), policy, config)
    }

    /// Engine over pre-seeded queues
    ///
    /// Fails if a queue has the wrong kind, if a process sits in both queues,
    /// or if the configuration is invalid.
    pub fn with_queues(
        bursting: ProcessQueue,
        sleeping: ProcessQueue,
        policy: Box<dyn SchedulingPolicy>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;

        if bursting.kind() != QueueKind::Bursting || sleeping.kind() != QueueKind::Sleeping {
            return Err(SimulationError::Configuration(format!(
                "expected bursting and sleeping queues, got {} and {}",
                bursting.kind(),
                sleeping.kind()
            )));
        }

        if let Some(dup) = sleeping.iter().find(|e| bursting.contains(e.id())) {
            return Err(SimulationError::DuplicateProcess {
                pid: dup.id(),
                queue: QueueKind::Bursting,
            });
        }

        info!(
            policy = policy.name(),
            bursting = bursting.len(),
            sleeping = sleeping.len(),
            max_cycles = config.max_cycles,
            context_switch_cost = config.context_switch_cost,
            "scheduling engine created"
        );

        Ok(Self {
            bursting,
            sleeping,
            running_time: 0,
            config,
            policy,
            history: History::new(),
            resume_history: false,
            stats: StatsCollector::new(),
        })
    }

    /// Start the clock at `running_time` instead of zero
    ///
    /// Together with `with_history` this resumes a simulation from saved
    /// queues, clock and snapshots.
    #[must_use]
    pub fn with_running_time(mut self, running_time: SimTime) -> Self {
        self.running_time = running_time;
        self
    }

    /// Seed the snapshot history; the next `run` extends it
    ///
    /// Repeats are detected against the seeded snapshots too.
    #[must_use]
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self.resume_history = true;
        self
    }

    /// Engine seeded from a workload with a built-in policy
    pub fn from_workload(workload: Workload, policy: PolicyKind, config: EngineConfig) -> Result<Self> {
        Self::with_config(workload.into_queue()?, policy.build(), config)
    }

    #[inline]
    pub fn running_time(&self) -> SimTime {
        self.running_time
    }

    #[inline]
    pub fn bursting(&self) -> &ProcessQueue {
        &self.bursting
    }

    #[inline]
    pub fn sleeping(&self) -> &ProcessQueue {
        &self.sleeping
    }

    /// Snapshots recorded by the current (or last) run
    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}

impl std::fmt::Debug for SchedulingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulingEngine")
            .field("policy", &self.policy.name())
            .field("running_time", &self.running_time)
            .field("bursting", &self.bursting.len())
            .field("sleeping", &self.sleeping.len())
            .field("snapshots", &self.history.len())
            .field("resume_history", &self.resume_history)
            .field("config", &self.config)
            .finish()
    }
}
