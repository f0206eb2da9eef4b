/*!
 * Queue Simulator Library
 * Discrete-time CPU scheduling simulation with pluggable policies
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulator;

// Re-exports
pub use crate::core::errors::{Result, SimulationError};
pub use crate::core::types::{ProcessId, SimTime};
pub use monitoring::{
    init_tracing, ProcessStats, RunOutcome, SimulationReport, StatsCollector,
};
pub use process::{Process, ProcessQueue, ProcessState, QueueKind, Workload};
pub use scheduler::{Fcfs, PolicyKind, RoundRobin, SchedulingPolicy, Sjf};
pub use simulator::{EngineConfig, History, SchedulingEngine, Snapshot, Tick};
