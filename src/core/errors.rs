/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::ProcessId;
use crate::process::QueueKind;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation errors with serialization support
///
/// Every variant is a precondition violation or an input fault. Running out of
/// cycles is not an error; it is reported through `RunOutcome`.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("Process {pid} already present in {queue} queue")]
    #[diagnostic(
        code(queue::duplicate_process),
        help("A process may only have one entry per queue. Remove it before re-adding.")
    )]
    DuplicateProcess { pid: ProcessId, queue: QueueKind },

    #[error("Process {pid} not found in {queue} queue")]
    #[diagnostic(
        code(queue::process_not_found),
        help("The process may have already moved to the other queue.")
    )]
    ProcessNotFound { pid: ProcessId, queue: QueueKind },

    #[error("No runnable process: bursting queue is empty and nothing is sleeping")]
    #[diagnostic(
        code(engine::no_runnable_process),
        help("Seed the bursting or sleeping queue with at least one process.")
    )]
    NoRunnableProcess,

    #[error("Policy selected process {0}, which is not in the bursting queue")]
    #[diagnostic(
        code(engine::invalid_selection),
        help("Policies must only return processes present in the bursting queue.")
    )]
    InvalidSelection(ProcessId),

    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(policy::invalid_policy),
        help("Use fcfs, sjf, or round_robin.")
    )]
    InvalidPolicy(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(config::invalid),
        help("Review the engine configuration and QSIM_* environment variables.")
    )]
    Configuration(String),

    #[error("Workload error: {0}")]
    #[diagnostic(
        code(workload::invalid),
        help("Workloads are JSON objects with a `processes` array of {{id, burst_time, arrival_time}}.")
    )]
    Workload(String),
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Workload(err.to_string())
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Workload(err.to_string())
    }
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulationError>;
