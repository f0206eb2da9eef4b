/*!
 * Workload Loading
 * Process records consumed from external generators or files
 */

use super::queue::ProcessQueue;
use super::types::Process;
use crate::core::errors::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A set of processes to seed a simulation with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub processes: Vec<Process>,
}

impl Workload {
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    /// Parse a JSON workload
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON workload file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Workload(format!("cannot read {}: {}", path.display(), e))
        })?;
        let workload = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            processes = workload.processes.len(),
            "workload loaded"
        );
        Ok(workload)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Build the initial bursting queue
    ///
    /// Every process starts counting down to its own arrival time. Duplicate
    /// ids surface as `DuplicateProcess`.
    pub fn into_queue(self) -> Result<ProcessQueue> {
        let mut bursting = ProcessQueue::bursting();
        for process in self.processes {
            let arrive_at = process.arrival_time;
            bursting.add_process(process.shared(), arrive_at)?;
        }
        Ok(bursting)
    }
}

impl FromIterator<Process> for Workload {
    fn from_iter<I: IntoIterator<Item = Process>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
