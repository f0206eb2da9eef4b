/*!
 * Scheduler Types
 * Policy selection parsed from configuration and the command line
 */

use super::policy::{Fcfs, RoundRobin, Sjf};
use super::traits::SchedulingPolicy;
use crate::core::errors::SimulationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Built-in scheduling policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    /// Earliest arrival first, insertion order on ties
    #[default]
    Fcfs,
    /// Shortest remaining work among arrived processes
    Sjf,
    /// Rotation through arrived processes by id
    RoundRobin,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [Self::Fcfs, Self::Sjf, Self::RoundRobin];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin => "round_robin",
        }
    }

    /// Instantiate a fresh policy with no history
    pub fn build(self) -> Box<dyn SchedulingPolicy> {
        match self {
            Self::Fcfs => Box::new(Fcfs),
            Self::Sjf => Box::new(Sjf),
            Self::RoundRobin => Box::new(RoundRobin::new()),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" | "first_come_first_served" | "f" => Ok(Self::Fcfs),
            "sjf" | "srtf" | "shortest_job_first" | "s" => Ok(Self::Sjf),
            "round_robin" | "roundrobin" | "rr" | "r" => Ok(Self::RoundRobin),
            _ => Err(SimulationError::InvalidPolicy(format!(
                "'{}'. Valid: fcfs, sjf, round_robin",
                s
            ))),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PolicyKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PolicyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
