/*!
 * Engine Configuration
 * Run-loop bounds and overheads, with environment overrides
 */

use crate::core::errors::{Result, SimulationError};
use crate::core::limits::{
    DEFAULT_CONTEXT_SWITCH_COST, DEFAULT_MAX_CYCLES, DEFAULT_STOP_ON_CONVERGENCE,
    ENV_CONTEXT_SWITCH_COST, ENV_MAX_CYCLES, ENV_STOP_ON_CONVERGENCE,
};
use crate::core::types::SimTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Hard bound on run-loop iterations
    pub max_cycles: usize,
    /// Time charged each time a new process is selected
    pub context_switch_cost: SimTime,
    /// Stop at the first repeated snapshot instead of running to `max_cycles`
    pub stop_on_convergence: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
            context_switch_cost: DEFAULT_CONTEXT_SWITCH_COST,
            stop_on_convergence: DEFAULT_STOP_ON_CONVERGENCE,
        }
    }
}

impl EngineConfig {
    #[inline]
    #[must_use]
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_context_switch_cost(mut self, cost: SimTime) -> Self {
        self.context_switch_cost = cost;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_stop_on_convergence(mut self, stop: bool) -> Self {
        self.stop_on_convergence = stop;
        self
    }

    /// Reject configurations the run loop cannot use
    pub fn validate(&self) -> Result<()> {
        if self.max_cycles == 0 {
            return Err(SimulationError::Configuration(
                "max_cycles must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Defaults overridden by `QSIM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_CYCLES) {
            config.max_cycles = parse_var(ENV_MAX_CYCLES, &value)?;
        }
        if let Some(value) = lookup(ENV_CONTEXT_SWITCH_COST) {
            config.context_switch_cost = parse_var(ENV_CONTEXT_SWITCH_COST, &value)?;
        }
        if let Some(value) = lookup(ENV_STOP_ON_CONVERGENCE) {
            config.stop_on_convergence = matches!(value.trim(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SimulationError::Configuration(format!("{}={:?} is not a valid number", key, value)))
}
