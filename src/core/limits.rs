/*!
 * Simulation Limits and Defaults
 *
 * Centralized location for engine bounds and default configuration values.
 */

// =============================================================================
// RUN LOOP
// =============================================================================

/// Hard bound on run-loop iterations
/// The only guard against a simulation that never converges
pub const DEFAULT_MAX_CYCLES: usize = 10_000;

/// Simulated cost charged every time the engine switches processes
pub const DEFAULT_CONTEXT_SWITCH_COST: u64 = 0;

/// Early stop on the first repeated snapshot is opt-in
pub const DEFAULT_STOP_ON_CONVERGENCE: bool = false;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides `max_cycles`
pub const ENV_MAX_CYCLES: &str = "QSIM_MAX_CYCLES";

/// Overrides `context_switch_cost`
pub const ENV_CONTEXT_SWITCH_COST: &str = "QSIM_CONTEXT_SWITCH_COST";

/// Overrides `stop_on_convergence` ("1" or "true")
pub const ENV_STOP_ON_CONVERGENCE: &str = "QSIM_STOP_ON_CONVERGENCE";

/// Policy name for the driver
pub const ENV_POLICY: &str = "QSIM_POLICY";

/// Workload file path for the driver
pub const ENV_WORKLOAD: &str = "QSIM_WORKLOAD";

/// JSON trace output toggle
pub const ENV_TRACE_JSON: &str = "QSIM_TRACE_JSON";
