/*!
 * Monitoring Module
 * Run statistics and tracing setup
 */

pub mod stats;
pub mod tracer;

pub use stats::{ProcessStats, RunInfo, RunOutcome, SimulationReport, StatsCollector};
pub use tracer::init_tracing;
