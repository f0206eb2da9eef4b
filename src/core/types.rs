/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process identifier
pub type ProcessId = u32;

/// Simulated time unit (abstract ticks, never wall-clock)
pub type SimTime = u64;
