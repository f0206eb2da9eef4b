/*!
 * Run Loop
 * Bounded, non-preemptive simulation driver
 */

use super::SchedulingEngine;
use crate::core::errors::Result;
use crate::monitoring::{RunInfo, RunOutcome, SimulationReport};
use tracing::{info, info_span, warn};

impl SchedulingEngine {
    /// Run the simulation for at most `max_cycles` iterations
    ///
    /// Each iteration advances the current process, records a snapshot, and
    /// only consults the policy once the current process has left the bursting
    /// queue. A repeated snapshot ends the run early only when
    /// `stop_on_convergence` is set; otherwise the loop runs to the bound and
    /// the repeat is reported through `SimulationReport::converged`.
    ///
    /// The history starts empty unless it was seeded with `with_history`, in
    /// which case this run extends it.
    pub fn run(&mut self) -> Result<SimulationReport> {
        let span = info_span!("simulation", policy = self.policy.name());
        let _guard = span.enter();

        self.stats.reset();
        if !std::mem::take(&mut self.resume_history) {
            self.history.clear();
        }
        for entry in self.bursting.iter() {
            self.stats.register(
                &entry.process,
                self.running_time.saturating_add(entry.arrive_at),
            );
        }
        for entry in self.sleeping.iter() {
            self.stats.register(
                &entry.process,
                self.running_time.saturating_add(entry.wakes_in()),
            );
        }

        info!(
            processes = self.bursting.len() + self.sleeping.len(),
            max_cycles = self.config.max_cycles,
            context_switch_cost = self.config.context_switch_cost,
            "simulation started"
        );

        if self.bursting.is_empty() {
            self.pop_next_sleeping()?;
        }
        let mut current = self.select_process()?;

        let mut cycles = 0;
        let mut outcome = RunOutcome::CycleLimitReached;

        while cycles < self.config.max_cycles {
            cycles += 1;

            self.advance(current)?;

            if self.complete() && self.config.stop_on_convergence {
                outcome = RunOutcome::Converged { cycle: cycles };
                break;
            }

            // The CPU is only released once the current process leaves the bursting queue
            if !self.bursting.contains(current) {
                if self.bursting.is_empty() {
                    self.pop_next_sleeping()?;
                }
                current = self.select_process()?;

                let cost = self.config.context_switch_cost;
                self.running_time = self.running_time.saturating_add(cost);
                self.stats.record_context_switch(cost);
            }
        }

        if outcome == RunOutcome::CycleLimitReached && self.history.first_repeat().is_none() {
            warn!(cycles, "cycle limit reached without a repeated state");
        }

        self.stats.set_total_time(self.running_time);
        let report = self.stats.create_stats(
            &self.history,
            RunInfo {
                policy: self.policy.name(),
                outcome,
                cycles,
            },
        );

        info!(
            cycles,
            total_time = report.total_time,
            bursts = report.total_bursts,
            converged = report.converged,
            average_wait = report.average_wait,
            "simulation finished"
        );
        Ok(report)
    }
}
