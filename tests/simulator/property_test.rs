/*!
 * Property Tests
 * Invariants that hold for any workload and policy
 */

use super::common::{engine, seeded, CountingPolicy};
use proptest::prelude::*;
use queue_simulator::{EngineConfig, PolicyKind, Process, SchedulingEngine};
use std::sync::atomic::Ordering;

fn workload() -> impl Strategy<Value = Vec<Process>> {
    prop::collection::vec((0u64..20, 0u64..30), 1..6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (burst, arrival))| Process::new(i as u32 + 1, burst, arrival))
            .collect()
    })
}

fn policy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

fn config() -> impl Strategy<Value = EngineConfig> {
    (1usize..60, 0u64..4).prop_map(|(max_cycles, cost)| {
        EngineConfig::default()
            .with_max_cycles(max_cycles)
            .with_context_switch_cost(cost)
    })
}

proptest! {
    #[test]
    fn prop_runs_are_deterministic(processes in workload(), kind in policy(), config in config()) {
        let mut a = engine(&processes, kind, config);
        let mut b = engine(&processes, kind, config);

        let first = a.run().unwrap();
        let second = b.run().unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(a.history().snapshots(), b.history().snapshots());
    }

    #[test]
    fn prop_processes_are_conserved(processes in workload(), kind in policy(), config in config()) {
        let mut engine = engine(&processes, kind, config);
        engine.run().unwrap();

        let expected: Vec<u32> = (1..=processes.len() as u32).collect();
        for snapshot in engine.history() {
            let mut ids: Vec<u32> = snapshot.process_ids().collect();
            ids.sort_unstable();
            prop_assert_eq!(&ids, &expected);
        }
    }

    #[test]
    fn prop_running_time_never_decreases(processes in workload(), kind in policy(), config in config()) {
        let mut engine = engine(&processes, kind, config);
        let report = engine.run().unwrap();

        let times: Vec<u64> = engine.history().iter().map(|s| s.running_time()).collect();
        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(times.last().copied().unwrap_or(0) <= report.total_time);
    }

    #[test]
    fn prop_one_snapshot_per_cycle(processes in workload(), kind in policy(), config in config()) {
        let mut engine = engine(&processes, kind, config);
        let report = engine.run().unwrap();

        prop_assert_eq!(report.cycles, config.max_cycles);
        prop_assert_eq!(report.snapshots, report.cycles);
        prop_assert_eq!(engine.history().len(), report.cycles);
        prop_assert_eq!(report.converged, report.first_repeat.is_some());
    }

    #[test]
    fn prop_time_is_accounted(processes in workload(), kind in policy(), config in config()) {
        let report = engine(&processes, kind, config).run().unwrap();

        prop_assert_eq!(report.switch_time, report.context_switches * config.context_switch_cost);
        prop_assert!(report.busy_time + report.switch_time <= report.total_time);
        let bursts: u64 = report.processes.values().map(|s| s.bursts).sum();
        prop_assert_eq!(bursts, report.total_bursts);
    }

    #[test]
    fn prop_policy_consulted_only_when_cpu_released(processes in workload(), kind in policy(), config in config()) {
        let (policy, calls) = CountingPolicy::new(kind.build());
        let mut engine =
            SchedulingEngine::with_config(seeded(&processes), Box::new(policy), config).unwrap();

        let report = engine.run().unwrap();
        prop_assert_eq!(calls.load(Ordering::Relaxed) as u64, 1 + report.context_switches);
        prop_assert!(report.context_switches <= report.total_bursts);
    }
}
