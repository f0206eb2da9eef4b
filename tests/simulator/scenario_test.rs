/*!
 * Scenario Tests
 * Hand-traced simulations with known timelines
 */

use super::common::{engine, seeded, CountingPolicy};
use pretty_assertions::assert_eq;
use queue_simulator::{
    EngineConfig, Fcfs, PolicyKind, Process, ProcessQueue, RunOutcome, SchedulingEngine, Tick,
};
use std::sync::atomic::Ordering;

#[test]
fn test_single_process_one_advance() {
    let mut engine = SchedulingEngine::new(seeded(&[Process::new(1, 5, 0)]), Box::new(Fcfs)).unwrap();

    let pid = engine.select_process().unwrap();
    assert_eq!(pid, 1);
    assert_eq!(engine.advance(pid).unwrap(), Tick::Burst { delta: 5 });

    assert_eq!(engine.running_time(), 5);
    assert!(engine.bursting().is_empty());
    let sleeper = engine.sleeping().get(1).unwrap();
    assert_eq!(sleeper.arrive_at, 0);
    assert_eq!(sleeper.time_remaining(), 5);
    assert_eq!(engine.stats().context_switches(), 0);
}

#[test]
fn test_two_processes_fcfs_order() {
    let config = EngineConfig::default()
        .with_max_cycles(2)
        .with_context_switch_cost(2);
    let mut engine = engine(
        &[Process::new(1, 4, 0), Process::new(2, 3, 0)],
        PolicyKind::Fcfs,
        config,
    );

    let report = engine.run().unwrap();
    let history = engine.history().snapshots();

    // A ran first: after cycle one it sleeps while B still waits to burst
    assert_eq!(history[0].running_time(), 4);
    assert!(history[0].is_bursting(2));
    assert!(!history[0].is_bursting(1));

    // Then B, after one context switch
    assert_eq!(history[1].running_time(), 4 + 2 + 3);
    assert_eq!(report.processes[&1].first_completion, Some(4));
    assert_eq!(report.processes[&2].first_completion, Some(9));
    assert_eq!(report.processes[&2].wait_time, 6);

    // Second switch follows the fast-forward over the sleepers
    assert_eq!(report.context_switches, 2);
    assert_eq!(report.total_time, 4 + 2 + 3 + 3 + 2);
}

#[test]
fn test_delayed_arrival_waits_then_bursts() {
    let mut engine = SchedulingEngine::new(seeded(&[Process::new(1, 2, 10)]), Box::new(Fcfs)).unwrap();
    let before = engine.bursting().clone();

    assert_eq!(engine.tick(1).unwrap(), Tick::Waiting { delta: 10 });
    assert_eq!(engine.bursting(), &before);
    assert!(engine.sleeping().is_empty());

    assert_eq!(engine.advance(1).unwrap(), Tick::Waiting { delta: 10 });
    assert_eq!(engine.running_time(), 10);
    assert_eq!(engine.tick(1).unwrap(), Tick::Burst { delta: 2 });
}

#[test]
fn test_delayed_arrival_run_keeps_selection() {
    let mut engine = engine(
        &[Process::new(1, 2, 10)],
        PolicyKind::Fcfs,
        EngineConfig::default().with_max_cycles(2),
    );

    let report = engine.run().unwrap();
    let history = engine.history().snapshots();

    assert_eq!(history[0].running_time(), 10);
    assert!(history[0].is_bursting(1));
    assert_eq!(history[1].running_time(), 12);

    let stats = &report.processes[&1];
    assert_eq!(stats.dispatches, 2);
    assert_eq!(stats.wait_time, 0);
    assert_eq!(stats.turnaround, Some(2));
}

#[test]
fn test_empty_bursting_fast_forwards_to_latest_sleeper() {
    let mut sleeping = ProcessQueue::sleeping();
    sleeping
        .add_process(Process::new(1, 7, 0).shared(), 0)
        .unwrap();
    sleeping
        .add_process(Process::new(2, 3, 0).shared(), 0)
        .unwrap();

    let mut engine = SchedulingEngine::with_queues(
        ProcessQueue::bursting(),
        sleeping,
        Box::new(Fcfs),
        EngineConfig::default(),
    )
    .unwrap();

    engine.pop_next_sleeping().unwrap();

    assert_eq!(engine.running_time(), 7);
    assert!(engine.sleeping().is_empty());
    assert!(engine.bursting().contains(1));
    assert!(engine.bursting().contains(2));
}

#[test]
fn test_zero_burst_converges() {
    let mut engine = engine(
        &[Process::new(1, 0, 0)],
        PolicyKind::Fcfs,
        EngineConfig::default().with_stop_on_convergence(true),
    );

    let report = engine.run().unwrap();
    assert_eq!(report.outcome, RunOutcome::Converged { cycle: 2 });
    assert!(report.converged);
    assert_eq!(report.first_repeat, Some(1));
    assert_eq!(report.cycles, 2);
    assert_eq!(report.snapshots, 2);
    assert_eq!(report.context_switches, 0);
}

#[test]
fn test_zero_burst_keeps_cpu_without_switch_cost() {
    let (policy, calls) = CountingPolicy::new(Box::new(Fcfs));
    let mut engine = SchedulingEngine::with_config(
        seeded(&[Process::new(1, 0, 0)]),
        Box::new(policy),
        EngineConfig::default()
            .with_max_cycles(5)
            .with_context_switch_cost(3),
    )
    .unwrap();

    let report = engine.run().unwrap();

    // Woken within its own step, it never leaves the bursting queue
    assert!(engine.bursting().contains(1));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(report.context_switches, 0);
    assert_eq!(report.total_time, 0);
    assert!(report.converged);
    assert_eq!(report.first_repeat, Some(1));
    assert_eq!(report.processes[&1].bursts, 5);
}

#[test]
fn test_convergence_does_not_stop_by_default() {
    let mut engine = engine(
        &[Process::new(1, 0, 0)],
        PolicyKind::Fcfs,
        EngineConfig::default().with_max_cycles(5),
    );

    let report = engine.run().unwrap();
    assert_eq!(report.outcome, RunOutcome::CycleLimitReached);
    assert!(report.converged);
    assert_eq!(report.cycles, 5);
    assert_eq!(report.snapshots, 5);
}

#[test]
fn test_fcfs_waits() {
    let workload = [
        Process::new(1, 8, 0),
        Process::new(2, 1, 0),
        Process::new(3, 2, 0),
    ];
    let config = EngineConfig::default().with_max_cycles(3);

    let fcfs = engine(&workload, PolicyKind::Fcfs, config).run().unwrap();
    assert_eq!(fcfs.processes[&1].wait_time, 0);
    assert_eq!(fcfs.processes[&2].wait_time, 8);
    assert_eq!(fcfs.processes[&3].wait_time, 9);
    assert_eq!(fcfs.total_bursts, 3);

    let sjf = engine(&workload, PolicyKind::Sjf, config).run().unwrap();
    assert_eq!(sjf.total_bursts, 3);
    assert!(sjf.average_wait < fcfs.average_wait);
}

#[test]
fn test_rewoken_process_waits_for_cpu() {
    let mut engine = engine(
        &[Process::new(1, 2, 0), Process::new(2, 10, 0)],
        PolicyKind::Fcfs,
        EngineConfig::default().with_max_cycles(3),
    );

    let report = engine.run().unwrap();
    let times: Vec<u64> = engine.history().iter().map(|s| s.running_time()).collect();
    assert_eq!(times, vec![2, 12, 14]);

    // Process 1 wakes at 4 while process 2 holds the CPU until 12
    let first = &report.processes[&1];
    assert_eq!(first.bursts, 2);
    assert_eq!(first.wait_time, 8);
    assert_eq!(report.processes[&2].wait_time, 2);
    assert_eq!(report.average_wait, 10.0 / 3.0);
}

#[test]
fn test_rewoken_wait_includes_switch_cost() {
    let mut engine = engine(
        &[Process::new(1, 2, 0), Process::new(2, 10, 0)],
        PolicyKind::Fcfs,
        EngineConfig::default()
            .with_max_cycles(3)
            .with_context_switch_cost(1),
    );

    let report = engine.run().unwrap();
    let times: Vec<u64> = engine.history().iter().map(|s| s.running_time()).collect();
    assert_eq!(times, vec![2, 13, 16]);

    // Ready at 5, dispatched after the switch at 14
    assert_eq!(report.processes[&1].wait_time, 9);
    assert_eq!(report.processes[&2].wait_time, 3);
}

#[test]
fn test_round_robin_rotation() {
    let mut engine = engine(
        &[
            Process::new(1, 2, 0),
            Process::new(2, 2, 0),
            Process::new(3, 2, 0),
        ],
        PolicyKind::RoundRobin,
        EngineConfig::default().with_max_cycles(3),
    );

    let report = engine.run().unwrap();
    assert_eq!(report.processes[&1].first_completion, Some(2));
    assert_eq!(report.processes[&2].first_completion, Some(4));
    assert_eq!(report.processes[&3].first_completion, Some(6));
}
