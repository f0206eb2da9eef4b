/*!
 * Queue Simulator - Driver
 *
 * Loads a workload, runs one or all policies and prints the reports as JSON.
 *
 * Usage: queue-sim [POLICY|all] [WORKLOAD.json]
 * Falls back to QSIM_POLICY / QSIM_WORKLOAD, then to fcfs over a demo workload.
 */

use miette::{IntoDiagnostic, Result};
use tracing::info;

use queue_simulator::core::limits::{ENV_POLICY, ENV_WORKLOAD};
use queue_simulator::{init_tracing, EngineConfig, PolicyKind, Process, SchedulingEngine, Workload};

fn demo_workload() -> Workload {
    [
        Process::new(1, 8, 0),
        Process::new(2, 4, 1),
        Process::new(3, 9, 2),
        Process::new(4, 5, 3),
    ]
    .into_iter()
    .collect()
}

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let policy_arg = args
        .next()
        .or_else(|| std::env::var(ENV_POLICY).ok())
        .unwrap_or_else(|| PolicyKind::default().as_str().to_string());
    let workload_arg = args.next().or_else(|| std::env::var(ENV_WORKLOAD).ok());

    let policies = if policy_arg.eq_ignore_ascii_case("all") {
        PolicyKind::ALL.to_vec()
    } else {
        vec![policy_arg.parse::<PolicyKind>()?]
    };

    let workload = match workload_arg {
        Some(path) => Workload::from_path(path)?,
        None => {
            info!("no workload given, using built-in demo");
            demo_workload()
        }
    };

    let config = EngineConfig::from_env()?;

    let mut reports = Vec::with_capacity(policies.len());
    for policy in policies {
        let mut engine = SchedulingEngine::from_workload(workload.clone(), policy, config)?;
        reports.push(engine.run()?);
    }

    let json = serde_json::to_string_pretty(&reports).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}
