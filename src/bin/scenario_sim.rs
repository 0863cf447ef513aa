//! 按 scenario JSON 运行接入网络仿真

use std::path::PathBuf;
use std::process::ExitCode;

use aqmsim_rs::demo::{build_scenario, schedule_bursts};
use aqmsim_rs::net::NetWorld;
use aqmsim_rs::sim::{ScenarioSpec, SimTime, Simulator};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "scenario-sim",
    about = "Run a scenario.json on the access-router simulator"
)]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Run until this time (ms); defaults to running until completion
    #[arg(long)]
    until_ms: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let spec = match ScenarioSpec::load(&args.scenario) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("scenario error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    let hosts = build_scenario(&mut world, &spec);
    schedule_bursts(&mut sim, &spec, &hosts);

    match args.until_ms {
        Some(ms) => sim.run_until(SimTime::from_millis(ms), &mut world),
        None => sim.run(&mut world),
    }

    let report = world.net.delivery_report();
    println!(
        "done @ {:?}, forwarded={}, delivered_pkts={}, delivered_bytes={}",
        sim.now(),
        world.net.stats.forwarded_pkts,
        world.net.stats.delivered_pkts,
        world.net.stats.delivered_bytes
    );
    println!(
        "report total={} dequeued={} dropped={} buffered={} in_flight={}",
        report.total_pkts,
        report.dequeued_pkts,
        report.dropped_pkts,
        report.buffered_pkts,
        report.in_flight_pkts
    );
    ExitCode::SUCCESS
}
