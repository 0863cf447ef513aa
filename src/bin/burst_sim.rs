//! 突发平滑仿真
//!
//! 单条突发流经上游路由器的演示：快上游 -> 队列策略 -> 慢下游

use aqmsim_rs::demo::{AccessPairOpts, InjectBurst, build_access_pair};
use aqmsim_rs::net::NetWorld;
use aqmsim_rs::qdisc::{CODEL_INTERVAL, CODEL_TARGET, DEFAULT_FIFO_CAPACITY_PKTS, QdiscMode};
use aqmsim_rs::sim::{SimTime, Simulator};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "burst-sim", about = "突发流量经上游路由器队列策略的仿真")]
struct Args {
    /// 队列策略：single | fifo | codel
    #[arg(long, default_value = "fifo")]
    qdisc: String,
    /// StaticFifo 容量（包数）
    #[arg(long, default_value_t = DEFAULT_FIFO_CAPACITY_PKTS as u64)]
    capacity_pkts: u64,
    /// CoDel target（微秒），默认 5000
    #[arg(long)]
    target_us: Option<u64>,
    /// CoDel interval（微秒），默认 100000
    #[arg(long)]
    interval_us: Option<u64>,
    #[arg(long, default_value_t = 1500)]
    pkt_bytes: u32,
    #[arg(long, default_value_t = 10_000)]
    pkts: u64,
    /// 两个 packet 注入间隔（微秒）
    #[arg(long, default_value_t = 10)]
    gap_us: u64,
    /// 接收端下游链路带宽（Mbps）
    #[arg(long, default_value_t = 10)]
    downstream_mbps: u64,
    /// 主机间单向时延（微秒）
    #[arg(long, default_value_t = 500)]
    latency_us: u64,
    /// 仿真运行到多少毫秒
    #[arg(long, default_value_t = 2_000)]
    until_ms: u64,
}

fn parse_mode(args: &Args) -> QdiscMode {
    match args.qdisc.as_str() {
        "single" => QdiscMode::SingleSlot,
        "fifo" => QdiscMode::StaticFifo {
            capacity_pkts: args.capacity_pkts as usize,
        },
        "codel" => QdiscMode::Codel {
            target: args.target_us.map(SimTime::from_micros).unwrap_or(CODEL_TARGET),
            interval: args
                .interval_us
                .map(SimTime::from_micros)
                .unwrap_or(CODEL_INTERVAL),
        },
        other => {
            eprintln!("unknown qdisc {other:?} (expected single|fifo|codel)");
            std::process::exit(2);
        }
    }
}

fn main() {
    // 初始化 tracing
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
    let mode = parse_mode(&args);

    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    let opts = AccessPairOpts {
        mode,
        downstream_bps: args.downstream_mbps.saturating_mul(1_000_000),
        latency: SimTime::from_micros(args.latency_us),
    };
    let (src, dst) = build_access_pair(&mut world, &opts);

    // 注入一条突发流
    sim.schedule(
        SimTime::ZERO,
        InjectBurst {
            flow_id: 1,
            src,
            dst,
            pkt_bytes: args.pkt_bytes,
            remaining: args.pkts,
            gap: SimTime::from_micros(args.gap_us),
        },
    );

    sim.run_until(SimTime::from_millis(args.until_ms), &mut world);

    let report = world.net.delivery_report();
    println!(
        "done @ {:?}, forwarded={}, delivered_pkts={}, delivered_bytes={}, dropped={}, buffered={}",
        sim.now(),
        world.net.stats.forwarded_pkts,
        world.net.stats.delivered_pkts,
        world.net.stats.delivered_bytes,
        report.dropped_pkts,
        report.buffered_pkts,
    );
}
