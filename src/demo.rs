//! 演示与场景装配
//!
//! 构建接入网络、注入突发流量；scenario JSON 到世界的装配也在这里。

use std::collections::HashMap;

use crate::net::{HostId, NetWorld};
use crate::qdisc::{CODEL_INTERVAL, CODEL_TARGET, DEFAULT_FIFO_CAPACITY_PKTS, QdiscMode};
use crate::sim::{Event, QdiscSpec, ScenarioSpec, SimTime, Simulator, World};

/// 一对主机（发送端 + 接收端）的配置选项
#[derive(Debug, Clone)]
pub struct AccessPairOpts {
    /// 接收端上游路由器的队列策略
    pub mode: QdiscMode,
    /// 接收端下游链路带宽
    pub downstream_bps: u64,
    /// 主机间单向时延
    pub latency: SimTime,
}

impl Default for AccessPairOpts {
    fn default() -> Self {
        Self {
            mode: QdiscMode::static_fifo_default(),
            downstream_bps: 10_000_000,
            latency: SimTime::from_micros(500),
        }
    }
}

/// 构建 sender -> receiver 的接入网络。
///
/// 返回：(发送端, 接收端)
pub fn build_access_pair(world: &mut NetWorld, opts: &AccessPairOpts) -> (HostId, HostId) {
    // 发送端的下游队列不参与本仿真，给一个大带宽的默认 FIFO。
    let sender = world
        .net
        .add_host("sender", 1_000_000_000, QdiscMode::static_fifo_default());
    let receiver = world
        .net
        .add_host("receiver", opts.downstream_bps, opts.mode);
    world.net.set_base_latency(opts.latency);
    (sender, receiver)
}

/// 突发流量注入事件
///
/// 周期性发出 packet，直到 remaining 用尽。
#[derive(Debug)]
pub struct InjectBurst {
    pub flow_id: u64,
    pub src: HostId,
    pub dst: HostId,
    pub pkt_bytes: u32,
    pub remaining: u64,
    pub gap: SimTime,
}

impl Event for InjectBurst {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let mut me = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        if me.remaining == 0 {
            return;
        }

        let pkt = w.net.make_packet(me.flow_id, me.pkt_bytes, me.src, me.dst);
        w.net.send_from(me.src, pkt, sim);

        me.remaining -= 1;
        if me.remaining > 0 {
            let next_at = sim.now().saturating_add(me.gap);
            sim.schedule(next_at, InjectBurst { ..me });
        }
    }
}

fn mode_from_spec(spec: Option<&QdiscSpec>, fallback: QdiscMode) -> QdiscMode {
    match spec {
        None => fallback,
        Some(QdiscSpec::SingleSlot) => QdiscMode::SingleSlot,
        Some(QdiscSpec::StaticFifo { capacity_pkts }) => QdiscMode::StaticFifo {
            capacity_pkts: capacity_pkts
                .map(|c| c as usize)
                .unwrap_or(DEFAULT_FIFO_CAPACITY_PKTS),
        },
        Some(QdiscSpec::Codel {
            target_us,
            interval_us,
        }) => QdiscMode::Codel {
            target: target_us.map(SimTime::from_micros).unwrap_or(CODEL_TARGET),
            interval: interval_us
                .map(SimTime::from_micros)
                .unwrap_or(CODEL_INTERVAL),
        },
    }
}

/// 按场景描述装配主机。返回 scenario host id 到 HostId 的映射。
pub fn build_scenario(world: &mut NetWorld, spec: &ScenarioSpec) -> HashMap<u64, HostId> {
    let defaults = spec.defaults.clone().unwrap_or_default();
    let default_mode = mode_from_spec(defaults.qdisc.as_ref(), QdiscMode::static_fifo_default());
    let default_mbps = defaults.downstream_mbps.unwrap_or(10);
    world
        .net
        .set_base_latency(SimTime::from_micros(defaults.latency_us.unwrap_or(500)));

    let mut map = HashMap::new();
    for host in &spec.hosts {
        let name = host
            .name
            .clone()
            .unwrap_or_else(|| format!("h{}", host.id));
        let mbps = host.downstream_mbps.unwrap_or(default_mbps);
        let mode = mode_from_spec(host.qdisc.as_ref(), default_mode);
        let id = world
            .net
            .add_host(name, mbps.saturating_mul(1_000_000), mode);
        map.insert(host.id, id);
    }
    map
}

/// 调度场景中的所有突发。调用前场景必须已通过 validate。
pub fn schedule_bursts(sim: &mut Simulator, spec: &ScenarioSpec, hosts: &HashMap<u64, HostId>) {
    let defaults = spec.defaults.clone().unwrap_or_default();
    let default_pkt_bytes = defaults.pkt_bytes.unwrap_or(1500);
    for (i, burst) in spec.bursts.iter().enumerate() {
        let src = *hosts.get(&burst.src).expect("validated burst src");
        let dst = *hosts.get(&burst.dst).expect("validated burst dst");
        sim.schedule(
            SimTime::from_micros(burst.start_us.unwrap_or(0)),
            InjectBurst {
                flow_id: burst.flow_id.unwrap_or(i as u64 + 1),
                src,
                dst,
                pkt_bytes: burst.pkt_bytes.unwrap_or(default_pkt_bytes),
                remaining: burst.pkts,
                gap: SimTime::from_micros(burst.gap_us.unwrap_or(10)),
            },
        );
    }
}
