//! 接入网络
//!
//! 维护主机注册表（每台主机一个 NIC + 一台上游路由器）、主机间时延
//! 与统计信息；作为 Worker 为出站包计算时延并调度远端到达。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, info, trace};

use super::arrive_packet::ArrivePacket;
use super::id::HostId;
use super::interface::{NetworkInterface, Nic};
use super::packet::{DeliveryStatus, Packet, PacketRef};
use super::pull_packets::PullPackets;
use super::router::{Router, RouterRef};
use super::stats::{DeliveryReport, Stats};
use super::worker::Worker;
use crate::qdisc::QdiscMode;
use crate::sim::{SimTime, Simulator};

/// 单台主机的接线：NIC 与上游路由器。
struct HostEntry {
    name: String,
    nic: Rc<RefCell<Nic>>,
    router: RouterRef,
}

/// 接入网络：主机注册表 + 时延模型 + 统计。
#[derive(Default)]
pub struct Network {
    hosts: Vec<HostEntry>,
    /// 主机对之间的单向时延覆盖；未覆盖时使用 base_latency。
    latency_overrides: HashMap<(HostId, HostId), SimTime>,
    base_latency: SimTime,
    next_pkt_id: u64,
    /// 本次仿真创建的所有包。所有权在此，队列只持有临时引用。
    packets: Vec<PacketRef>,
    pub stats: Stats,
}

impl Network {
    /// 添加一台主机：接好 NIC 与使用指定队列策略的上游路由器。
    pub fn add_host(
        &mut self,
        name: impl Into<String>,
        downstream_bps: u64,
        mode: QdiscMode,
    ) -> HostId {
        let id = HostId(self.hosts.len());
        let nic = Rc::new(RefCell::new(Nic::new(id, downstream_bps)));
        let iface: Rc<RefCell<dyn NetworkInterface>> = nic.clone();
        let router = Router::new(mode, iface);
        self.hosts.push(HostEntry {
            name: name.into(),
            nic,
            router,
        });
        id
    }

    /// 设置主机间的默认单向时延。
    pub fn set_base_latency(&mut self, latency: SimTime) {
        self.base_latency = latency;
    }

    /// 覆盖一对主机之间的单向时延。
    pub fn set_latency(&mut self, src: HostId, dst: HostId, latency: SimTime) {
        self.latency_overrides.insert((src, dst), latency);
    }

    fn latency_between(&self, src: HostId, dst: HostId) -> SimTime {
        self.latency_overrides
            .get(&(src, dst))
            .copied()
            .unwrap_or(self.base_latency)
    }

    pub fn host_name(&self, host: HostId) -> &str {
        &self.hosts[host.0].name
    }

    pub fn num_hosts(&self) -> usize {
        self.hosts.len()
    }

    /// 主机的上游路由器。
    pub fn router(&self, host: HostId) -> &RouterRef {
        &self.hosts[host.0].router
    }

    /// 创建数据包并登记到审计列表。
    pub fn make_packet(
        &mut self,
        flow_id: u64,
        size_bytes: u32,
        src: HostId,
        dst: HostId,
    ) -> PacketRef {
        let id = self.next_pkt_id;
        self.next_pkt_id = self.next_pkt_id.wrapping_add(1);
        let pkt = Rc::new(RefCell::new(Packet::new(id, flow_id, size_bytes, src, dst)));
        self.packets.push(Rc::clone(&pkt));
        pkt
    }

    /// 主机发出一个出站包：交给其上游路由器 forward。
    #[tracing::instrument(skip(self, pkt, sim), fields(src = ?src, pkt_id = pkt.borrow().id))]
    pub fn send_from(&mut self, src: HostId, pkt: PacketRef, sim: &mut Simulator) {
        debug!("🚀 主机发出出站包");
        let router = Rc::clone(&self.hosts[src.0].router);
        router.forward(src, pkt, self, sim);
    }

    /// 入站包到达目的主机的上游路由器。
    #[tracing::instrument(skip(self, pkt, sim), fields(dst = ?dst, pkt_id = pkt.borrow().id))]
    pub(crate) fn arrive(&mut self, dst: HostId, pkt: PacketRef, sim: &mut Simulator) {
        debug!("📨 入站包到达上游路由器");
        let router = Rc::clone(&self.hosts[dst.0].router);
        router.enqueue(dst, pkt, sim);
    }

    /// NIC 拉取一步：出队一个包投递给主机，再按串行化时延调度下一次拉取。
    #[tracing::instrument(skip(self, sim), fields(host = ?host))]
    pub(crate) fn pull(&mut self, host: HostId, sim: &mut Simulator) {
        let router = Rc::clone(&self.hosts[host.0].router);
        let nic = Rc::clone(&self.hosts[host.0].nic);

        match router.dequeue(sim.now()) {
            Some(pkt) => {
                let size_bytes = pkt.borrow().size_bytes;
                self.on_delivered(&pkt);
                let tx = nic.borrow().tx_time(size_bytes);
                let next = sim.now().saturating_add(tx);
                trace!(tx = ?tx, next = ?next, "链路串行化，调度下一次拉取");
                sim.schedule(next, PullPackets { host });
            }
            None => nic.borrow_mut().set_idle(),
        }
    }

    /// 包送达主机时更新统计。
    fn on_delivered(&mut self, pkt: &PacketRef) {
        let p = pkt.borrow();
        info!(pkt_id = p.id, flow_id = p.flow_id, "✅ 包送达主机");
        self.stats.delivered_pkts += 1;
        self.stats.delivered_bytes += p.size_bytes as u64;
    }

    /// 从投递状态日志导出的全局报告。
    pub fn delivery_report(&self) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for pkt in &self.packets {
            let p = pkt.borrow();
            report.total_pkts += 1;
            match p.last_status() {
                Some(DeliveryStatus::Dequeued) => report.dequeued_pkts += 1,
                Some(DeliveryStatus::Dropped) => report.dropped_pkts += 1,
                Some(DeliveryStatus::Enqueued) => report.buffered_pkts += 1,
                None => report.in_flight_pkts += 1,
            }
        }
        report
    }
}

impl Worker for Network {
    /// 出站包：按 src→dst 时延调度其到达远端路由器。
    fn send_packet(&mut self, src: HostId, pkt: PacketRef, sim: &mut Simulator) {
        let dst = pkt.borrow().dst;
        let latency = self.latency_between(src, dst);
        let arrive_at = sim.now().saturating_add(latency);
        self.stats.forwarded_pkts += 1;
        debug!(
            src = ?src,
            dst = ?dst,
            latency = ?latency,
            arrive_at = ?arrive_at,
            "调度远端到达"
        );
        sim.schedule(arrive_at, ArrivePacket { dst, pkt });
    }
}
