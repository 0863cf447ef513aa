//! 网络接口（下游链路）
//!
//! Router 在队列空→非空的边沿唤醒接口；接口随后按下游链路速率
//! 逐包调用 Router::dequeue 拉取。

use tracing::{debug, trace};

use super::id::HostId;
use super::pull_packets::PullPackets;
use crate::sim::{SimTime, Simulator};

/// 下游消费者边界：Router 仅在空→非空转换时调用，一次性通知。
pub trait NetworkInterface {
    fn receive_packets(&mut self, host: HostId, sim: &mut Simulator);
}

/// 模拟主机下游链路的 NIC。
#[derive(Debug)]
pub struct Nic {
    host: HostId,
    bandwidth_bps: u64,
    /// 拉取循环是否在运行（等价于链路忙）。
    pulling: bool,
}

impl Nic {
    pub fn new(host: HostId, bandwidth_bps: u64) -> Self {
        Self {
            host,
            bandwidth_bps,
            pulling: false,
        }
    }

    /// 传输指定字节数所需的时间
    pub(crate) fn tx_time(&self, bytes: u32) -> SimTime {
        // ceil(bytes*8 / bps) 秒 -> 纳秒
        if self.bandwidth_bps == 0 {
            return SimTime(u64::MAX / 4);
        }
        let bits = (bytes as u128).saturating_mul(8);
        let nanos = (bits.saturating_mul(1_000_000_000u128) + (self.bandwidth_bps as u128 - 1))
            / self.bandwidth_bps as u128;
        SimTime(nanos.min(u64::MAX as u128) as u64)
    }

    /// 拉取循环结束（队列已空）。下一次边沿通知会重新启动它。
    pub(crate) fn set_idle(&mut self) {
        trace!(host = ?self.host, "NIC 进入空闲");
        self.pulling = false;
    }
}

impl NetworkInterface for Nic {
    fn receive_packets(&mut self, host: HostId, sim: &mut Simulator) {
        if self.pulling {
            // 链路忙：运行中的拉取循环自会取到新包。
            return;
        }
        debug!(host = ?host, now = ?sim.now(), "NIC 被唤醒，调度拉取");
        self.pulling = true;
        sim.schedule(sim.now(), PullPackets { host });
    }
}
