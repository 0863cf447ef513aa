//! Worker 边界
//!
//! 出站包的移交点：由 Worker 计算路径时延并调度其到达远端路由器。

use super::id::HostId;
use super::packet::PacketRef;
use crate::sim::Simulator;

/// 出站转发边界。同步调用，异步生效：投递发生在之后的仿真时间。
pub trait Worker {
    fn send_packet(&mut self, src: HostId, pkt: PacketRef, sim: &mut Simulator);
}
