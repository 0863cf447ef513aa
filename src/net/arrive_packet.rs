//! 远端到达事件
//!
//! 出站包经过网络时延后到达目的主机的上游路由器。

use super::id::HostId;
use super::net_world::NetWorld;
use super::packet::PacketRef;
use crate::sim::{Event, Simulator, World};

/// 事件：入站包抵达目的主机的上游路由器。
#[derive(Debug)]
pub struct ArrivePacket {
    pub dst: HostId,
    pub pkt: PacketRef,
}

impl Event for ArrivePacket {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let ArrivePacket { dst, pkt } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.arrive(dst, pkt, sim);
    }
}
