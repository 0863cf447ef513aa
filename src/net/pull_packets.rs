//! NIC 拉取事件（驱动路由器出队）

use super::id::HostId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：NIC 从上游路由器拉取下一个包；队列已空则转入空闲。
#[derive(Debug)]
pub struct PullPackets {
    pub host: HostId,
}

impl Event for PullPackets {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let PullPackets { host } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.pull(host, sim);
    }
}
