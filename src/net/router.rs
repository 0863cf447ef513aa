//! 上游接入路由器
//!
//! 模拟主机外侧（ISP 一端）的上游路由器：用可插拔的队列管理策略
//! 把快速上游网络的突发平滑到慢速下游链路上。

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use super::id::HostId;
use super::interface::NetworkInterface;
use super::packet::{DeliveryStatus, PacketRef};
use super::worker::Worker;
use crate::qdisc::{QdiscMode, QueueDiscipline};
use crate::sim::{SimTime, Simulator};

/// 路由器的共享引用。引用计数就是 `Rc` 的 strong count：
/// clone 对应 acquire，drop 对应 release，归零时队列策略随之析构。
pub type RouterRef = Rc<Router>;

pub struct Router {
    /// 构造时选定，此后不变。
    mode: QdiscMode,
    /// 独占拥有的队列策略，具体类型由 mode 决定。
    qdisc: RefCell<Box<dyn QueueDiscipline>>,
    /// 下游接口。构造时设置，只被引用不被拥有。
    iface: Rc<RefCell<dyn NetworkInterface>>,
}

impl Router {
    pub fn new(mode: QdiscMode, iface: Rc<RefCell<dyn NetworkInterface>>) -> RouterRef {
        Rc::new(Router {
            mode,
            qdisc: RefCell::new(mode.build()),
            iface,
        })
    }

    pub fn mode(&self) -> QdiscMode {
        self.mode
    }

    /// 出站包直接移交 Worker 计算路径与时延，完全不经过本地队列。
    #[tracing::instrument(skip(self, pkt, worker, sim), fields(src = ?src, pkt_id = pkt.borrow().id))]
    pub fn forward(
        &self,
        src: HostId,
        pkt: PacketRef,
        worker: &mut dyn Worker,
        sim: &mut Simulator,
    ) {
        trace!("出站包移交 Worker");
        worker.send_packet(src, pkt, sim);
    }

    /// 入站包交给队列策略缓冲；仅在队列空→非空的边沿通知下游接口。
    #[tracing::instrument(skip(self, pkt, sim), fields(host = ?host, pkt_id = pkt.borrow().id))]
    pub fn enqueue(&self, host: HostId, pkt: PacketRef, sim: &mut Simulator) {
        let (was_empty, queued) = {
            let mut q = self.qdisc.borrow_mut();
            let was_empty = q.peek().is_none();
            let queued = q.enqueue(Rc::clone(&pkt), sim.now()).is_ok();
            (was_empty, queued)
        };

        if queued {
            debug!("包已入队");
            pkt.borrow_mut().add_delivery_status(DeliveryStatus::Enqueued);
        } else {
            debug!("队列拒绝，包被丢弃");
            pkt.borrow_mut().add_delivery_status(DeliveryStatus::Dropped);
        }

        // 边沿触发：只有空→非空的转换才唤醒下游，避免重复唤醒。
        if was_empty && queued {
            self.iface.borrow_mut().receive_packets(host, sim);
        }
    }

    /// 取出下一个入站包；队列为空时返回 None。
    #[tracing::instrument(skip(self), fields(now = ?now))]
    pub fn dequeue(&self, now: SimTime) -> Option<PacketRef> {
        let pkt = self.qdisc.borrow_mut().dequeue(now)?;
        debug!(pkt_id = pkt.borrow().id, "包已出队");
        pkt.borrow_mut().add_delivery_status(DeliveryStatus::Dequeued);
        Some(pkt)
    }

    /// 只读查看下一个将被出队的包，不改变任何状态。
    pub fn peek(&self) -> Option<PacketRef> {
        self.qdisc.borrow().peek()
    }

    /// 当前缓冲的包数。
    pub fn queue_len(&self) -> usize {
        self.qdisc.borrow().len()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("mode", &self.mode)
            .field("qdisc", &self.qdisc)
            .finish_non_exhaustive()
    }
}
