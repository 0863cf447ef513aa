//! 数据包类型
//!
//! 定义网络数据包及其投递状态日志。

use std::cell::RefCell;
use std::rc::Rc;

use super::id::HostId;

/// 投递状态：路由器在相应转换点追加，构成只增的审计日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Enqueued,
    Dropped,
    Dequeued,
}

/// 网络数据包
#[derive(Debug)]
pub struct Packet {
    pub id: u64,
    pub flow_id: u64,
    pub size_bytes: u32,
    pub src: HostId,
    pub dst: HostId,
    statuses: Vec<DeliveryStatus>,
}

/// 数据包的共享引用。队列只持有临时引用，所有权属于 Network 注册表。
pub type PacketRef = Rc<RefCell<Packet>>;

impl Packet {
    pub fn new(id: u64, flow_id: u64, size_bytes: u32, src: HostId, dst: HostId) -> Self {
        Self {
            id,
            flow_id,
            size_bytes,
            src,
            dst,
            statuses: Vec::new(),
        }
    }

    /// 追加一条投递状态。日志只增，已有条目从不被修改或删除。
    pub fn add_delivery_status(&mut self, status: DeliveryStatus) {
        self.statuses.push(status);
    }

    /// 完整的投递状态日志（按发生顺序）。
    pub fn delivery_status(&self) -> &[DeliveryStatus] {
        &self.statuses
    }

    /// 最近一条投递状态。
    pub fn last_status(&self) -> Option<DeliveryStatus> {
        self.statuses.last().copied()
    }
}
