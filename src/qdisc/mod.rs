//! 队列策略（Queue disciplines）
//!
//! 上游路由器使用的可插拔缓冲策略：SingleSlot（单包缓冲）、
//! StaticFifo（固定容量尾丢弃 FIFO）与 CoDel（基于滞留时间的 AQM）。

use crate::net::PacketRef;
use crate::sim::SimTime;

mod codel;
mod single;
mod static_fifo;

pub use codel::{CODEL_INTERVAL, CODEL_TARGET, CodelQueue};
pub use single::SingleSlotQueue;
pub use static_fifo::StaticFifoQueue;

/// StaticFifo 默认容量（包数）。
pub const DEFAULT_FIFO_CAPACITY_PKTS: usize = 1024;

/// 队列策略抽象
///
/// 当前仿真时间由调用方显式传入，策略内部不读取任何全局时钟。
pub trait QueueDiscipline: std::fmt::Debug {
    /// 入队：成功返回 Ok；若被拒绝则返回 Err(pkt)，包不会被存储
    fn enqueue(&mut self, pkt: PacketRef, now: SimTime) -> Result<(), PacketRef>;
    /// 出队：按策略返回下一个 packet；队列为空时返回 None
    fn dequeue(&mut self, now: SimTime) -> Option<PacketRef>;
    /// 只读查看下一个将被出队的 packet，不产生任何副作用
    fn peek(&self) -> Option<PacketRef>;

    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 队列策略选择。每个变体携带自己的配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QdiscMode {
    /// 只缓冲单个 packet
    SingleSlot,
    /// 固定容量的 FIFO，满时尾丢弃
    StaticFifo { capacity_pkts: usize },
    /// CoDel AQM
    Codel { target: SimTime, interval: SimTime },
}

impl QdiscMode {
    /// 默认容量的 StaticFifo。
    pub fn static_fifo_default() -> QdiscMode {
        QdiscMode::StaticFifo {
            capacity_pkts: DEFAULT_FIFO_CAPACITY_PKTS,
        }
    }

    /// 使用标准常量（5ms / 100ms）的 CoDel。
    pub fn codel_default() -> QdiscMode {
        QdiscMode::Codel {
            target: CODEL_TARGET,
            interval: CODEL_INTERVAL,
        }
    }

    /// 构建对应的队列策略实例（Router 构造时调用一次）。
    pub fn build(self) -> Box<dyn QueueDiscipline> {
        match self {
            QdiscMode::SingleSlot => Box::new(SingleSlotQueue::new()),
            QdiscMode::StaticFifo { capacity_pkts } => {
                Box::new(StaticFifoQueue::new(capacity_pkts))
            }
            QdiscMode::Codel { target, interval } => Box::new(CodelQueue::new(target, interval)),
        }
    }
}
