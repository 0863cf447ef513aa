//! CoDel（Controlled Delay）AQM 队列
//!
//! 控制的是包在队列中的滞留时间（sojourn time）而不是队列长度：
//! 入队永不丢包，出队时按包龄决定是否丢弃。滞留持续超过 target 达
//! 一个 interval 后进入丢弃状态，丢弃间隔按 interval/sqrt(count) 收缩。

use std::collections::VecDeque;

use tracing::debug;

use crate::net::{DeliveryStatus, PacketRef};
use crate::sim::SimTime;

use super::QueueDiscipline;

/// 滞留时间目标（5 ms）。
pub const CODEL_TARGET: SimTime = SimTime(5_000_000);
/// 观察窗口（100 ms）。
pub const CODEL_INTERVAL: SimTime = SimTime(100_000_000);

#[derive(Debug)]
struct CodelEntry {
    pkt: PacketRef,
    arrived: SimTime,
}

#[derive(Debug)]
pub struct CodelQueue {
    target: SimTime,
    interval: SimTime,
    q: VecDeque<CodelEntry>,
    /// 观察窗口的到期时刻（首次超标时置为 now + interval）；未超标时为 None。
    first_above_time: Option<SimTime>,
    /// 下一次丢包时刻；仅在丢弃状态下有意义。
    drop_next: Option<SimTime>,
    /// 当前丢弃阶段内已丢的包数。
    count: u32,
    dropping: bool,
}

impl CodelQueue {
    pub fn new(target: SimTime, interval: SimTime) -> Self {
        Self {
            target,
            interval,
            q: VecDeque::new(),
            first_above_time: None,
            drop_next: None,
            count: 0,
            dropping: false,
        }
    }

    /// 控制律：下一次丢包在 now + interval / sqrt(count)。
    fn next_drop_at(&self, now: SimTime) -> SimTime {
        let gap = self.interval.0 as f64 / f64::from(self.count.max(1)).sqrt();
        now.saturating_add(SimTime(gap as u64))
    }

    fn drop_entry(&self, entry: CodelEntry, sojourn: SimTime) {
        debug!(
            pkt_id = entry.pkt.borrow().id,
            sojourn_ns = sojourn.0,
            count = self.count,
            "CoDel 丢弃滞留超标的包"
        );
        entry
            .pkt
            .borrow_mut()
            .add_delivery_status(DeliveryStatus::Dropped);
    }
}

impl QueueDiscipline for CodelQueue {
    fn enqueue(&mut self, pkt: PacketRef, now: SimTime) -> Result<(), PacketRef> {
        // CoDel 从不在到达侧丢包；自我调节全部发生在出队侧。
        self.q.push_back(CodelEntry { pkt, arrived: now });
        Ok(())
    }

    fn dequeue(&mut self, now: SimTime) -> Option<PacketRef> {
        loop {
            let entry = self.q.pop_front()?;
            let sojourn = now.saturating_sub(entry.arrived);

            if sojourn < self.target || self.q.is_empty() {
                // 队列状态良好：关闭观察窗口并退出丢弃状态。
                self.first_above_time = None;
                self.dropping = false;
                return Some(entry.pkt);
            }

            let Some(first_above) = self.first_above_time else {
                // 首次超标：打开观察窗口，本包照常放行。
                self.first_above_time = Some(now.saturating_add(self.interval));
                return Some(entry.pkt);
            };

            if now < first_above {
                // 窗口未到期，尚不能断定是持续性排队。
                return Some(entry.pkt);
            }

            if !self.dropping {
                // 超标持续了整个 interval：进入丢弃状态，丢掉本包并重试下一个。
                self.dropping = true;
                self.count = 1;
                self.drop_entry(entry, sojourn);
                self.drop_next = Some(self.next_drop_at(now));
                continue;
            }

            if self.drop_next.is_some_and(|at| now >= at) {
                self.count = self.count.saturating_add(1);
                self.drop_entry(entry, sojourn);
                self.drop_next = Some(self.next_drop_at(now));
                continue;
            }

            return Some(entry.pkt);
        }
    }

    fn peek(&self) -> Option<PacketRef> {
        self.q.front().map(|entry| entry.pkt.clone())
    }

    fn len(&self) -> usize {
        self.q.len()
    }
}
