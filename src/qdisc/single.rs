//! 单包缓冲队列
//!
//! 最多缓冲一个 packet；槽位被占用时拒绝新包。

use crate::net::PacketRef;
use crate::sim::SimTime;

use super::QueueDiscipline;

#[derive(Debug, Default)]
pub struct SingleSlotQueue {
    slot: Option<PacketRef>,
}

impl SingleSlotQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueDiscipline for SingleSlotQueue {
    fn enqueue(&mut self, pkt: PacketRef, _now: SimTime) -> Result<(), PacketRef> {
        if self.slot.is_some() {
            return Err(pkt);
        }
        self.slot = Some(pkt);
        Ok(())
    }

    fn dequeue(&mut self, _now: SimTime) -> Option<PacketRef> {
        self.slot.take()
    }

    fn peek(&self) -> Option<PacketRef> {
        self.slot.clone()
    }

    fn len(&self) -> usize {
        usize::from(self.slot.is_some())
    }
}
