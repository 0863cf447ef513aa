use std::cell::RefCell;
use std::rc::Rc;

use crate::net::{HostId, Packet, PacketRef};
use crate::qdisc::{QdiscMode, QueueDiscipline, SingleSlotQueue, StaticFifoQueue};
use crate::sim::SimTime;

fn pkt(id: u64) -> PacketRef {
    Rc::new(RefCell::new(Packet::new(id, 0, 1500, HostId(0), HostId(1))))
}

#[test]
fn single_slot_holds_exactly_one_packet() {
    let mut q = SingleSlotQueue::new();
    assert!(q.is_empty());
    assert!(q.peek().is_none());

    assert!(q.enqueue(pkt(1), SimTime::ZERO).is_ok());
    let rejected = q.enqueue(pkt(2), SimTime::ZERO).expect_err("slot occupied");
    assert_eq!(rejected.borrow().id, 2);
    assert_eq!(q.len(), 1);

    assert_eq!(q.dequeue(SimTime::ZERO).expect("pkt").borrow().id, 1);
    assert!(q.dequeue(SimTime::ZERO).is_none());

    // Slot is reusable once freed.
    assert!(q.enqueue(pkt(3), SimTime::ZERO).is_ok());
    assert_eq!(q.peek().expect("pkt").borrow().id, 3);
}

#[test]
fn static_fifo_enforces_capacity_and_preserves_order() {
    let mut q = StaticFifoQueue::new(2);
    assert_eq!(q.capacity_pkts(), 2);

    assert!(q.enqueue(pkt(1), SimTime::ZERO).is_ok());
    assert!(q.enqueue(pkt(2), SimTime::ZERO).is_ok());
    let rejected = q.enqueue(pkt(3), SimTime::ZERO).expect_err("should drop");
    assert_eq!(rejected.borrow().id, 3);
    assert_eq!(q.len(), 2);

    assert_eq!(q.dequeue(SimTime::ZERO).expect("pkt").borrow().id, 1);
    assert_eq!(q.dequeue(SimTime::ZERO).expect("pkt").borrow().id, 2);
    assert!(q.dequeue(SimTime::ZERO).is_none());

    // Accepts new packets again once space frees up.
    assert!(q.enqueue(pkt(4), SimTime::ZERO).is_ok());
    assert_eq!(q.len(), 1);
}

#[test]
fn static_fifo_peek_is_read_only() {
    let mut q = StaticFifoQueue::new(4);
    assert!(q.peek().is_none());

    assert!(q.enqueue(pkt(7), SimTime::ZERO).is_ok());
    assert!(q.enqueue(pkt(8), SimTime::ZERO).is_ok());
    assert_eq!(q.peek().expect("head").borrow().id, 7);
    assert_eq!(q.peek().expect("head").borrow().id, 7);
    assert_eq!(q.len(), 2);
}

#[test]
fn qdisc_mode_builds_matching_discipline() {
    // SingleSlot: second enqueue is rejected.
    let mut single = QdiscMode::SingleSlot.build();
    assert!(single.enqueue(pkt(1), SimTime::ZERO).is_ok());
    assert!(single.enqueue(pkt(2), SimTime::ZERO).is_err());

    // StaticFifo: capacity is enforced.
    let mut fifo = QdiscMode::StaticFifo { capacity_pkts: 2 }.build();
    assert!(fifo.enqueue(pkt(1), SimTime::ZERO).is_ok());
    assert!(fifo.enqueue(pkt(2), SimTime::ZERO).is_ok());
    assert!(fifo.enqueue(pkt(3), SimTime::ZERO).is_err());

    // CoDel: never rejects on arrival.
    let mut codel = QdiscMode::codel_default().build();
    for i in 0..64 {
        assert!(codel.enqueue(pkt(i), SimTime::ZERO).is_ok());
    }
    assert_eq!(codel.len(), 64);
}
