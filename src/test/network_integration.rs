use crate::demo::InjectBurst;
use crate::net::{DeliveryStatus, NetWorld};
use crate::qdisc::QdiscMode;
use crate::sim::{SimTime, Simulator};

#[test]
fn static_fifo_burst_of_three_through_capacity_two_router() {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    // Fast upstream, slow downstream (12 kbps: 1s to serialize one 1500B packet).
    let src = world
        .net
        .add_host("src", 1_000_000_000, QdiscMode::static_fifo_default());
    let dst = world
        .net
        .add_host("dst", 12_000, QdiscMode::StaticFifo { capacity_pkts: 2 });
    world.net.set_base_latency(SimTime::from_micros(10));

    let p1 = world.net.make_packet(1, 1500, src, dst);
    let p2 = world.net.make_packet(1, 1500, src, dst);
    let p3 = world.net.make_packet(1, 1500, src, dst);
    world.net.send_from(src, p1.clone(), &mut sim);
    world.net.send_from(src, p2.clone(), &mut sim);
    world.net.send_from(src, p3.clone(), &mut sim);

    sim.run(&mut world);

    // First two packets are enqueued then dequeued; the third hits a full queue.
    assert_eq!(
        p1.borrow().delivery_status(),
        &[DeliveryStatus::Enqueued, DeliveryStatus::Dequeued]
    );
    assert_eq!(
        p2.borrow().delivery_status(),
        &[DeliveryStatus::Enqueued, DeliveryStatus::Dequeued]
    );
    assert_eq!(p3.borrow().delivery_status(), &[DeliveryStatus::Dropped]);

    assert_eq!(world.net.stats.forwarded_pkts, 3);
    assert_eq!(world.net.stats.delivered_pkts, 2);
    assert_eq!(world.net.stats.delivered_bytes, 3000);

    let report = world.net.delivery_report();
    assert_eq!(report.total_pkts, 3);
    assert_eq!(report.dequeued_pkts, 2);
    assert_eq!(report.dropped_pkts, 1);
    assert_eq!(report.buffered_pkts, 0);
    assert_eq!(report.in_flight_pkts, 0);

    // The NIC drained the queue completely.
    assert_eq!(world.net.router(dst).queue_len(), 0);
    assert!(world.net.router(dst).peek().is_none());
}

#[test]
fn codel_sheds_load_under_sustained_overload() {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    // Inject at 1000 pps against a 100 pps downstream (1.2 Mbps / 1500B).
    let src = world
        .net
        .add_host("src", 1_000_000_000, QdiscMode::static_fifo_default());
    let dst = world.net.add_host("dst", 1_200_000, QdiscMode::codel_default());
    world.net.set_base_latency(SimTime::from_micros(10));

    sim.schedule(
        SimTime::ZERO,
        InjectBurst {
            flow_id: 1,
            src,
            dst,
            pkt_bytes: 1500,
            remaining: 200,
            gap: SimTime::from_millis(1),
        },
    );

    sim.run(&mut world);

    let report = world.net.delivery_report();
    assert_eq!(report.total_pkts, 200);
    // Once the backlog drains, every packet was either delivered or dropped by CoDel.
    assert_eq!(report.buffered_pkts, 0);
    assert_eq!(report.in_flight_pkts, 0);
    assert_eq!(report.dequeued_pkts + report.dropped_pkts, 200);
    // Sustained overload must have triggered a dropping episode.
    assert!(report.dropped_pkts >= 3, "report: {report:?}");
    // Throughput is not sacrificed: most packets still get through.
    assert!(report.dequeued_pkts >= 100, "report: {report:?}");
    assert_eq!(world.net.stats.delivered_pkts, report.dequeued_pkts);

    assert_eq!(world.net.router(dst).queue_len(), 0);
}

#[test]
fn single_slot_router_buffers_one_packet_at_a_time() {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    let src = world
        .net
        .add_host("src", 1_000_000_000, QdiscMode::static_fifo_default());
    // 12 kbps serializes 1s per packet, so a second simultaneous arrival hits an occupied slot.
    let dst = world.net.add_host("dst", 12_000, QdiscMode::SingleSlot);
    world.net.set_base_latency(SimTime::from_micros(10));

    let p1 = world.net.make_packet(1, 1500, src, dst);
    let p2 = world.net.make_packet(1, 1500, src, dst);
    world.net.send_from(src, p1.clone(), &mut sim);
    world.net.send_from(src, p2.clone(), &mut sim);

    sim.run(&mut world);

    assert_eq!(
        p1.borrow().delivery_status(),
        &[DeliveryStatus::Enqueued, DeliveryStatus::Dequeued]
    );
    assert_eq!(p2.borrow().delivery_status(), &[DeliveryStatus::Dropped]);
    assert_eq!(world.net.stats.delivered_pkts, 1);
}
