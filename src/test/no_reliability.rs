use super::util::{delivered_sns, events, run_scenario};
use crate::net::{NetWorld, Packet};
use crate::policy::ReliabilityMode;
use crate::sim::{ScenarioSpec, Simulator};
use crate::trace::{TraceKind, TraceLogger};

#[test]
fn lossless_run_delivers_everything_in_order_without_acks_or_timers() {
    let spec = ScenarioSpec {
        mode: ReliabilityMode::NoReliability,
        num_packets: 10,
        ..ScenarioSpec::default()
    };
    let (_sim, world, topo) = run_scenario(&spec, None);

    assert_eq!(delivered_sns(&world, topo.host_b), (1..=10).collect::<Vec<_>>());
    assert_eq!(world.net.stats.delivered_pkts, 10);
    assert_eq!(world.net.stats.acks_sent, 0);
    assert_eq!(world.net.stats.retransmissions, 0);

    for ev in events(&world) {
        assert!(
            !matches!(
                ev.kind,
                TraceKind::AckSend { .. } | TraceKind::TimerArmed { .. }
            ),
            "no ACKs or timers in no-reliability mode: {ev:?}"
        );
    }
}

#[test]
fn full_loss_on_first_hop_delivers_nothing_and_terminates() {
    let mut spec = ScenarioSpec {
        mode: ReliabilityMode::NoReliability,
        num_packets: 5,
        ..ScenarioSpec::default()
    };
    spec.l1.loss_prob = 1.0;
    let (_sim, world, topo) = run_scenario(&spec, None);

    assert!(delivered_sns(&world, topo.host_b).is_empty());
    assert_eq!(world.net.stats.delivered_pkts, 0);
    assert_eq!(world.net.stats.link_drops, 5);
}

/// A fire-and-forget sender facing a reliability-aware receiver: the receiver
/// still answers with ACKs, the sender just ignores them.
#[test]
fn reliability_aware_peer_acks_are_ignored_by_sender() {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();
    world.net.trace = Some(TraceLogger::default());

    let net = &mut world.net;
    let a = net.add_host("A", ReliabilityMode::NoReliability);
    let b = net.add_host("B", ReliabilityMode::StopAndWait);
    let r = net.add_router("R");

    let nic_a = net.add_iface("A:eth0", 1_000_000, None).expect("iface");
    let nic_b = net.add_iface("B:eth0", 500_000, None).expect("iface");
    let r_eth0 = net.add_iface("R:eth0", 1_000_000, None).expect("iface");
    let r_eth1 = net.add_iface("R:eth1", 500_000, Some(20)).expect("iface");

    let l1 = net.add_link("L1", 1_000.0, 2e8, 0.0).expect("link");
    let l2 = net.add_link("L2", 1_000.0, 2e8, 0.0).expect("link");

    net.bind(nic_a, a).expect("bind");
    net.bind(nic_b, b).expect("bind");
    net.bind(r_eth0, r).expect("bind");
    net.bind(r_eth1, r).expect("bind");
    net.attach(nic_a, l1).expect("attach");
    net.attach(r_eth0, l1).expect("attach");
    net.attach(r_eth1, l2).expect("attach");
    net.attach(nic_b, l2).expect("attach");

    let pkts: Vec<Packet> = (1..=5).map(|sn| Packet::data(sn, 10)).collect();
    world.net.host_send(a, pkts, &mut sim);
    sim.run(&mut world);

    assert_eq!(delivered_sns(&world, b), (1..=5).collect::<Vec<_>>());
    // 接收方照常回 ACK
    assert_eq!(world.net.stats.acks_sent, 5);
    // 发送方不处理它们：没有任何累计确认事件
    assert!(
        events(&world)
            .iter()
            .all(|ev| !matches!(ev.kind, TraceKind::AckRecv { .. }))
    );
}
