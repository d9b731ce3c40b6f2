//! Shared helpers for the behavior tests: build the two-hop topology from a
//! scenario, run it with tracing enabled, and replay the trace for assertions.

use std::collections::BTreeSet;

use crate::net::{NetWorld, NodeId, Packet, SendRequest};
use crate::sim::{ScenarioSpec, SimTime, Simulator};
use crate::topo::two_hop::{TwoHop, TwoHopOpts, build_two_hop};
use crate::trace::{TraceEvent, TraceKind, TraceLogger};

/// Build the two-hop topology for `spec`, inject `num_packets` DATA packets at
/// host A at t=0, and run (to completion, or up to `until`).
pub fn run_scenario(spec: &ScenarioSpec, until: Option<SimTime>) -> (Simulator, NetWorld, TwoHop) {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();
    world.net.reseed(spec.seed);
    world.net.trace = Some(TraceLogger::default());

    let topo = build_two_hop(&mut world, &TwoHopOpts::from(spec)).expect("valid two-hop config");

    let pkts: Vec<Packet> = (1..=spec.num_packets)
        .map(|sn| Packet::data(sn, spec.packet_bytes))
        .collect();
    sim.schedule(
        SimTime::ZERO,
        SendRequest {
            node: topo.host_a,
            pkts,
        },
    );

    match until {
        Some(t) => sim.run_until(t, &mut world),
        None => sim.run(&mut world),
    }
    (sim, world, topo)
}

pub fn events(world: &NetWorld) -> &[TraceEvent] {
    &world.net.trace.as_ref().expect("trace enabled").events
}

/// Serial numbers delivered to `node`'s application layer, in arrival order.
pub fn delivered_sns(world: &NetWorld, node: NodeId) -> Vec<u64> {
    events(world)
        .iter()
        .filter_map(|ev| match ev.kind {
            TraceKind::Delivered { node: n, sn } if n == node.0 => Some(sn),
            _ => None,
        })
        .collect()
}

/// Replay the sender-side trace of `node` and return the maximum number of
/// packets that were ever unacknowledged at once.
pub fn max_outstanding(events: &[TraceEvent], node: NodeId) -> usize {
    let mut outstanding: BTreeSet<u64> = BTreeSet::new();
    let mut max = 0;
    for ev in events {
        match ev.kind {
            TraceKind::DataSend { node: n, sn, .. } if n == node.0 => {
                outstanding.insert(sn);
                max = max.max(outstanding.len());
            }
            TraceKind::AckRecv { node: n, sn, .. } if n == node.0 => {
                outstanding.retain(|&s| s > sn);
            }
            _ => {}
        }
    }
    max
}

/// Window sizes of `node` in the order they were set.
pub fn window_sizes(events: &[TraceEvent], node: NodeId) -> Vec<usize> {
    events
        .iter()
        .filter_map(|ev| match ev.kind {
            TraceKind::WindowSize { node: n, size } if n == node.0 => Some(size),
            _ => None,
        })
        .collect()
}
