use super::util::{delivered_sns, events, run_scenario, window_sizes};
use crate::policy::ReliabilityMode;
use crate::sim::{ScenarioSpec, SimTime};
use crate::trace::TraceKind;

/// Lossless: the window grows by exactly 1 per processed ACK, nothing else
/// ever changes it.
#[test]
fn window_grows_by_one_per_ack() {
    let spec = ScenarioSpec {
        mode: ReliabilityMode::DynamicWindow,
        window: 1,
        num_packets: 10,
        ..ScenarioSpec::default()
    };
    let (_sim, world, topo) = run_scenario(&spec, None);

    assert_eq!(delivered_sns(&world, topo.host_b), (1..=10).collect::<Vec<_>>());
    assert_eq!(
        window_sizes(events(&world), topo.host_a),
        (2..=11).collect::<Vec<_>>()
    );
}

/// Deterministic tail drop (queue of 1, three packets in one burst): the
/// timeout that recovers SN=3 also resets the window to exactly 1, after
/// which the final ACK grows it again.
#[test]
fn timeout_resets_window_to_one() {
    let spec = ScenarioSpec {
        mode: ReliabilityMode::DynamicWindow,
        window: 3,
        num_packets: 3,
        packet_bytes: 100,
        r1_bps: 1_000_000,
        r2_bps: 100_000,
        router_queue_pkts: Some(1),
        ..ScenarioSpec::default()
    };
    let (_sim, world, topo) = run_scenario(&spec, None);

    assert_eq!(world.net.stats.queue_drops, 1);
    assert_eq!(world.net.stats.retransmissions, 1);
    assert_eq!(delivered_sns(&world, topo.host_b), vec![1, 2, 3]);

    // ACK(1)、ACK(2) 先把窗口从 3 撑到 5；超时回落到 1；ACK(3) 再涨到 2
    assert_eq!(window_sizes(events(&world), topo.host_a), vec![4, 5, 1, 2]);

    // 回落恰好发生在超时事件之后
    let evs = events(&world);
    let expired = evs
        .iter()
        .position(|ev| matches!(ev.kind, TraceKind::TimerExpired { node, .. } if node == topo.host_a.0))
        .expect("timeout fired");
    let reset = evs
        .iter()
        .position(
            |ev| matches!(ev.kind, TraceKind::WindowSize { node, size: 1 } if node == topo.host_a.0),
        )
        .expect("window reset");
    assert!(expired < reset);
}

/// The bottleneck experiment: window inflation against a 10-packet queue on a
/// 5 Mbps -> 500 kbps path must overflow the queue sooner or later.
#[test]
fn bottleneck_queue_overflows_under_window_inflation() {
    let spec = ScenarioSpec {
        seed: 42,
        mode: ReliabilityMode::DynamicWindow,
        window: 1,
        num_packets: 50,
        r1_bps: 5_000_000,
        r2_bps: 500_000,
        router_queue_pkts: Some(10),
        ..ScenarioSpec::default()
    };
    // 有界运行兜底：即便有尾丢包反复重传也能返回
    let (_sim, world, topo) = run_scenario(&spec, Some(SimTime::from_secs(60)));

    assert!(world.net.stats.queue_drops > 0, "queue never overflowed");
    assert!(world.net.stats.delivered_pkts > 0);

    let sizes = window_sizes(events(&world), topo.host_a);
    let max_window = sizes.iter().copied().max().unwrap_or(0);
    assert!(max_window > 4, "window never inflated: max {max_window}");
}
