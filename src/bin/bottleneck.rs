//! 瓶颈链路上的动态窗口实验
//!
//! 第一跳 5 Mbps、第二跳 500 kbps，路由器出口队列只有 10 个包：
//! 窗口随 ACK 增长，把队列填满后触发尾丢弃，超时又把窗口打回 1。

use clap::Parser;
use relisim_rs::net::{NetWorld, Packet, SendRequest};
use relisim_rs::policy::ReliabilityMode;
use relisim_rs::sim::{ScenarioSpec, SimTime, Simulator};
use relisim_rs::topo::two_hop::{TwoHopOpts, build_two_hop};
use relisim_rs::trace::TraceLogger;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bottleneck", about = "瓶颈拓扑仿真：动态窗口对抗小队列")]
struct Args {
    /// 丢包随机源种子
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// 注入的数据包数量
    #[arg(long, default_value_t = 50)]
    num_packets: u64,

    /// 路由器出口队列容量（包数）
    #[arg(long, default_value_t = 10)]
    queue_pkts: usize,

    /// 仿真运行到多少毫秒；0 表示运行到事件队列为空
    #[arg(long, default_value_t = 0)]
    until_ms: u64,

    /// 输出结构化事件 JSON 文件；不填则不记录
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let spec = ScenarioSpec {
        seed: args.seed,
        mode: ReliabilityMode::DynamicWindow,
        num_packets: args.num_packets,
        r1_bps: 5_000_000,
        r2_bps: 500_000,
        router_queue_pkts: Some(args.queue_pkts),
        ..ScenarioSpec::default()
    };

    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    sim.reset();
    world.net.reseed(spec.seed);
    if args.trace_json.is_some() {
        world.net.trace = Some(TraceLogger::default());
    }

    let opts = TwoHopOpts::from(&spec);
    let topo = build_two_hop(&mut world, &opts).unwrap_or_else(|e| {
        eprintln!("configuration error: {e}");
        std::process::exit(2);
    });

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

    if args.until_ms > 0 {
        sim.run_until(SimTime::from_millis(args.until_ms), &mut world);
    } else {
        sim.run(&mut world);
    }

    if let Some(path) = args.trace_json
        && let Some(tr) = world.net.trace.take()
    {
        let json = serde_json::to_string_pretty(&tr.events).expect("serialize trace events");
        fs::write(&path, json).expect("write trace json");
        eprintln!("wrote trace events to {}", path.display());
    }

    let st = &world.net.stats;
    println!("mode {}", spec.mode);
    println!("delivered_pkts {}", st.delivered_pkts);
    println!("delivered_bytes {}", st.delivered_bytes);
    println!("queue_drops {}", st.queue_drops);
    println!("link_drops {}", st.link_drops);
    println!("retransmissions {}", st.retransmissions);
    println!("acks_sent {}", st.acks_sent);
    println!("final_time_ns {}", sim.now().0);
}
