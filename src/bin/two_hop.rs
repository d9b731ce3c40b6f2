//! 两跳可靠性传输实验
//!
//! 运行一次参数化的两跳仿真：A —(L1)— R —(L2)— B，
//! 可选五种可靠性模式、两条链路的丢包率、两跳速率与路由器队列容量。

use clap::Parser;
use relisim_rs::net::{NetWorld, Packet, SendRequest};
use relisim_rs::policy::ReliabilityMode;
use relisim_rs::sim::{ScenarioSpec, SimTime, Simulator};
use relisim_rs::topo::two_hop::{TwoHopOpts, build_two_hop};
use relisim_rs::trace::TraceLogger;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "two-hop", about = "两跳拓扑仿真：A -> R -> B，五种可靠性模式")]
struct Args {
    /// 可靠性模式（no_reliability / stop_and_wait / stop_and_wait_retransmit /
    /// fixed_window / dynamic_window）
    #[arg(long, default_value_t = ReliabilityMode::NoReliability)]
    mode: ReliabilityMode,

    /// 丢包随机源种子
    #[arg(long, default_value_t = 2_147_483_611)]
    seed: u64,

    /// 注入的数据包数量
    #[arg(long, default_value_t = 10)]
    num_packets: u64,

    /// 每个数据包的大小（字节）
    #[arg(long, default_value_t = 10)]
    packet_bytes: u32,

    /// 初始窗口大小（停等类模式固定为 1）
    #[arg(long, default_value_t = 1)]
    window: usize,

    /// 重传超时（秒）
    #[arg(long, default_value_t = 0.5)]
    timeout_secs: f64,

    /// 第一条链路的丢包率
    #[arg(long, default_value_t = 0.0)]
    loss_l1: f64,

    /// 第二条链路的丢包率
    #[arg(long, default_value_t = 0.0)]
    loss_l2: f64,

    /// 链路长度（米，两条链路相同）
    #[arg(long, default_value_t = 1_000.0)]
    distance_m: f64,

    /// 传播速度（米/秒）
    #[arg(long, default_value_t = 2e8)]
    speed_mps: f64,

    /// 第一跳速率（bps）
    #[arg(long, default_value_t = 1_000_000)]
    r1_bps: u64,

    /// 第二跳速率（bps）
    #[arg(long, default_value_t = 500_000)]
    r2_bps: u64,

    /// 路由器出口队列容量（包数）；0 表示无界
    #[arg(long, default_value_t = 20)]
    queue_pkts: u64,

    /// 仿真运行到多少毫秒；0 表示运行到事件队列为空
    #[arg(long, default_value_t = 0)]
    until_ms: u64,

    /// 从 JSON 文件加载场景（忽略上面的拓扑/模式参数）
    #[arg(long)]
    scenario_json: Option<PathBuf>,

    /// 输出结构化事件 JSON 文件；不填则不记录
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

impl Args {
    fn scenario(&self) -> ScenarioSpec {
        if let Some(path) = &self.scenario_json {
            let text = fs::read_to_string(path).expect("read scenario json");
            return serde_json::from_str(&text).expect("parse scenario json");
        }
        let mut spec = ScenarioSpec {
            mode: self.mode,
            seed: self.seed,
            num_packets: self.num_packets,
            packet_bytes: self.packet_bytes,
            window: self.window,
            timeout_secs: self.timeout_secs,
            r1_bps: self.r1_bps,
            r2_bps: self.r2_bps,
            router_queue_pkts: (self.queue_pkts > 0).then_some(self.queue_pkts as usize),
            ..ScenarioSpec::default()
        };
        spec.l1.distance_m = self.distance_m;
        spec.l1.speed_mps = self.speed_mps;
        spec.l1.loss_prob = self.loss_l1;
        spec.l2.distance_m = self.distance_m;
        spec.l2.speed_mps = self.speed_mps;
        spec.l2.loss_prob = self.loss_l2;
        spec
    }
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
    let spec = args.scenario();

    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    // 场景开始前的生命周期：清空事件队列、重置随机源
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
