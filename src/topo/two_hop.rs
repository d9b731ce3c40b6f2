//! 两跳拓扑构建
//!
//! 拓扑结构：A —(L1)— R —(L2)— B。
//! A 经第一跳（速率 r1）发往路由器，路由器经第二跳（速率 r2，
//! 出口队列可设上限）发往 B；两台主机运行相同的可靠性模式。

use crate::net::{ConfigError, IfaceId, LinkId, NetWorld, NodeId};
use crate::policy::ReliabilityMode;
use crate::sim::{LinkSpec, ScenarioSpec, SimTime};

/// 两跳拓扑配置选项
#[derive(Debug, Clone)]
pub struct TwoHopOpts {
    pub mode: ReliabilityMode,
    /// 初始窗口（停等类模式下被固定为 1）
    pub window: usize,
    pub timeout: SimTime,
    pub l1: LinkSpec,
    pub l2: LinkSpec,
    /// 第一跳速率（bps）
    pub r1_bps: u64,
    /// 第二跳速率（bps）
    pub r2_bps: u64,
    /// 路由器出口（通往 B）队列容量；None 表示无界
    pub router_queue_pkts: Option<usize>,
}

impl Default for TwoHopOpts {
    fn default() -> Self {
        Self::from(&ScenarioSpec::default())
    }
}

impl From<&ScenarioSpec> for TwoHopOpts {
    fn from(spec: &ScenarioSpec) -> Self {
        Self {
            mode: spec.mode,
            window: spec.window,
            timeout: SimTime::from_secs_f64(spec.timeout_secs),
            l1: spec.l1.clone(),
            l2: spec.l2.clone(),
            r1_bps: spec.r1_bps,
            r2_bps: spec.r2_bps,
            router_queue_pkts: spec.router_queue_pkts,
        }
    }
}

/// 构建结果：各节点与链路的标识符
#[derive(Debug, Clone, Copy)]
pub struct TwoHop {
    pub host_a: NodeId,
    pub host_b: NodeId,
    pub router: NodeId,
    pub l1: LinkId,
    pub l2: LinkId,
    pub nic_a: IfaceId,
    pub nic_b: IfaceId,
}

/// 构建两跳拓扑
pub fn build_two_hop(world: &mut NetWorld, opts: &TwoHopOpts) -> Result<TwoHop, ConfigError> {
    let net = &mut world.net;

    let host_a = net.add_host_with("A", opts.mode, opts.window, opts.timeout)?;
    let host_b = net.add_host_with("B", opts.mode, opts.window, opts.timeout)?;
    let router = net.add_router("R");

    let nic_a = net.add_iface("A:eth0", opts.r1_bps, None)?;
    let nic_b = net.add_iface("B:eth0", opts.r2_bps, None)?;
    let r_eth0 = net.add_iface("R:eth0", opts.r1_bps, None)?;
    let r_eth1 = net.add_iface("R:eth1", opts.r2_bps, opts.router_queue_pkts)?;

    let l1 = net.add_link("L1", opts.l1.distance_m, opts.l1.speed_mps, opts.l1.loss_prob)?;
    let l2 = net.add_link("L2", opts.l2.distance_m, opts.l2.speed_mps, opts.l2.loss_prob)?;

    net.bind(nic_a, host_a)?;
    net.bind(nic_b, host_b)?;
    net.bind(r_eth0, router)?;
    net.bind(r_eth1, router)?;

    net.attach(nic_a, l1)?;
    net.attach(r_eth0, l1)?;
    net.attach(r_eth1, l2)?;
    net.attach(nic_b, l2)?;

    net.set_forwarding(router, r_eth0, r_eth1)?;
    net.set_forwarding(router, r_eth1, r_eth0)?;

    Ok(TwoHop {
        host_a,
        host_b,
        router,
        l1,
        l2,
        nic_a,
        nic_b,
    })
}
