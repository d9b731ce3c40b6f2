//! 场景描述
//!
//! 用 JSON 描述一次可复现的两跳实验：链路参数、两跳速率、
//! 路由器出口队列、可靠性模式、注入的数据包数量与随机种子。

use crate::policy::ReliabilityMode;
use serde::{Deserialize, Serialize};

/// 单条链路的物理参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    /// 链路长度（米）
    #[serde(default = "default_distance_m")]
    pub distance_m: f64,
    /// 传播速度（米/秒）
    #[serde(default = "default_speed_mps")]
    pub speed_mps: f64,
    /// 每包丢失概率，[0,1]
    #[serde(default)]
    pub loss_prob: f64,
}

impl Default for LinkSpec {
    fn default() -> Self {
        Self {
            distance_m: default_distance_m(),
            speed_mps: default_speed_mps(),
            loss_prob: 0.0,
        }
    }
}

/// 一次两跳实验的完整参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// 丢包随机源种子（固定种子 + 相同调用序列 => 完全相同的结果）
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub mode: ReliabilityMode,
    #[serde(default = "default_num_packets")]
    pub num_packets: u64,
    #[serde(default = "default_packet_bytes")]
    pub packet_bytes: u32,
    /// 初始窗口大小（stop-and-wait 模式固定为 1，此值被忽略）
    #[serde(default = "default_window")]
    pub window: usize,
    /// 重传超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
    #[serde(default)]
    pub l1: LinkSpec,
    #[serde(default)]
    pub l2: LinkSpec,
    /// 第一跳速率（bps）
    #[serde(default = "default_r1_bps")]
    pub r1_bps: u64,
    /// 第二跳速率（bps）
    #[serde(default = "default_r2_bps")]
    pub r2_bps: u64,
    /// 路由器出口（第二跳方向）队列容量（包数）；None 表示无界
    #[serde(default = "default_router_queue_pkts")]
    pub router_queue_pkts: Option<usize>,
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            mode: ReliabilityMode::NoReliability,
            num_packets: default_num_packets(),
            packet_bytes: default_packet_bytes(),
            window: default_window(),
            timeout_secs: default_timeout_secs(),
            l1: LinkSpec::default(),
            l2: LinkSpec::default(),
            r1_bps: default_r1_bps(),
            r2_bps: default_r2_bps(),
            router_queue_pkts: default_router_queue_pkts(),
        }
    }
}

fn default_seed() -> u64 {
    2_147_483_611
}

fn default_num_packets() -> u64 {
    10
}

fn default_packet_bytes() -> u32 {
    10
}

fn default_window() -> usize {
    1
}

fn default_timeout_secs() -> f64 {
    0.5
}

fn default_distance_m() -> f64 {
    1_000.0
}

fn default_speed_mps() -> f64 {
    2e8
}

fn default_r1_bps() -> u64 {
    1_000_000
}

fn default_r2_bps() -> u64 {
    500_000
}

fn default_router_queue_pkts() -> Option<usize> {
    Some(20)
}
