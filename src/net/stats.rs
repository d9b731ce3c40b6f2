//! 统计信息
//!
//! 定义网络仿真统计数据结构。

/// 网络统计信息
#[derive(Debug, Default)]
pub struct Stats {
    pub delivered_pkts: u64,
    pub delivered_bytes: u64,
    /// 网卡队列尾丢弃的包数
    pub queue_drops: u64,
    /// 链路概率丢包数
    pub link_drops: u64,
    pub retransmissions: u64,
    pub acks_sent: u64,
}
