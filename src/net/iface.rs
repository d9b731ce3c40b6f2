//! 网卡（接口）类型
//!
//! 网卡负责序列化时延与出方向排队：发送一个包需要
//! `size_bytes * 8 / bandwidth` 的虚拟时间；忙碌期间到达的包进入
//! 尾丢弃队列。接收方向不产生任何附加时延。

use super::error::ConfigError;
use super::id::{LinkId, NodeId};
use crate::queue::{DropTailQueue, PacketQueue};
use crate::sim::SimTime;

/// 网卡：绑定到一个节点，连接到一条链路
#[derive(Debug)]
pub struct Iface {
    pub name: String,
    pub bandwidth_bps: u64,
    /// 出方向队列（容量为包数；None 表示无界）
    pub(crate) queue: Box<dyn PacketQueue>,
    /// 正在序列化一个包
    pub(crate) tx_busy: bool,
    pub(crate) link: Option<LinkId>,
    pub(crate) owner: Option<NodeId>,
}

impl Iface {
    /// 创建新网卡；带宽为零在此处即拒绝。
    pub fn new(
        name: impl Into<String>,
        bandwidth_bps: u64,
        queue_pkts: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if bandwidth_bps == 0 {
            return Err(ConfigError::ZeroBandwidth);
        }
        let queue: Box<dyn PacketQueue> = match queue_pkts {
            Some(cap) => Box::new(DropTailQueue::bounded(cap)),
            None => Box::new(DropTailQueue::unbounded()),
        };
        Ok(Self {
            name: name.into(),
            bandwidth_bps,
            queue,
            tx_busy: false,
            link: None,
            owner: None,
        })
    }

    /// 序列化 `bytes` 字节所需的时间（向上取整到纳秒）
    pub(crate) fn tx_time(&self, bytes: u32) -> SimTime {
        let bits = (bytes as u128).saturating_mul(8);
        let nanos = (bits.saturating_mul(1_000_000_000u128) + (self.bandwidth_bps as u128 - 1))
            / self.bandwidth_bps as u128;
        SimTime(nanos.min(u64::MAX as u128) as u64)
    }
}
