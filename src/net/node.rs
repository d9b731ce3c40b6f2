//! 节点 trait
//!
//! 主机与路由器的公共接口：处理到达的数据包、定时器到期、
//! 流量注入以及装配期的网卡绑定。

use super::error::ConfigError;
use super::id::{IfaceId, NodeId};
use super::network::Network;
use super::packet::Packet;
use crate::sim::Simulator;
use tracing::warn;

/// 节点接口
pub trait Node: Send {
    /// 获取节点标识符
    fn id(&self) -> NodeId;

    /// 获取节点名称
    fn name(&self) -> &str;

    /// 处理经由网卡 `iface` 到达的数据包
    fn on_packet(&mut self, iface: IfaceId, pkt: Packet, sim: &mut Simulator, net: &mut Network);

    /// 重传定时器到期（只有主机关心）
    fn on_timer(&mut self, _sim: &mut Simulator, _net: &mut Network) {}

    /// 场景注入流量的入口（只有主机支持）
    fn on_send_request(&mut self, _pkts: Vec<Packet>, _sim: &mut Simulator, _net: &mut Network) {
        warn!(node = %self.name(), "该节点不支持发起流量");
    }

    /// 装配期：把一个网卡绑定到本节点
    fn attach_iface(&mut self, iface: IfaceId) -> Result<(), ConfigError>;

    /// 装配期：配置转发表项（只有路由器支持）
    fn set_forwarding(&mut self, _from: IfaceId, _to: IfaceId) -> Result<(), ConfigError> {
        Err(ConfigError::NotARouter)
    }
}
