//! 路由器节点
//!
//! 按固定转发表把入方向网卡映射到出方向网卡；恰好两块网卡时
//! 隐式转发到"另一块"。不检查包内容，不做网卡层之外的缓冲。

use std::collections::HashMap;

use super::error::ConfigError;
use super::id::{IfaceId, NodeId};
use super::network::Network;
use super::node::Node;
use super::packet::Packet;
use crate::sim::Simulator;
use tracing::{debug, warn};

/// 路由器节点
#[derive(Debug)]
pub struct Router {
    id: NodeId,
    name: String,
    ifaces: Vec<IfaceId>,
    forward: HashMap<IfaceId, IfaceId>,
}

impl Router {
    /// 创建新路由器
    pub(crate) fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ifaces: Vec::new(),
            forward: HashMap::new(),
        }
    }

    /// 入方向网卡对应的出方向网卡
    fn egress_for(&self, ingress: IfaceId) -> Option<IfaceId> {
        self.forward.get(&ingress).copied().or_else(|| {
            // 双网卡路由器无需显式转发表
            if self.ifaces.len() == 2 {
                self.ifaces.iter().copied().find(|&i| i != ingress)
            } else {
                None
            }
        })
    }
}

impl Node for Router {
    fn id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self, pkt, sim, net), fields(router = %self.name, %pkt))]
    fn on_packet(&mut self, iface: IfaceId, pkt: Packet, sim: &mut Simulator, net: &mut Network) {
        match self.egress_for(iface) {
            Some(out) => {
                debug!(router = %self.name, ingress = ?iface, egress = ?out, "🔀 转发数据包");
                net.iface_send(out, pkt, sim);
            }
            None => {
                warn!(router = %self.name, ingress = ?iface, "无转发表项，丢弃数据包");
            }
        }
    }

    fn attach_iface(&mut self, iface: IfaceId) -> Result<(), ConfigError> {
        self.ifaces.push(iface);
        Ok(())
    }

    fn set_forwarding(&mut self, from: IfaceId, to: IfaceId) -> Result<(), ConfigError> {
        if !self.ifaces.contains(&from) {
            return Err(ConfigError::IfaceNotOnRouter(from));
        }
        if !self.ifaces.contains(&to) {
            return Err(ConfigError::IfaceNotOnRouter(to));
        }
        self.forward.insert(from, to);
        Ok(())
    }
}
