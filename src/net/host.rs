//! 主机节点
//!
//! 主机持有一块网卡和按模式选定的可靠性策略。收发包、定时器、
//! 窗口记账的公共原语在 `policy::HostCtx` 中，策略只做决策。

use super::error::ConfigError;
use super::id::{IfaceId, NodeId};
use super::network::Network;
use super::node::Node;
use super::packet::{Packet, PacketKind};
use crate::policy::{HostCtx, ReliabilityMode, ReliabilityPolicy, SenderState};
use crate::sim::{SimTime, Simulator};
use crate::trace::TraceKind;
use tracing::{debug, info, warn};

/// 主机节点
#[derive(Debug)]
pub struct Host {
    id: NodeId,
    name: String,
    iface: Option<IfaceId>,
    mode: ReliabilityMode,
    policy: Box<dyn ReliabilityPolicy>,
    state: SenderState,
}

impl Host {
    /// 创建新主机。窗口经策略调整（停等类模式固定为 1）。
    pub(crate) fn new(
        id: NodeId,
        name: impl Into<String>,
        mode: ReliabilityMode,
        initial_window: usize,
        timeout: SimTime,
    ) -> Self {
        let policy = mode.policy();
        let window = policy.initial_window(initial_window);
        let state = SenderState::new(window, policy.arms_timer(), timeout);
        Self {
            id,
            name: name.into(),
            iface: None,
            mode,
            policy,
            state,
        }
    }

    pub fn mode(&self) -> ReliabilityMode {
        self.mode
    }

    /// 发送方状态的只读视图
    pub fn state(&self) -> &SenderState {
        &self.state
    }
}

impl Node for Host {
    fn id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self, pkt, sim, net), fields(host = %self.name, %pkt))]
    fn on_packet(&mut self, _iface: IfaceId, pkt: Packet, sim: &mut Simulator, net: &mut Network) {
        let Some(iface) = self.iface else {
            warn!(host = %self.name, "主机无网卡，丢弃到达的数据包");
            return;
        };
        let mut ctx = HostCtx {
            node: self.id,
            name: self.name.as_str(),
            iface,
            state: &mut self.state,
            sim,
            net,
        };
        match pkt.kind {
            PacketKind::Data => self.policy.on_data_received(&mut ctx, pkt),
            PacketKind::Ack => self.policy.on_ack_received(&mut ctx, pkt.sn),
        }
    }

    fn on_timer(&mut self, sim: &mut Simulator, net: &mut Network) {
        // 定时器事件不会被取消：标志已清、在途表已空时它仍会触发，
        // 此时必须是无操作。
        if self.state.in_flight.is_empty() {
            debug!(host = %self.name, "超时事件触发但在途表为空，忽略");
            return;
        }
        let Some(iface) = self.iface else {
            return;
        };
        let oldest = self.state.in_flight[0].sn;
        info!(host = %self.name, sn = oldest, "⏰ 定时器到期");
        net.trace_push(
            sim.now(),
            TraceKind::TimerExpired {
                node: self.id.0,
                sn: oldest,
            },
        );
        let mut ctx = HostCtx {
            node: self.id,
            name: self.name.as_str(),
            iface,
            state: &mut self.state,
            sim,
            net,
        };
        self.policy.on_timeout(&mut ctx);
    }

    fn on_send_request(&mut self, pkts: Vec<Packet>, sim: &mut Simulator, net: &mut Network) {
        let Some(iface) = self.iface else {
            warn!(host = %self.name, "主机无网卡，无法发送");
            return;
        };
        info!(host = %self.name, count = pkts.len(), mode = %self.mode, "提交待发数据包");
        let mut ctx = HostCtx {
            node: self.id,
            name: self.name.as_str(),
            iface,
            state: &mut self.state,
            sim,
            net,
        };
        self.policy.on_send_request(&mut ctx, pkts);
    }

    fn attach_iface(&mut self, iface: IfaceId) -> Result<(), ConfigError> {
        if self.iface.is_some() {
            return Err(ConfigError::HostIfaceTaken);
        }
        self.iface = Some(iface);
        Ok(())
    }
}
