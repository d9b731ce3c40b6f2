//! 网络拓扑管理
//!
//! 持有全部节点、网卡与链路，负责装配期校验、网卡序列化/排队、
//! 链路传播与概率丢包，以及统计与结构化事件记录。
//! 丢包随机源由 Network 显式持有并用固定种子初始化，
//! 不依赖任何进程级隐式状态。

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::deliver_packet::DeliverPacket;
use super::error::ConfigError;
use super::host::Host;
use super::id::{IfaceId, LinkId, NodeId};
use super::iface::Iface;
use super::link::Link;
use super::node::Node;
use super::packet::Packet;
use super::router::Router;
use super::stats::Stats;
use super::tx_complete::TxComplete;
use crate::policy::{DEFAULT_TIMEOUT, ReliabilityMode};
use crate::sim::{SimTime, Simulator};
use crate::trace::{TraceEvent, TraceKind, TraceLogger};

/// 网络拓扑
pub struct Network {
    nodes: Vec<Option<Box<dyn Node>>>,
    ifaces: Vec<Iface>,
    links: Vec<Link>,
    rng: SmallRng,
    pub stats: Stats,
    /// 结构化事件记录；None 表示关闭
    pub trace: Option<TraceLogger>,
}

impl Default for Network {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Network {
    /// 用指定种子创建网络（确定性契约的入口）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            ifaces: Vec::new(),
            links: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            stats: Stats::default(),
            trace: None,
        }
    }

    /// 重置丢包随机源（场景开始前调用）
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
        debug!(seed, "随机源已重置");
    }

    /// 添加主机节点（窗口 1、默认超时）
    pub fn add_host(&mut self, name: impl Into<String>, mode: ReliabilityMode) -> NodeId {
        self.add_host_with(name, mode, 1, DEFAULT_TIMEOUT)
            .expect("window >= 1")
    }

    /// 添加主机节点，带初始窗口与重传超时
    pub fn add_host_with(
        &mut self,
        name: impl Into<String>,
        mode: ReliabilityMode,
        initial_window: usize,
        timeout: SimTime,
    ) -> Result<NodeId, ConfigError> {
        if initial_window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Some(Box::new(Host::new(id, name, mode, initial_window, timeout))));
        Ok(id)
    }

    /// 添加路由器节点
    pub fn add_router(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Box::new(Router::new(id, name))));
        id
    }

    /// 添加网卡；queue_pkts 为 None 表示无界队列
    pub fn add_iface(
        &mut self,
        name: impl Into<String>,
        bandwidth_bps: u64,
        queue_pkts: Option<usize>,
    ) -> Result<IfaceId, ConfigError> {
        let id = IfaceId(self.ifaces.len());
        self.ifaces.push(Iface::new(name, bandwidth_bps, queue_pkts)?);
        Ok(id)
    }

    /// 添加链路；物理参数在 Link::new 中校验
    pub fn add_link(
        &mut self,
        name: impl Into<String>,
        distance_m: f64,
        speed_mps: f64,
        loss_prob: f64,
    ) -> Result<LinkId, ConfigError> {
        let id = LinkId(self.links.len());
        self.links
            .push(Link::new(name, distance_m, speed_mps, loss_prob)?);
        Ok(id)
    }

    /// 装配：把网卡接到链路的一个端点上
    pub fn attach(&mut self, iface: IfaceId, link: LinkId) -> Result<(), ConfigError> {
        if iface.0 >= self.ifaces.len() {
            return Err(ConfigError::UnknownIface(iface));
        }
        if link.0 >= self.links.len() {
            return Err(ConfigError::UnknownLink(link));
        }
        if self.ifaces[iface.0].link.is_some() {
            return Err(ConfigError::IfaceAlreadyAttached(iface));
        }
        if !self.links[link.0].attach_endpoint(iface) {
            return Err(ConfigError::LinkFull(link));
        }
        self.ifaces[iface.0].link = Some(link);
        Ok(())
    }

    /// 装配：把网卡绑定到拥有它的节点上
    pub fn bind(&mut self, iface: IfaceId, node: NodeId) -> Result<(), ConfigError> {
        if iface.0 >= self.ifaces.len() {
            return Err(ConfigError::UnknownIface(iface));
        }
        if node.0 >= self.nodes.len() {
            return Err(ConfigError::UnknownNode(node));
        }
        if self.ifaces[iface.0].owner.is_some() {
            return Err(ConfigError::IfaceAlreadyBound(iface));
        }
        self.nodes[node.0]
            .as_mut()
            .ok_or(ConfigError::UnknownNode(node))?
            .attach_iface(iface)?;
        self.ifaces[iface.0].owner = Some(node);
        Ok(())
    }

    /// 装配：配置路由器转发表项
    pub fn set_forwarding(
        &mut self,
        router: NodeId,
        from: IfaceId,
        to: IfaceId,
    ) -> Result<(), ConfigError> {
        if from.0 >= self.ifaces.len() {
            return Err(ConfigError::UnknownIface(from));
        }
        if to.0 >= self.ifaces.len() {
            return Err(ConfigError::UnknownIface(to));
        }
        self.nodes[router.0]
            .as_mut()
            .ok_or(ConfigError::UnknownNode(router))?
            .set_forwarding(from, to)
    }

    /// 场景注入流量的唯一入口
    #[tracing::instrument(skip(self, pkts, sim), fields(node = ?node, count = pkts.len()))]
    pub fn host_send(&mut self, node: NodeId, pkts: Vec<Packet>, sim: &mut Simulator) {
        let mut n = self.nodes[node.0].take().expect("node exists");
        n.on_send_request(pkts, sim, self);
        self.nodes[node.0] = Some(n);
    }

    /// 网卡发送：空闲则立即开始序列化，忙碌则排队（满则尾丢弃）
    pub fn iface_send(&mut self, iface: IfaceId, pkt: Packet, sim: &mut Simulator) {
        let busy = self.ifaces[iface.0].tx_busy;
        if busy {
            match self.ifaces[iface.0].queue.enqueue(pkt) {
                Ok(()) => {
                    let ifc = &self.ifaces[iface.0];
                    debug!(
                        iface = %ifc.name,
                        queued = ifc.queue.len(),
                        capacity = ?ifc.queue.capacity(),
                        "网卡忙，入队"
                    );
                }
                Err(pkt) => {
                    info!(iface = %self.ifaces[iface.0].name, %pkt, "🗑️  队列已满，尾丢弃");
                    self.stats.queue_drops += 1;
                    self.trace_push(
                        sim.now(),
                        TraceKind::QueueDrop {
                            iface: iface.0,
                            sn: pkt.sn,
                        },
                    );
                }
            }
        } else {
            let tx = self.ifaces[iface.0].tx_time(pkt.size_bytes);
            self.ifaces[iface.0].tx_busy = true;
            trace!(iface = %self.ifaces[iface.0].name, tx_ns = tx.0, %pkt, "开始序列化");
            sim.schedule_after(tx, TxComplete { iface, pkt });
        }
    }

    /// 序列化完成：把包交给链路，然后背靠背开始下一个
    pub(crate) fn on_tx_complete(&mut self, iface: IfaceId, pkt: Packet, sim: &mut Simulator) {
        match self.ifaces[iface.0].link {
            Some(link) => self.link_transmit(link, iface, pkt, sim),
            None => warn!(iface = %self.ifaces[iface.0].name, "网卡未接链路，丢弃数据包"),
        }
        match self.ifaces[iface.0].queue.dequeue() {
            Some(next) => {
                let tx = self.ifaces[iface.0].tx_time(next.size_bytes);
                trace!(iface = %self.ifaces[iface.0].name, tx_ns = tx.0, %next, "继续序列化下一个包");
                sim.schedule_after(tx, TxComplete { iface, pkt: next });
            }
            None => self.ifaces[iface.0].tx_busy = false,
        }
    }

    /// 链路传输：先做丢包判定，存活则在传播时延后到达对端网卡
    fn link_transmit(&mut self, link: LinkId, from: IfaceId, pkt: Packet, sim: &mut Simulator) {
        let draw: f64 = self.rng.random();
        let l = &self.links[link.0];
        if draw < l.loss_prob {
            info!(link = %l.name, %pkt, "💥 链路丢包");
            self.stats.link_drops += 1;
            self.trace_push(
                sim.now(),
                TraceKind::LinkDrop {
                    link: link.0,
                    sn: pkt.sn,
                },
            );
            return;
        }
        let Some(peer) = l.peer_of(from) else {
            warn!(link = %l.name, "链路端点缺失，丢弃数据包");
            return;
        };
        let delay = l.prop_delay;
        trace!(link = %self.links[link.0].name, delay_ns = delay.0, "调度到达事件");
        sim.schedule_after(delay, DeliverPacket { iface: peer, pkt });
    }

    /// 到达：把包交给网卡的属主节点处理（接收不引入附加时延）
    pub(crate) fn deliver(&mut self, iface: IfaceId, pkt: Packet, sim: &mut Simulator) {
        let Some(owner) = self.ifaces[iface.0].owner else {
            warn!(iface = %self.ifaces[iface.0].name, "网卡未绑定节点，丢弃数据包");
            return;
        };
        // 暂时把节点取出来，避免 &mut self 与 &mut node 的重叠借用。
        let mut node = self.nodes[owner.0].take().expect("node exists");
        node.on_packet(iface, pkt, sim, self);
        self.nodes[owner.0] = Some(node);
    }

    /// 定时器到期事件的分发
    pub(crate) fn deliver_timer(&mut self, node: NodeId, sim: &mut Simulator) {
        let mut n = self.nodes[node.0].take().expect("node exists");
        n.on_timer(sim, self);
        self.nodes[node.0] = Some(n);
    }

    /// 数据包送达目的主机应用层时的处理
    pub(crate) fn on_delivered(&mut self, node: NodeId, pkt: &Packet, sim: &Simulator) {
        info!(node = ?node, %pkt, "✅ 数据包送达应用层");
        self.stats.delivered_pkts += 1;
        self.stats.delivered_bytes += pkt.size_bytes as u64;
        self.trace_push(
            sim.now(),
            TraceKind::Delivered {
                node: node.0,
                sn: pkt.sn,
            },
        );
    }

    /// 追加一条结构化记录（记录关闭时为空操作）
    pub(crate) fn trace_push(&mut self, t: SimTime, kind: TraceKind) {
        if let Some(tr) = self.trace.as_mut() {
            tr.push(TraceEvent { t_ns: t.0, kind });
        }
    }
}
