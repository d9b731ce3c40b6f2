//! 数据包到达事件
//!
//! 传播时延结束后在对端网卡触发。

use super::id::IfaceId;
use super::net_world::NetWorld;
use super::packet::Packet;
use crate::sim::{Event, Simulator, World};
use tracing::debug;

/// 事件：一个 packet 到达网卡，交给属主节点处理。
#[derive(Debug)]
pub struct DeliverPacket {
    pub iface: IfaceId,
    pub pkt: Packet,
}

impl Event for DeliverPacket {
    #[tracing::instrument(skip(self, sim, world), fields(iface = ?self.iface, pkt = %self.pkt))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DeliverPacket { iface, pkt } = *self;

        debug!(now = ?sim.now(), "📨 数据包到达网卡");

        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.deliver(iface, pkt, sim);
    }
}
