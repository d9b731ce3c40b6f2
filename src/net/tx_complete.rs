//! 序列化完成事件（用于驱动网卡出队）

use super::id::IfaceId;
use super::net_world::NetWorld;
use super::packet::Packet;
use crate::sim::{Event, Simulator, World};

/// 事件：网卡完成一个包的序列化，把它交给链路并尝试发送队列中的下一个。
#[derive(Debug)]
pub struct TxComplete {
    pub iface: IfaceId,
    pub pkt: Packet,
}

impl Event for TxComplete {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TxComplete { iface, pkt } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.on_tx_complete(iface, pkt, sim);
    }
}
