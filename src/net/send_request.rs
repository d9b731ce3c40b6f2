//! 流量注入事件
//!
//! 场景在 t=0（或任意时刻）把一批有序数据包交给主机发送，
//! 保证一切执行都发生在事件回调内。

use super::id::NodeId;
use super::net_world::NetWorld;
use super::packet::Packet;
use crate::sim::{Event, Simulator, World};

/// 事件：向主机提交一批待发送的数据包。
#[derive(Debug)]
pub struct SendRequest {
    pub node: NodeId,
    pub pkts: Vec<Packet>,
}

impl Event for SendRequest {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let SendRequest { node, pkts } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.host_send(node, pkts, sim);
    }
}
