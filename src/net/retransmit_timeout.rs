//! 重传定时器到期事件
//!
//! 没有取消原语：stop_timer 只清标志，事件照常触发，
//! 由主机在处理时重新检查在途状态。

use super::id::NodeId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：主机的重传定时器到期。
#[derive(Debug)]
pub struct RetransmitTimeout {
    pub node: NodeId,
}

impl Event for RetransmitTimeout {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let RetransmitTimeout { node } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.deliver_timer(node, sim);
    }
}
