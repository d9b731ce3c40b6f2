//! 模式一：无可靠性
//!
//! 包直接交给网卡，不等 ACK、不武装定时器、不维护窗口。
//! 作为接收方也不产生 ACK；作为发送方收到 ACK 时直接忽略。

use tracing::debug;

use super::{HostCtx, ReliabilityPolicy};
use crate::net::Packet;

#[derive(Debug)]
pub struct NoReliability;

impl ReliabilityPolicy for NoReliability {
    fn arms_timer(&self) -> bool {
        false
    }

    fn initial_window(&self, _configured: usize) -> usize {
        1
    }

    fn on_send_request(&self, ctx: &mut HostCtx<'_>, pkts: Vec<Packet>) {
        for pkt in pkts {
            ctx.raw_send(pkt);
        }
    }

    fn on_data_received(&self, ctx: &mut HostCtx<'_>, pkt: Packet) {
        ctx.deliver(&pkt);
    }

    fn on_ack_received(&self, ctx: &mut HostCtx<'_>, sn: u64) {
        debug!(host = %ctx.name, sn, "无可靠性模式：忽略 ACK");
    }

    fn on_timeout(&self, _ctx: &mut HostCtx<'_>) {
        // 从不武装定时器，正常情况下不会到达这里
    }
}
