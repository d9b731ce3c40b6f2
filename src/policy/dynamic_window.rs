//! 模式五：动态窗口流水线
//!
//! 与固定窗口相同，另加：每处理一个 ACK 窗口加一（无上限），
//! 超时重传时窗口回退到 1。

use super::{HostCtx, ReliabilityPolicy};

#[derive(Debug)]
pub struct DynamicWindow;

impl ReliabilityPolicy for DynamicWindow {
    fn after_ack(&self, ctx: &mut HostCtx<'_>) {
        let grown = ctx.state.window_size + 1;
        ctx.set_window(grown);
    }

    fn after_timeout(&self, ctx: &mut HostCtx<'_>) {
        ctx.set_window(1);
    }
}
