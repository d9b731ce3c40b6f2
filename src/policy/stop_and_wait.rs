//! 模式二：停等确认（无重传）
//!
//! 窗口固定为 1，每个 DATA 包由接收方按其序列号逐一确认。
//! 发送方从不武装定时器：丢失的包不会被恢复，传输就此停滞。

use super::ReliabilityPolicy;

#[derive(Debug)]
pub struct StopAndWait;

impl ReliabilityPolicy for StopAndWait {
    fn arms_timer(&self) -> bool {
        false
    }

    fn initial_window(&self, _configured: usize) -> usize {
        1
    }
}
