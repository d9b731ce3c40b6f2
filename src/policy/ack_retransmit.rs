//! 模式三：停等确认 + 超时重传
//!
//! 与停等模式相同，但每次发送都会确保定时器武装；超时后重传
//! 唯一的未确认包并重新武装。

use super::ReliabilityPolicy;

#[derive(Debug)]
pub struct AckRetransmit;

impl ReliabilityPolicy for AckRetransmit {
    fn initial_window(&self, _configured: usize) -> usize {
        1
    }
}
