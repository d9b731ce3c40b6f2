//! 队列策略（Queue disciplines）
//!
//! 网卡出方向使用的 FIFO 队列抽象。目前提供 DropTail（尾丢弃）实现，
//! 容量按包数计，后续可在此扩展其他策略。

use crate::net::Packet;

mod drop_tail;

pub use drop_tail::DropTailQueue;

/// Packet 队列抽象
pub trait PacketQueue: std::fmt::Debug + Send {
    /// 入队：成功返回 Ok；若被丢弃则返回 Err(pkt)
    fn enqueue(&mut self, pkt: Packet) -> Result<(), Packet>;
    /// 出队：按队列策略返回下一个 packet
    fn dequeue(&mut self) -> Option<Packet>;

    fn len(&self) -> usize;
    /// 容量（包数）；None 表示无界
    fn capacity(&self) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
