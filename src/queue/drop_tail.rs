//! DropTail（尾丢弃）队列
//!
//! 当队列已满时，直接丢弃新到达的 packet，而不是挤掉已有条目。

use std::collections::VecDeque;

use crate::net::Packet;

use super::PacketQueue;

#[derive(Debug)]
pub struct DropTailQueue {
    max_pkts: Option<usize>,
    q: VecDeque<Packet>,
}

impl DropTailQueue {
    /// 容量受限的队列（按包数）
    pub fn bounded(max_pkts: usize) -> Self {
        Self {
            max_pkts: Some(max_pkts),
            q: VecDeque::new(),
        }
    }

    /// 无界队列
    pub fn unbounded() -> Self {
        Self {
            max_pkts: None,
            q: VecDeque::new(),
        }
    }
}

impl PacketQueue for DropTailQueue {
    fn enqueue(&mut self, pkt: Packet) -> Result<(), Packet> {
        if let Some(cap) = self.max_pkts
            && self.q.len() >= cap
        {
            return Err(pkt);
        }
        self.q.push_back(pkt);
        Ok(())
    }

    fn dequeue(&mut self) -> Option<Packet> {
        self.q.pop_front()
    }

    fn len(&self) -> usize {
        self.q.len()
    }

    fn capacity(&self) -> Option<usize> {
        self.max_pkts
    }
}
