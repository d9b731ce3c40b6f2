//! 数据包类型
//!
//! 定义网络数据包及其相关操作。

/// ACK 包的固定大小（字节）
pub const ACK_BYTES: u32 = 1;

/// 数据包类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    Data,
    Ack,
}

/// 网络数据包。内容不可变；重传复用在途表中保存的原始条目。
#[derive(Debug, Clone)]
pub struct Packet {
    pub kind: PacketKind,
    /// 序列号
    pub sn: u64,
    pub size_bytes: u32,
}

impl Packet {
    /// 创建数据包
    pub fn data(sn: u64, size_bytes: u32) -> Self {
        Self {
            kind: PacketKind::Data,
            sn,
            size_bytes,
        }
    }

    /// 创建针对序列号 `sn` 的确认包
    pub fn ack(sn: u64) -> Self {
        Self {
            kind: PacketKind::Ack,
            sn,
            size_bytes: ACK_BYTES,
        }
    }

    pub fn is_data(&self) -> bool {
        self.kind == PacketKind::Data
    }
}

impl std::fmt::Display for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            PacketKind::Data => write!(f, "DATA(SN={}, {}B)", self.sn, self.size_bytes),
            PacketKind::Ack => write!(f, "ACK(SN={})", self.sn),
        }
    }
}
