use serde::{Deserialize, Serialize};

/// 记录事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceKind {
    /// 主机把一个 DATA 包交给网卡（retrans 标记是否为重传）
    DataSend { node: usize, sn: u64, retrans: bool },
    /// 接收方回送 ACK
    AckSend { node: usize, sn: u64 },
    /// 发送方处理 ACK；freed 为累计确认从在途表移除的包数
    AckRecv { node: usize, sn: u64, freed: usize },
    /// DATA 包送达目的主机的应用层
    Delivered { node: usize, sn: u64 },
    /// 重传定时器武装
    TimerArmed { node: usize, deadline_ns: u64 },
    /// 定时器标志被清除（已调度的到期事件仍会触发）
    TimerStopped { node: usize },
    /// 到期事件触发且在途表非空；sn 为即将重传的最老序列号
    TimerExpired { node: usize, sn: u64 },
    /// 窗口大小变化（动态窗口的增长与回退）
    WindowSize { node: usize, size: usize },
    /// 网卡队列尾丢弃
    QueueDrop { iface: usize, sn: u64 },
    /// 链路概率丢包
    LinkDrop { link: usize, sn: u64 },
}

/// 一条可回放的事件（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 仿真时间（纳秒，和 `SimTime.0` 同口径）
    pub t_ns: u64,
    #[serde(flatten)]
    pub kind: TraceKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }
}
