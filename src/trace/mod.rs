//! 结构化事件记录（供测试断言与离线分析）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：存内存，仿真结束可整体写出
//! - **可断言**：定时器武装/到期、累计确认释放数、重传、窗口变化
//!   等关键事实都以事件形式出现，测试不依赖日志文本

mod types;

pub use types::{TraceEvent, TraceKind, TraceLogger};
