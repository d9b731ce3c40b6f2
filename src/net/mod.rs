//! 网络模拟模块
//!
//! 此模块包含网络模拟的核心组件：数据包、链路、网卡、主机、路由器与拓扑。

// 子模块声明
mod deliver_packet;
mod error;
mod host;
mod id;
mod iface;
mod link;
mod net_world;
mod network;
mod node;
mod packet;
mod retransmit_timeout;
mod router;
mod send_request;
mod stats;
mod tx_complete;

// 重新导出公共接口
pub use deliver_packet::DeliverPacket;
pub use error::ConfigError;
pub use host::Host;
pub use id::{IfaceId, LinkId, NodeId};
pub use iface::Iface;
pub use link::Link;
pub use net_world::NetWorld;
pub use network::Network;
pub use node::Node;
pub use packet::{Packet, PacketKind, ACK_BYTES};
pub use retransmit_timeout::RetransmitTimeout;
pub use router::Router;
pub use send_request::SendRequest;
pub use stats::Stats;
pub use tx_complete::TxComplete;
