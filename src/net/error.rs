//! Configuration and wiring errors.
//!
//! Everything here is rejected eagerly, before a run starts. Runtime conditions
//! (queue overflow, link loss, stale timers) are never errors.

use super::id::{IfaceId, LinkId, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("interface bandwidth must be positive")]
    ZeroBandwidth,

    #[error("link speed must be positive and finite, got {0}")]
    BadSpeed(f64),

    #[error("link distance must be non-negative and finite, got {0}")]
    BadDistance(f64),

    #[error("loss probability {0} outside [0, 1]")]
    LossProbOutOfRange(f64),

    #[error("window size must be at least 1")]
    ZeroWindow,

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("unknown interface {0:?}")]
    UnknownIface(IfaceId),

    #[error("unknown link {0:?}")]
    UnknownLink(LinkId),

    #[error("interface {0:?} already attached to a link")]
    IfaceAlreadyAttached(IfaceId),

    #[error("link {0:?} already has both endpoints")]
    LinkFull(LinkId),

    #[error("interface {0:?} already bound to a node")]
    IfaceAlreadyBound(IfaceId),

    #[error("host already owns an interface")]
    HostIfaceTaken,

    #[error("node is not a router")]
    NotARouter,

    #[error("interface {0:?} is not bound to this router")]
    IfaceNotOnRouter(IfaceId),
}
