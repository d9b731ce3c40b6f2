//! Reliability policies.
//!
//! Each policy is a small strategy over the same per-host sender state
//! (window, in-flight list, pending buffer, timer flag). The four hooks —
//! `on_send_request`, `on_data_received`, `on_ack_received`, `on_timeout` —
//! default to the shared windowed behavior; a variant only overrides the
//! knobs that make it different, so every policy stays independently
//! testable.
//!
//! Timer semantics, deliberately: `stop_timer` only clears a flag. The
//! already-scheduled expiry event still fires and must re-check live state;
//! firing with an empty in-flight list is a no-op.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::net::{IfaceId, Network, NodeId, Packet, RetransmitTimeout};
use crate::sim::{SimTime, Simulator};
use crate::trace::TraceKind;

mod ack_retransmit;
mod dynamic_window;
mod fixed_window;
mod no_reliability;
mod stop_and_wait;

pub use ack_retransmit::AckRetransmit;
pub use dynamic_window::DynamicWindow;
pub use fixed_window::FixedWindow;
pub use no_reliability::NoReliability;
pub use stop_and_wait::StopAndWait;

/// Default retransmission timeout: 0.5 simulated seconds.
pub const DEFAULT_TIMEOUT: SimTime = SimTime(500_000_000);

/// The five reliability modes a host can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityMode {
    /// Fire-and-forget: no ACKs, no window, no timer.
    NoReliability,
    /// Stop-and-wait ACKs, no retransmission: lost packets stay lost.
    StopAndWait,
    /// Stop-and-wait plus timeout retransmission of the oldest unacked packet.
    StopAndWaitRetransmit,
    /// Pipelined sending with a fixed window.
    FixedWindow,
    /// Pipelined sending; window grows by 1 per ACK, resets to 1 on timeout.
    DynamicWindow,
}

impl ReliabilityMode {
    /// Select the strategy implementation for this mode.
    pub fn policy(self) -> Box<dyn ReliabilityPolicy> {
        match self {
            ReliabilityMode::NoReliability => Box::new(NoReliability),
            ReliabilityMode::StopAndWait => Box::new(StopAndWait),
            ReliabilityMode::StopAndWaitRetransmit => Box::new(AckRetransmit),
            ReliabilityMode::FixedWindow => Box::new(FixedWindow),
            ReliabilityMode::DynamicWindow => Box::new(DynamicWindow),
        }
    }
}

impl fmt::Display for ReliabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReliabilityMode::NoReliability => "no_reliability",
            ReliabilityMode::StopAndWait => "stop_and_wait",
            ReliabilityMode::StopAndWaitRetransmit => "stop_and_wait_retransmit",
            ReliabilityMode::FixedWindow => "fixed_window",
            ReliabilityMode::DynamicWindow => "dynamic_window",
        };
        f.write_str(s)
    }
}

impl FromStr for ReliabilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_reliability" => Ok(ReliabilityMode::NoReliability),
            "stop_and_wait" => Ok(ReliabilityMode::StopAndWait),
            "stop_and_wait_retransmit" => Ok(ReliabilityMode::StopAndWaitRetransmit),
            "fixed_window" => Ok(ReliabilityMode::FixedWindow),
            "dynamic_window" => Ok(ReliabilityMode::DynamicWindow),
            other => Err(format!("unknown reliability mode: {other}")),
        }
    }
}

/// Per-host sender state shared by every policy.
#[derive(Debug)]
pub struct SenderState {
    /// Current window size; mutable only under DynamicWindow.
    pub window_size: usize,
    /// Unacknowledged packets, ascending serial number (oldest first).
    pub in_flight: Vec<Packet>,
    /// Packets submitted but not yet admitted into the window.
    pub pending: VecDeque<Packet>,
    /// Whether a retransmission timer is currently armed.
    pub timer_armed: bool,
    /// False for modes that never retransmit; makes `start_timer` a no-op.
    pub timer_enabled: bool,
    pub timeout: SimTime,
}

impl SenderState {
    pub fn new(window_size: usize, timer_enabled: bool, timeout: SimTime) -> Self {
        Self {
            window_size,
            in_flight: Vec::new(),
            pending: VecDeque::new(),
            timer_armed: false,
            timer_enabled,
            timeout,
        }
    }
}

/// Everything a policy hook may touch: the host's sender state plus the
/// primitives that reach the network (transmit, ACK, timer, window).
pub struct HostCtx<'a> {
    pub node: NodeId,
    pub name: &'a str,
    pub iface: IfaceId,
    pub state: &'a mut SenderState,
    pub sim: &'a mut Simulator,
    pub net: &'a mut Network,
}

impl HostCtx<'_> {
    /// Hand a fresh packet to the interface, record it in flight (idempotent),
    /// and make sure a timer is armed.
    pub fn transmit(&mut self, pkt: Packet) {
        info!(host = %self.name, %pkt, "发送数据包");
        let now = self.sim.now();
        self.net.trace_push(
            now,
            TraceKind::DataSend {
                node: self.node.0,
                sn: pkt.sn,
                retrans: false,
            },
        );
        self.net.iface_send(self.iface, pkt.clone(), self.sim);
        if !self.state.in_flight.iter().any(|p| p.sn == pkt.sn) {
            self.state.in_flight.push(pkt);
        }
        self.start_timer();
    }

    /// Send without any reliability bookkeeping (NoReliability path).
    pub fn raw_send(&mut self, pkt: Packet) {
        info!(host = %self.name, %pkt, "发送数据包（无可靠性记账）");
        let now = self.sim.now();
        self.net.trace_push(
            now,
            TraceKind::DataSend {
                node: self.node.0,
                sn: pkt.sn,
                retrans: false,
            },
        );
        self.net.iface_send(self.iface, pkt, self.sim);
    }

    /// Re-send the oldest in-flight packet. Does not touch the timer; the
    /// timeout hook re-arms explicitly after bookkeeping.
    pub fn resend_oldest(&mut self) -> Option<u64> {
        let pkt = self.state.in_flight.first()?.clone();
        info!(host = %self.name, %pkt, "重传最老的在途数据包");
        self.net.stats.retransmissions += 1;
        let now = self.sim.now();
        self.net.trace_push(
            now,
            TraceKind::DataSend {
                node: self.node.0,
                sn: pkt.sn,
                retrans: true,
            },
        );
        let sn = pkt.sn;
        self.net.iface_send(self.iface, pkt, self.sim);
        Some(sn)
    }

    /// Acknowledge a received DATA packet by its own serial number.
    pub fn send_ack(&mut self, sn: u64) {
        let ack = Packet::ack(sn);
        self.net.stats.acks_sent += 1;
        let now = self.sim.now();
        self.net.trace_push(
            now,
            TraceKind::AckSend {
                node: self.node.0,
                sn,
            },
        );
        self.net.iface_send(self.iface, ack, self.sim);
    }

    /// Hand a DATA packet to the receiving host's application layer.
    pub fn deliver(&mut self, pkt: &Packet) {
        self.net.on_delivered(self.node, pkt, self.sim);
    }

    /// Arm the retransmission timer. No-op when already armed or when the
    /// mode never retransmits.
    pub fn start_timer(&mut self) {
        if !self.state.timer_enabled || self.state.timer_armed {
            return;
        }
        self.state.timer_armed = true;
        let deadline = SimTime(self.sim.now().0.saturating_add(self.state.timeout.0));
        debug!(host = %self.name, deadline_ns = deadline.0, "武装重传定时器");
        self.net.trace_push(
            self.sim.now(),
            TraceKind::TimerArmed {
                node: self.node.0,
                deadline_ns: deadline.0,
            },
        );
        self.sim
            .schedule_after(self.state.timeout, RetransmitTimeout { node: self.node });
    }

    /// Clear the timer flag. The scheduled expiry event is not removed; its
    /// handler re-checks the in-flight list instead.
    pub fn stop_timer(&mut self) {
        if self.state.timer_armed {
            self.state.timer_armed = false;
            debug!(host = %self.name, "停止重传定时器");
            let now = self.sim.now();
            self.net
                .trace_push(now, TraceKind::TimerStopped { node: self.node.0 });
        }
    }

    /// Cumulative acknowledgment: drop every in-flight entry with sn <= `sn`.
    /// Returns how many entries were freed.
    pub fn cumulative_ack(&mut self, sn: u64) -> usize {
        let before = self.state.in_flight.len();
        self.state.in_flight.retain(|p| p.sn > sn);
        let freed = before - self.state.in_flight.len();
        let now = self.sim.now();
        self.net.trace_push(
            now,
            TraceKind::AckRecv {
                node: self.node.0,
                sn,
                freed,
            },
        );
        freed
    }

    /// Change the window size (dynamic-window growth and reset).
    pub fn set_window(&mut self, size: usize) {
        self.state.window_size = size;
        info!(host = %self.name, size, "窗口大小调整");
        let now = self.sim.now();
        self.net.trace_push(
            now,
            TraceKind::WindowSize {
                node: self.node.0,
                size,
            },
        );
    }

    /// Pull buffered packets into the window until it is full or the buffer
    /// is empty, transmitting each one.
    pub fn refill_window(&mut self) {
        while self.state.in_flight.len() < self.state.window_size {
            let Some(pkt) = self.state.pending.pop_front() else {
                break;
            };
            info!(host = %self.name, sn = pkt.sn, "窗口有空位，从缓冲区取包发送");
            self.transmit(pkt);
        }
    }
}

/// One reliability strategy. Default methods implement the shared windowed
/// behavior; variants override only what differs.
pub trait ReliabilityPolicy: fmt::Debug + Send {
    /// Whether this mode ever arms a retransmission timer.
    fn arms_timer(&self) -> bool {
        true
    }

    /// Window the host starts with, given the configured value.
    /// Stop-and-wait variants pin it to 1.
    fn initial_window(&self, configured: usize) -> usize {
        configured
    }

    /// A caller submitted an ordered batch of DATA packets.
    fn on_send_request(&self, ctx: &mut HostCtx<'_>, pkts: Vec<Packet>) {
        for pkt in pkts {
            if ctx.state.in_flight.len() < ctx.state.window_size {
                ctx.transmit(pkt);
            } else {
                debug!(host = %ctx.name, sn = pkt.sn, "窗口已满，进入待发缓冲区");
                ctx.state.pending.push_back(pkt);
            }
        }
    }

    /// A DATA packet arrived at this host.
    fn on_data_received(&self, ctx: &mut HostCtx<'_>, pkt: Packet) {
        info!(host = %ctx.name, %pkt, "收到数据包，回送 ACK");
        ctx.deliver(&pkt);
        ctx.send_ack(pkt.sn);
    }

    /// An ACK carrying serial number `sn` arrived at this host.
    fn on_ack_received(&self, ctx: &mut HostCtx<'_>, sn: u64) {
        info!(host = %ctx.name, sn, "收到 ACK");
        ctx.stop_timer();
        let freed = ctx.cumulative_ack(sn);
        let in_flight: Vec<u64> = ctx.state.in_flight.iter().map(|p| p.sn).collect();
        info!(
            host = %ctx.name,
            freed,
            outstanding = in_flight.len(),
            ?in_flight,
            "累计确认后的在途表"
        );
        self.after_ack(ctx);
        ctx.refill_window();
    }

    /// The retransmission timer fired with at least one packet in flight.
    /// Retransmits strictly the single oldest entry, then disarm-and-rearm.
    fn on_timeout(&self, ctx: &mut HostCtx<'_>) {
        ctx.resend_oldest();
        self.after_timeout(ctx);
        ctx.state.timer_armed = false;
        ctx.start_timer();
    }

    /// Extra work after an ACK is processed (dynamic-window growth).
    fn after_ack(&self, _ctx: &mut HostCtx<'_>) {}

    /// Extra work after a timeout retransmission (dynamic-window reset).
    fn after_timeout(&self, _ctx: &mut HostCtx<'_>) {}
}
