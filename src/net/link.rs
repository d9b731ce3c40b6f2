//! 链路类型
//!
//! 定义点对点链路：传播时延（距离/速度）与每包丢失概率。
//! 传播时延与包大小无关；序列化时延由网卡负责。

use super::error::ConfigError;
use super::id::IfaceId;
use crate::sim::SimTime;

/// 点对点链路，两端各接一个网卡
#[derive(Debug)]
pub struct Link {
    pub name: String,
    /// 传播时延（由 距离/速度 导出，对每个包恒定）
    pub prop_delay: SimTime,
    /// 每包丢失概率，[0,1]
    pub loss_prob: f64,
    pub(crate) endpoints: [Option<IfaceId>; 2],
}

impl Link {
    /// 创建新链路；物理参数在此处一次性校验。
    pub fn new(
        name: impl Into<String>,
        distance_m: f64,
        speed_mps: f64,
        loss_prob: f64,
    ) -> Result<Self, ConfigError> {
        if !speed_mps.is_finite() || speed_mps <= 0.0 {
            return Err(ConfigError::BadSpeed(speed_mps));
        }
        if !distance_m.is_finite() || distance_m < 0.0 {
            return Err(ConfigError::BadDistance(distance_m));
        }
        if !loss_prob.is_finite() || !(0.0..=1.0).contains(&loss_prob) {
            return Err(ConfigError::LossProbOutOfRange(loss_prob));
        }
        Ok(Self {
            name: name.into(),
            prop_delay: SimTime::from_secs_f64(distance_m / speed_mps),
            loss_prob,
            endpoints: [None, None],
        })
    }

    /// 把一个网卡接到空闲端点上；两端都被占用时返回 false，由调用方报错。
    pub(crate) fn attach_endpoint(&mut self, iface: IfaceId) -> bool {
        for slot in self.endpoints.iter_mut() {
            if slot.is_none() {
                *slot = Some(iface);
                return true;
            }
        }
        false
    }

    /// 链路对端的网卡（若 `iface` 不在本链路上则为 None）
    pub(crate) fn peer_of(&self, iface: IfaceId) -> Option<IfaceId> {
        match self.endpoints {
            [Some(a), Some(b)] if a == iface => Some(b),
            [Some(a), Some(b)] if b == iface => Some(a),
            _ => None,
        }
    }
}
