// src/driver/wifi.rs
//! 无线接口驱动trait。
//! 生命周期策略（何时连、连多久、失败如何归类）不在这里，
//! 由WifiActor的状态机负责；驱动只暴露接口本身的能力。

use crate::common::Result;

/// WLAN接口的原始关联状态，数值沿用固件接口的状态码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiStatus {
    /// 1000 空闲
    Idle,
    /// 1001 关联中
    Connecting,
    /// 1010 已取得IP
    GotIp,
    /// 200 信标超时
    BeaconTimeout,
    /// 201 找不到AP
    NoApFound,
    /// 202 密码错误
    WrongPassword,
    /// 203 关联失败
    AssocFail,
    /// 204 握手超时
    HandshakeTimeout,
    /// 205 连接失败
    ConnectionFail,
}

impl WifiStatus {
    pub fn code(self) -> u16 {
        match self {
            WifiStatus::Idle => 1000,
            WifiStatus::Connecting => 1001,
            WifiStatus::GotIp => 1010,
            WifiStatus::BeaconTimeout => 200,
            WifiStatus::NoApFound => 201,
            WifiStatus::WrongPassword => 202,
            WifiStatus::AssocFail => 203,
            WifiStatus::HandshakeTimeout => 204,
            WifiStatus::ConnectionFail => 205,
        }
    }
}

pub trait WifiDriver {
    /// 给射频上电并发起关联。非阻塞：关联结果通过轮询观察。
    fn begin_connect(&mut self, ssid: &str, password: &str) -> Result<()>;

    fn is_connected(&self) -> bool;

    fn status(&self) -> WifiStatus;

    fn ip_address(&self) -> Option<heapless::String<16>>;

    /// 解除关联并给射频断电。幂等。
    fn shutdown(&mut self);
}
