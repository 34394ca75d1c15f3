// src/actor/wifi.rs
//! WiFi生命周期状态机。
//!
//! 周期性占空比策略：每connection_cycle_ms发起一轮连接，保持
//! connected_duration_ms后主动断开，限制射频上电时间。一轮之内
//! 关联超过connect_timeout_ms未成功则放弃，并根据接口状态码归类失败原因。

use crate::actor::Actor;
use crate::common::{AppState, ErrorCode, Ticks, truncated};
use crate::common::config::Settings;
use crate::driver::{WifiDriver, WifiStatus};
use crate::throttle::Throttle;

/// 状态机评估频率下限（毫秒）
const EVAL_INTERVAL_MS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct WifiPolicy {
    /// 多久发起一轮新的连接周期
    pub connection_cycle_ms: u32,
    /// 成功关联后保持多久再主动断开
    pub connected_duration_ms: u32,
    /// 关联等待上限
    pub connect_timeout_ms: u32,
}

impl Default for WifiPolicy {
    fn default() -> Self {
        Self {
            connection_cycle_ms: 15 * 60 * 1000,
            connected_duration_ms: 10 * 1000,
            connect_timeout_ms: 60 * 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WifiState {
    Idle,
    Connecting,
    Connected,
    /// 预留状态，当前没有任何迁移进入
    #[allow(dead_code)]
    Disconnecting,
}

pub struct WifiActor<W: WifiDriver> {
    driver: W,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    policy: WifiPolicy,
    machine: WifiState,
    last_cycle_start: Option<Ticks>,
    connection_start: Option<Ticks>,
    connected_at: Option<Ticks>,
    eval_throttle: Throttle,
}

impl<W: WifiDriver> WifiActor<W> {
    pub fn new(driver: W, settings: &Settings, policy: WifiPolicy) -> Self {
        Self {
            driver,
            ssid: truncated(&settings.wifi_ssid),
            password: truncated(&settings.wifi_password),
            policy,
            machine: WifiState::Idle,
            last_cycle_start: None,
            connection_start: None,
            connected_at: None,
            eval_throttle: Throttle::new(EVAL_INTERVAL_MS),
        }
    }

    fn step(&mut self, now: Ticks, state: &mut AppState) {
        match self.machine {
            WifiState::Idle => {
                let cycle_due = match self.last_cycle_start {
                    None => true,
                    Some(start) => now.since(start) >= self.policy.connection_cycle_ms,
                };
                if cycle_due {
                    log::info!("Wifi: starting new connection cycle");
                    state.wifi_error = false;
                    self.last_cycle_start = Some(now);
                    match self.driver.begin_connect(&self.ssid, &self.password) {
                        Ok(()) => {
                            self.connection_start = Some(now);
                            self.machine = WifiState::Connecting;
                        }
                        Err(e) => {
                            log::warn!("Wifi: interface refused to start: {e}");
                            state.wifi_error = true;
                            self.teardown(state);
                        }
                    }
                }
            }

            WifiState::Connecting => {
                if self.driver.is_connected() {
                    log::info!("Wifi: connected successfully");
                    state.wifi_connected = true;
                    state.wifi_error = false;
                    if let Some(ip) = self.driver.ip_address() {
                        state.wifi_ip_address = ip;
                    }
                    self.connected_at = Some(now);
                    self.connection_start = None;
                    self.machine = WifiState::Connected;
                } else {
                    let waited = self
                        .connection_start
                        .map_or(u32::MAX, |start| now.since(start));
                    if waited >= self.policy.connect_timeout_ms {
                        let status = self.driver.status();
                        log::warn!(
                            "Wifi: connection timeout, interface status {}",
                            status.code()
                        );
                        state.wifi_error = true;
                        state.wifi_connected = false;
                        state.error_code = ErrorCode::WifiFailure;
                        state.error_extra = truncated(classify_failure(status));
                        self.teardown(state);
                    }
                }
            }

            WifiState::Connected => {
                if !self.driver.is_connected() {
                    log::warn!("Wifi: lost connection unexpectedly");
                    state.wifi_error = true;
                    state.wifi_connected = false;
                    self.teardown(state);
                } else {
                    let held = self.connected_at.map_or(0, |at| now.since(at));
                    if held >= self.policy.connected_duration_ms {
                        // 占空比策略的主动断开，不算错误
                        log::info!("Wifi: connection held long enough, disconnecting");
                        state.wifi_connected = false;
                        self.teardown(state);
                    }
                }
            }

            WifiState::Disconnecting => {}
        }
    }

    /// 拆除接口并回到Idle。下一轮连接仍受connection_cycle_ms约束。
    fn teardown(&mut self, state: &mut AppState) {
        self.driver.shutdown();
        state.wifi_ip_address = heapless::String::new();
        self.connection_start = None;
        self.connected_at = None;
        self.machine = WifiState::Idle;
    }
}

/// 把接口状态码映射为面向显示的失败原因。
fn classify_failure(status: WifiStatus) -> &'static str {
    match status {
        WifiStatus::NoApFound => "AP not found",
        WifiStatus::WrongPassword => "Wrong password",
        _ => "Timeout",
    }
}

impl<W: WifiDriver> Actor for WifiActor<W> {
    fn name(&self) -> &'static str {
        "wifi"
    }

    fn act(&mut self, now: Ticks, state: &mut AppState) {
        if !self.eval_throttle.ready(now) {
            return;
        }
        self.step(now, state);
    }

    fn shutdown(&mut self) {
        self.driver.shutdown();
    }
}
