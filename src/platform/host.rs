// src/platform/host.rs
//! 主机端模拟器驱动：用std与真实HTTP出口模拟板上外设，
//! 核心编排逻辑与板级环境保持完全一致。

use std::time::{Duration, Instant};

use jiff::Timestamp;

use crate::common::config::Settings;
use crate::common::{AppError, AppState, ErrorCode, Result, Ticks, truncated};
use crate::driver::{
    HttpClient, HttpResponse, Maintenance, NtpSource, Rtc, TickSource, WifiDriver, WifiStatus,
};
use crate::logger::{LogEntry, LogTransport};
use crate::render::Renderer;

/// 进程启动起算的单调毫秒计数。
pub struct HostTicks {
    start: Instant,
}

impl HostTicks {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for HostTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for HostTicks {
    fn ticks(&self) -> Ticks {
        Ticks(self.start.elapsed().as_millis() as u32)
    }
}

/// 软件RTC：基准时间戳加经过时长，set_time重置基准。
pub struct SoftRtc {
    base: Timestamp,
    anchor: Instant,
}

impl SoftRtc {
    pub fn new() -> Self {
        Self {
            base: Timestamp::now(),
            anchor: Instant::now(),
        }
    }
}

impl Default for SoftRtc {
    fn default() -> Self {
        Self::new()
    }
}

impl Rtc for SoftRtc {
    fn now(&self) -> Result<Timestamp> {
        let elapsed_us = self.anchor.elapsed().as_micros() as i64;
        Timestamp::from_microsecond(self.base.as_microsecond() + elapsed_us)
            .map_err(|_| AppError::Time)
    }

    fn set_time(&mut self, timestamp: Timestamp) -> Result<()> {
        self.base = timestamp;
        self.anchor = Instant::now();
        Ok(())
    }
}

/// 主机时钟充当时间池——模拟器上没有真实的NTP往返。
pub struct HostNtp;

impl NtpSource for HostNtp {
    fn network_time(&mut self) -> Result<Timestamp> {
        Ok(Timestamp::now())
    }
}

/// 模拟无线接口：上电发起关联后，经过固定时延即视为关联成功。
pub struct SimWifi {
    associate_after_ms: u64,
    connect_started: Option<Instant>,
    powered: bool,
}

impl SimWifi {
    pub fn new(associate_after_ms: u64) -> Self {
        Self {
            associate_after_ms,
            connect_started: None,
            powered: false,
        }
    }
}

impl WifiDriver for SimWifi {
    fn begin_connect(&mut self, ssid: &str, _password: &str) -> Result<()> {
        log::debug!("SimWifi: associating with '{ssid}'");
        self.powered = true;
        self.connect_started = Some(Instant::now());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.powered
            && self
                .connect_started
                .is_some_and(|t| t.elapsed().as_millis() as u64 >= self.associate_after_ms)
    }

    fn status(&self) -> WifiStatus {
        if self.is_connected() {
            WifiStatus::GotIp
        } else if self.connect_started.is_some() {
            WifiStatus::Connecting
        } else {
            WifiStatus::Idle
        }
    }

    fn ip_address(&self) -> Option<heapless::String<16>> {
        self.is_connected().then(|| truncated("192.168.4.2"))
    }

    fn shutdown(&mut self) {
        self.connect_started = None;
        self.powered = false;
    }
}

/// 阻塞式HTTP客户端。内部连接池共享，Clone开销极小。
#[derive(Clone)]
pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttp {
    fn get(&mut self, url: &str, timeout_ms: u32) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(u64::from(timeout_ms)))
            .send()
            .map_err(|e| AppError::HttpTransport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| AppError::HttpTransport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// 远端日志relay传输：批量POST结构化条目。
pub struct RelayTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
    service_name: String,
}

impl RelayTransport {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: settings.telemetry_endpoint.clone(),
            token: settings.telemetry_token.clone(),
            service_name: settings.service_name.clone(),
        }
    }
}

impl LogTransport for RelayTransport {
    fn send(&self, entries: &[LogEntry]) -> Result<()> {
        // 未配置端点时静默丢弃
        if self.endpoint.is_empty() {
            return Ok(());
        }
        let payload: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "level": entry.level.as_str().to_lowercase(),
                    "service.name": self.service_name,
                    "message": entry.message,
                    "attributes": { "target": entry.target },
                })
            })
            .collect();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header("Dash0-Dataset", &self.service_name)
            .json(&payload)
            .send()
            .map_err(|e| AppError::HttpTransport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

/// 主机端无可回收内存，只汇报一下心跳。
pub struct HostMaintenance;

impl Maintenance for HostMaintenance {
    fn reclaim_memory(&mut self) {
        log::debug!("Housekeeper: maintenance tick");
    }
}

/// 控制台渲染器：把两块屏的内容按文本行输出。
pub struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render(&mut self, state: &AppState) {
        if state.error_code != ErrorCode::None {
            log::debug!(
                "[display] E{} {} ({})",
                state.error_code.code(),
                state.error_code.message(),
                state.error_extra
            );
        }
        log::debug!(
            "[display1] {:02}:{:02}:{:02}  {:04}-{:02}-{:02}",
            state.hour,
            state.minute,
            state.second,
            state.year,
            state.month,
            state.day
        );
        log::debug!(
            "[display2] {} {}°C  events:{} messages:{}  wifi:{}",
            state.location,
            state.temperature,
            state.event_count,
            state.message_count,
            if state.wifi_connected { "up" } else { "down" }
        );
    }
}
