// src/common/config.rs
//! 设备配置：网络凭据与各API密钥。
//! 配置总是显式注入actor构造函数，核心代码不读取全局可变配置。

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub wifi_ssid: String,
    pub wifi_password: String,
    pub weather_api_key: String,
    pub calendar_worker_url: String,
    pub telemetry_endpoint: String,
    pub telemetry_token: String,
    pub service_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wifi_ssid: String::new(),
            wifi_password: String::new(),
            weather_api_key: String::new(),
            calendar_worker_url: String::new(),
            telemetry_endpoint: String::new(),
            telemetry_token: String::new(),
            service_name: "desk_clock".into(),
        }
    }
}

impl Settings {
    /// 从JSON文件加载配置，缺失字段取默认值。
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|_| AppError::Config("settings file unreadable"))?;
        serde_json::from_str(&raw).map_err(|_| AppError::Config("settings file malformed"))
    }
}
