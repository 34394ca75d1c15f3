// src/driver/mod.rs
//! 硬件与外设的trait接口层。
//! 核心逻辑只依赖这些trait，各平台在platform模块里提供实现。

pub mod http;
pub mod maintenance;
pub mod ntp;
pub mod time_source;
pub mod wifi;

pub use http::{HttpClient, HttpResponse};
pub use maintenance::Maintenance;
pub use ntp::NtpSource;
pub use time_source::{Rtc, TickSource};
pub use wifi::{WifiDriver, WifiStatus};
