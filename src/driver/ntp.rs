// src/driver/ntp.rs
use jiff::Timestamp;

use crate::common::Result;

/// 网络时间源。一次同步查询，失败即返回错误，调用方决定重试节奏。
pub trait NtpSource {
    fn network_time(&mut self) -> Result<Timestamp>;
}
