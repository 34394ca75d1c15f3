// src/driver/time_source.rs
use jiff::Timestamp;

use crate::common::{Result, Ticks};

/// 单调tick源，毫秒计数，可回绕。
pub trait TickSource {
    fn ticks(&self) -> Ticks;
}

/// 硬件时钟。存取的都是UTC时间戳，时区换算不在驱动层处理。
pub trait Rtc {
    fn now(&self) -> Result<Timestamp>;

    /// 由时间同步写入新的基准时间。
    fn set_time(&mut self, timestamp: Timestamp) -> Result<()>;
}
