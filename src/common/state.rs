// src/common/state.rs
//! 进程级共享状态：启动时创建一次，每个tick被actor原地修改，
//! 渲染层只读消费。单线程访问，无需加锁。

use heapless::String;

use crate::common::error::ErrorCode;

#[derive(Debug, Clone)]
pub struct AppState {
    // 连接状态
    pub wifi_connected: bool,
    pub wifi_error: bool,
    pub wifi_ip_address: String<16>,

    // 墙上时钟，由ClockActor每个tick从硬件时间+时区偏移重新推导
    pub year: i16,
    pub month: i8,
    pub day: i8,
    pub hour: i8,
    pub minute: i8,
    pub second: i8,

    // 位置信息
    pub location: String<32>,
    pub location_code: String<32>,
    pub latitude: f64,
    pub longitude: f64,
    /// 本地时间换算的唯一依据（秒）
    pub timezone_offset: i32,

    // 计数与温度
    pub event_count: u32,
    pub message_count: u32,
    pub temperature: i16,

    // 错误通道，非零值由渲染层决定如何呈现
    pub error_code: ErrorCode,
    pub error_extra: String<20>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            wifi_connected: false,
            wifi_error: false,
            wifi_ip_address: String::new(),
            year: 2025,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            location: crate::common::truncated("Spandau"),
            location_code: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            timezone_offset: 0,
            event_count: 0,
            message_count: 0,
            temperature: 0,
            error_code: ErrorCode::None,
            error_extra: String::new(),
        }
    }
}
