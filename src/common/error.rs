// src/common/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("HTTP transport failed: {0}")]
    HttpTransport(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Unexpected response shape")]
    ResponseShape,

    #[error("Time source error")]
    Time,

    #[error("Wifi interface error")]
    Wifi,
}

pub type Result<T> = core::result::Result<T, AppError>;

/// 面向渲染层的错误码，非零值会使显示切换到错误展示模式。
/// 数值沿用固件既有的错误码分配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u16)]
pub enum ErrorCode {
    #[default]
    None = 0,
    WifiFailure = 300,
    WifiApNotFound = 301,
    WifiWrongPassword = 302,
    WifiTimeout = 303,
    TimezoneFetchFailed = 310,
    Internal = 400,
}

impl ErrorCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::None => "",
            ErrorCode::WifiFailure => "Wifi failure",
            ErrorCode::WifiApNotFound => "AP not found",
            ErrorCode::WifiWrongPassword => "Wifi wrong password",
            ErrorCode::WifiTimeout => "Wifi conn timeout",
            ErrorCode::TimezoneFetchFailed => "Timezone fetch fail",
            ErrorCode::Internal => "Internal error",
        }
    }
}
