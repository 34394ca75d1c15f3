// src/driver/http.rs
use crate::common::Result;

/// 一次同步GET的结果。响应体所有权随值转移，
/// 句柄释放由Drop保证，不存在需要手动close的路径。
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 同步请求原语。非2xx与畸形响应体属于可恢复数据，由调用方判断。
pub trait HttpClient {
    fn get(&mut self, url: &str, timeout_ms: u32) -> Result<HttpResponse>;
}
