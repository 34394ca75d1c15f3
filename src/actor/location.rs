// src/actor/location.rs
//! 位置actor：每个联网会话向ip-api.com取一次时区与坐标。
//! 断网即复位fetch标记，网络恢复后的会话重新获取。

use core::fmt::Write;

use serde::Deserialize;

use crate::actor::Actor;
use crate::common::{AppState, ErrorCode, Ticks, truncated};
use crate::driver::HttpClient;

const API_URL: &str = "http://ip-api.com/json/?fields=status,message,timezone,offset,lat,lon,city";
const FETCH_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Deserialize)]
struct LocationResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    timezone: String,
    /// UTC偏移（秒），API直接给出
    #[serde(default)]
    offset: i32,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    city: String,
}

pub struct LocationActor<H: HttpClient> {
    http: H,
    fetch_done: bool,
}

impl<H: HttpClient> LocationActor<H> {
    pub fn new(http: H) -> Self {
        Self {
            http,
            fetch_done: false,
        }
    }

    fn fetch(&mut self, state: &mut AppState) {
        let response = match self.http.get(API_URL, FETCH_TIMEOUT_MS) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Location: fetch failed: {e}");
                return;
            }
        };

        if !response.is_success() {
            log::warn!("Location: api http error {}", response.status);
            state.error_code = ErrorCode::TimezoneFetchFailed;
            state.error_extra.clear();
            let _ = write!(state.error_extra, "{}", response.status);
            return;
        }

        let data: LocationResponse = match serde_json::from_str(&response.body) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Location: unexpected response shape: {e}");
                return;
            }
        };

        if data.status != "success" {
            log::warn!("Location: api error: {}", data.message);
            state.error_code = ErrorCode::TimezoneFetchFailed;
            state.error_extra = truncated(&data.message);
            return;
        }

        state.timezone_offset = data.offset;
        state.location_code = truncated(&data.timezone);
        state.location = truncated(&data.city);
        state.latitude = data.lat;
        state.longitude = data.lon;
        log::info!(
            "Location: {} ({}), lat {}, lon {}, offset {}s",
            state.location,
            state.location_code,
            state.latitude,
            state.longitude,
            state.timezone_offset
        );
    }
}

impl<H: HttpClient> Actor for LocationActor<H> {
    fn name(&self) -> &'static str {
        "location"
    }

    fn act(&mut self, _now: Ticks, state: &mut AppState) {
        if !state.wifi_connected {
            // 网络恢复后重新获取
            self.fetch_done = false;
            return;
        }
        if self.fetch_done {
            return;
        }
        self.fetch(state);
        self.fetch_done = true;
    }
}
