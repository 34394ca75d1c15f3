// src/actor/weather.rs
//! 天气actor：每个联网会话向OpenWeatherMap取一次当前温度。
//! 硬依赖LocationActor先产出真实坐标——坐标为零时不发请求，
//! 所以actor顺序里Location必须排在Weather之前。

use serde::Deserialize;

use crate::actor::Actor;
use crate::common::config::Settings;
use crate::common::{AppState, Ticks};
use crate::driver::HttpClient;

const API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const FETCH_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

pub struct WeatherActor<H: HttpClient> {
    http: H,
    api_key: String,
    fetch_done: bool,
}

impl<H: HttpClient> WeatherActor<H> {
    pub fn new(http: H, settings: &Settings) -> Self {
        Self {
            http,
            api_key: settings.weather_api_key.clone(),
            fetch_done: false,
        }
    }

    fn fetch(&mut self, state: &mut AppState) {
        if self.api_key.is_empty() {
            log::error!("Weather: api key not configured");
            return;
        }

        let url = format!(
            "{API_URL}?lat={}&lon={}&appid={}&units=metric",
            state.latitude, state.longitude, self.api_key
        );
        log::info!(
            "Weather: fetching for lat {}, lon {}",
            state.latitude,
            state.longitude
        );

        let response = match self.http.get(&url, FETCH_TIMEOUT_MS) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Weather: fetch failed: {e}");
                return;
            }
        };

        if !response.is_success() {
            log::warn!("Weather: api http error {}", response.status);
            return;
        }

        match serde_json::from_str::<WeatherResponse>(&response.body) {
            Ok(data) => {
                // 向零取整，与显示层的整数温度一致
                state.temperature = data.main.temp as i16;
                log::info!(
                    "Weather: {}°C at {}",
                    state.temperature,
                    state.location
                );
            }
            Err(e) => log::warn!("Weather: unexpected response shape: {e}"),
        }
    }
}

impl<H: HttpClient> Actor for WeatherActor<H> {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn act(&mut self, _now: Ticks, state: &mut AppState) {
        if !state.wifi_connected {
            self.fetch_done = false;
            return;
        }
        // 位置尚未就绪：本tick什么都不做，也不消耗fetch机会
        if state.latitude == 0.0 && state.longitude == 0.0 {
            return;
        }
        if self.fetch_done {
            return;
        }
        self.fetch(state);
        self.fetch_done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::test_support::ScriptedHttp;

    fn settings_with_key() -> Settings {
        Settings {
            weather_api_key: "k123".into(),
            ..Settings::default()
        }
    }

    fn located_state() -> AppState {
        AppState {
            wifi_connected: true,
            latitude: 52.5,
            longitude: 13.4,
            ..AppState::default()
        }
    }

    #[test]
    fn fetch_sets_truncated_temperature() {
        let http = ScriptedHttp::ok(r#"{"main": {"temp": 21.7}}"#);
        let mut actor = WeatherActor::new(http.clone(), &settings_with_key());
        let mut state = located_state();
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.temperature, 21);
        let url = http.last_url().unwrap();
        assert!(url.contains("lat=52.5"));
        assert!(url.contains("appid=k123"));
        assert!(url.contains("units=metric"));
    }

    #[test]
    fn negative_temperature_truncates_toward_zero() {
        let http = ScriptedHttp::ok(r#"{"main": {"temp": -3.9}}"#);
        let mut actor = WeatherActor::new(http, &settings_with_key());
        let mut state = located_state();
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.temperature, -3);
    }

    #[test]
    fn zero_coordinates_block_the_fetch() {
        let http = ScriptedHttp::ok(r#"{"main": {"temp": 21.7}}"#);
        let mut actor = WeatherActor::new(http.clone(), &settings_with_key());
        let mut state = AppState {
            wifi_connected: true,
            ..AppState::default()
        };
        state.temperature = 7;
        actor.act(Ticks(0), &mut state);
        assert_eq!(http.requests(), 0);
        assert_eq!(state.temperature, 7);
        // 坐标一旦就绪，同一会话仍可获取
        state.latitude = 52.5;
        state.longitude = 13.4;
        actor.act(Ticks(100), &mut state);
        assert_eq!(http.requests(), 1);
    }

    #[test]
    fn fetches_once_per_session_and_rearms_on_disconnect() {
        let http = ScriptedHttp::ok(r#"{"main": {"temp": 21.7}}"#);
        let mut actor = WeatherActor::new(http.clone(), &settings_with_key());
        let mut state = located_state();
        actor.act(Ticks(0), &mut state);
        actor.act(Ticks(100), &mut state);
        assert_eq!(http.requests(), 1);
        state.wifi_connected = false;
        actor.act(Ticks(200), &mut state);
        state.wifi_connected = true;
        actor.act(Ticks(300), &mut state);
        assert_eq!(http.requests(), 2);
    }

    #[test]
    fn malformed_body_leaves_temperature_unchanged() {
        let http = ScriptedHttp::ok(r#"{"weather": []}"#);
        let mut actor = WeatherActor::new(http, &settings_with_key());
        let mut state = located_state();
        state.temperature = -12;
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.temperature, -12);
    }

    #[test]
    fn missing_api_key_sends_no_request() {
        let http = ScriptedHttp::ok(r#"{"main": {"temp": 21.7}}"#);
        let mut actor = WeatherActor::new(http.clone(), &Settings::default());
        let mut state = located_state();
        actor.act(Ticks(0), &mut state);
        assert_eq!(http.requests(), 0);
    }

    #[test]
    fn http_error_leaves_temperature_unchanged() {
        let http = ScriptedHttp::status(401, r#"{"message": "bad key"}"#);
        let mut actor = WeatherActor::new(http, &settings_with_key());
        let mut state = located_state();
        state.temperature = 4;
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.temperature, 4);
    }
}
