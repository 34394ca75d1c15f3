// src/actor/calendar.rs
//! 日历actor：每个联网会话向日历代理worker取一次当日事件计数。
//! worker侧已经完成OAuth签名与token管理，设备只消费一个简单的JSON端点。
//! 失败时把event_count置回0这个显式哨兵值，而不是保留可能过期的计数。

use serde::Deserialize;

use crate::actor::Actor;
use crate::common::config::Settings;
use crate::common::{AppState, Ticks};
use crate::driver::HttpClient;

const FETCH_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(rename = "eventCount")]
    event_count: u32,
    /// worker的可选扩展字段
    #[serde(rename = "messageCount")]
    message_count: Option<u32>,
    #[serde(default)]
    date: String,
}

pub struct CalendarActor<H: HttpClient> {
    http: H,
    worker_url: String,
    fetch_done: bool,
}

impl<H: HttpClient> CalendarActor<H> {
    pub fn new(http: H, settings: &Settings) -> Self {
        Self {
            http,
            worker_url: settings.calendar_worker_url.clone(),
            fetch_done: false,
        }
    }

    fn fetch(&mut self, state: &mut AppState) {
        if self.worker_url.is_empty() {
            log::error!("Calendar: worker url not configured");
            return;
        }

        log::info!("Calendar: fetching event counts from worker");
        match self.http.get(&self.worker_url, FETCH_TIMEOUT_MS) {
            Ok(response) if response.is_success() => {
                match serde_json::from_str::<CalendarResponse>(&response.body) {
                    Ok(data) => {
                        state.event_count = data.event_count;
                        if let Some(messages) = data.message_count {
                            state.message_count = messages;
                        }
                        log::info!(
                            "Calendar: {} events on {}",
                            state.event_count,
                            if data.date.is_empty() { "unknown" } else { &data.date }
                        );
                    }
                    Err(e) => {
                        log::warn!("Calendar: invalid worker response: {e}");
                        state.event_count = 0;
                    }
                }
            }
            Ok(response) => {
                log::warn!("Calendar: worker http error {}", response.status);
                state.event_count = 0;
            }
            Err(e) => {
                log::warn!("Calendar: fetch failed: {e}");
                state.event_count = 0;
            }
        }
    }
}

impl<H: HttpClient> Actor for CalendarActor<H> {
    fn name(&self) -> &'static str {
        "calendar"
    }

    fn act(&mut self, _now: Ticks, state: &mut AppState) {
        if !state.wifi_connected {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::test_support::ScriptedHttp;

    fn settings_with_worker() -> Settings {
        Settings {
            calendar_worker_url: "http://worker.example/daily".into(),
            ..Settings::default()
        }
    }

    fn connected_state() -> AppState {
        AppState {
            wifi_connected: true,
            ..AppState::default()
        }
    }

    #[test]
    fn fetch_sets_event_count() {
        let http = ScriptedHttp::ok(r#"{"eventCount": 4, "date": "2025-08-30"}"#);
        let mut actor = CalendarActor::new(http.clone(), &settings_with_worker());
        let mut state = connected_state();
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.event_count, 4);
        assert_eq!(state.message_count, 0);
        assert_eq!(http.last_url().unwrap(), "http://worker.example/daily");
    }

    #[test]
    fn optional_message_count_is_applied() {
        let http = ScriptedHttp::ok(r#"{"eventCount": 2, "messageCount": 9}"#);
        let mut actor = CalendarActor::new(http, &settings_with_worker());
        let mut state = connected_state();
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.event_count, 2);
        assert_eq!(state.message_count, 9);
    }

    #[test]
    fn malformed_response_resets_count_to_zero() {
        let http = ScriptedHttp::ok(r#"{"events": "nope"}"#);
        let mut actor = CalendarActor::new(http, &settings_with_worker());
        let mut state = connected_state();
        state.event_count = 11;
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.event_count, 0);
    }

    #[test]
    fn http_error_resets_count_to_zero() {
        let http = ScriptedHttp::status(500, "");
        let mut actor = CalendarActor::new(http, &settings_with_worker());
        let mut state = connected_state();
        state.event_count = 11;
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.event_count, 0);
    }

    #[test]
    fn transport_error_resets_count_to_zero() {
        let http = ScriptedHttp::failing();
        let mut actor = CalendarActor::new(http, &settings_with_worker());
        let mut state = connected_state();
        state.event_count = 11;
        actor.act(Ticks(0), &mut state);
        assert_eq!(state.event_count, 0);
    }

    #[test]
    fn fetches_once_per_session_and_rearms_on_disconnect() {
        let http = ScriptedHttp::ok(r#"{"eventCount": 1}"#);
        let mut actor = CalendarActor::new(http.clone(), &settings_with_worker());
        let mut state = connected_state();
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
    fn missing_worker_url_sends_no_request() {
        let http = ScriptedHttp::ok(r#"{"eventCount": 1}"#);
        let mut actor = CalendarActor::new(http.clone(), &Settings::default());
        let mut state = connected_state();
        actor.act(Ticks(0), &mut state);
        assert_eq!(http.requests(), 0);
    }
}
