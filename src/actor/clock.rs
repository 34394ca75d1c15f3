// src/actor/clock.rs
//! 墙上时钟actor：每个tick从硬件时钟读取UTC时间戳，
//! 叠加state.timezone_offset换算成本地日历字段。
//! 不节流、不依赖网络——断网时同样产出有效时间。

use std::sync::{Arc, Mutex};

use jiff::tz::{Offset, TimeZone};

use crate::actor::Actor;
use crate::common::{AppState, Ticks};
use crate::driver::Rtc;

pub struct ClockActor<R: Rtc> {
    rtc: Arc<Mutex<R>>,
}

impl<R: Rtc> ClockActor<R> {
    pub fn new(rtc: Arc<Mutex<R>>) -> Self {
        Self { rtc }
    }
}

impl<R: Rtc> Actor for ClockActor<R> {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn act(&mut self, _now: Ticks, state: &mut AppState) {
        let timestamp = {
            let Ok(rtc) = self.rtc.lock() else {
                return;
            };
            match rtc.now() {
                Ok(ts) => ts,
                Err(e) => {
                    log::warn!("Clock: rtc read failed: {e}");
                    return;
                }
            }
        };

        // 换算结果不跨tick缓存，偏移一旦变化下个tick即生效
        let offset = Offset::from_seconds(state.timezone_offset).unwrap_or(Offset::UTC);
        let local = timestamp.to_zoned(TimeZone::fixed(offset)).datetime();

        state.year = local.year();
        state.month = local.month();
        state.day = local.day();
        state.hour = local.hour();
        state.minute = local.minute();
        state.second = local.second();
    }
}
