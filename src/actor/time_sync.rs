// src/actor/time_sync.rs
//! 时间同步actor：联网后的第一个tick无条件对时，
//! 之后以12小时为周期节流重同步。断网会清掉"已初始同步"标记，
//! 下一个联网会话重新无条件对时。同步失败只记日志，不阻塞循环。

use std::sync::{Arc, Mutex};

use crate::actor::Actor;
use crate::common::{AppState, Ticks};
use crate::driver::{NtpSource, Rtc};
use crate::throttle::Throttle;

const RESYNC_INTERVAL_MS: u32 = 1000 * 60 * 60 * 12;

pub struct TimeSyncActor<R: Rtc, N: NtpSource> {
    rtc: Arc<Mutex<R>>,
    ntp: N,
    initial_sync_done: bool,
    resync_throttle: Throttle,
}

impl<R: Rtc, N: NtpSource> TimeSyncActor<R, N> {
    pub fn new(rtc: Arc<Mutex<R>>, ntp: N) -> Self {
        Self {
            rtc,
            ntp,
            initial_sync_done: false,
            resync_throttle: Throttle::new(RESYNC_INTERVAL_MS),
        }
    }

    fn sync(&mut self) {
        let network_time = match self.ntp.network_time() {
            Ok(ts) => ts,
            Err(e) => {
                log::warn!("TimeSync: ntp query failed: {e}");
                return;
            }
        };
        let Ok(mut rtc) = self.rtc.lock() else {
            return;
        };
        match rtc.set_time(network_time) {
            Ok(()) => log::info!("TimeSync: clock synchronized"),
            Err(e) => log::warn!("TimeSync: rtc update failed: {e}"),
        }
    }
}

impl<R: Rtc, N: NtpSource> Actor for TimeSyncActor<R, N> {
    fn name(&self) -> &'static str {
        "time_sync"
    }

    fn act(&mut self, now: Ticks, state: &mut AppState) {
        if !state.wifi_connected {
            self.initial_sync_done = false;
            return;
        }
        if !self.initial_sync_done {
            self.sync();
            self.initial_sync_done = true;
            // 12小时从本次初始同步起算
            self.resync_throttle.reset(now);
        } else if self.resync_throttle.ready(now) {
            self.sync();
        }
    }
}
