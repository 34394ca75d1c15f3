// src/actor/housekeeper.rs
//! 内务actor：每5秒触发一次空闲内存回收。无状态依赖，无失败路径。

use crate::actor::Actor;
use crate::common::{AppState, Ticks};
use crate::driver::Maintenance;
use crate::throttle::Throttle;

const RECLAIM_INTERVAL_MS: u32 = 5000;

pub struct HousekeeperActor<M: Maintenance> {
    maintenance: M,
    throttle: Throttle,
}

impl<M: Maintenance> HousekeeperActor<M> {
    pub fn new(maintenance: M) -> Self {
        Self {
            maintenance,
            throttle: Throttle::new(RECLAIM_INTERVAL_MS),
        }
    }
}

impl<M: Maintenance> Actor for HousekeeperActor<M> {
    fn name(&self) -> &'static str {
        "housekeeper"
    }

    fn act(&mut self, now: Ticks, _state: &mut AppState) {
        self.throttle
            .call(now, || self.maintenance.reclaim_memory());
    }
}
