// src/throttle.rs
//! 限速原语：把一个动作的执行频率限制为每interval_ms至多一次。
//!
//! 系统中唯一的"后台调度"形式——没有定时器，也没有并发任务，
//! 所有周期性行为都由调用方在每个tick主动询问。

use crate::common::Ticks;

pub struct Throttle {
    interval_ms: u32,
    last_run: Option<Ticks>,
}

impl Throttle {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_run: None,
        }
    }

    /// 若距上次执行已满interval_ms（或从未执行过）则记录本次执行并返回true。
    /// tick计数回绕安全。
    pub fn ready(&mut self, now: Ticks) -> bool {
        match self.last_run {
            Some(last) if now.since(last) < self.interval_ms => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }

    /// 包装任意动作：到期则执行并返回其结果，否则为空操作。
    pub fn call<R>(&mut self, now: Ticks, f: impl FnOnce() -> R) -> Option<R> {
        if self.ready(now) { Some(f()) } else { None }
    }

    /// 把"刚刚执行过"记在`now`，下个周期从这里起算。
    pub fn reset(&mut self, now: Ticks) {
        self.last_run = Some(now);
    }
}
