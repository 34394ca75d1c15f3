// src/actor/mod.rs
//! actor层：每个actor暴露一个act操作，由调度器每tick按固定顺序调用。
//!
//! act是失败边界——所有错误在actor内部消化，只通过
//! `state.error_code`/`state.error_extra`或日志表达，绝不向调用方抛出。

pub mod calendar;
pub mod clock;
pub mod housekeeper;
pub mod location;
pub mod time_sync;
pub mod weather;
pub mod wifi;

#[cfg(test)]
pub(crate) mod test_support;

pub use calendar::CalendarActor;
pub use clock::ClockActor;
pub use housekeeper::HousekeeperActor;
pub use location::LocationActor;
pub use time_sync::TimeSyncActor;
pub use weather::WeatherActor;
pub use wifi::{WifiActor, WifiPolicy};

use crate::common::{AppState, Ticks};

pub trait Actor {
    fn name(&self) -> &'static str;

    /// 原地修改共享状态。同一tick内后调度的actor可见先前的修改。
    fn act(&mut self, now: Ticks, state: &mut AppState);

    /// 进程退出前的确定性收尾。默认无事可做。
    fn shutdown(&mut self) {}
}
