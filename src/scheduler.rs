// src/scheduler.rs
//! 协作式主循环：每个tick按声明顺序执行
//! Wifi → Clock → TimeSync → Location → Weather → Calendar → 渲染 → Housekeeper，
//! 随后固定休眠。所有actor调用都是同步的——某个actor里的慢速网络调用
//! 会使本tick后续的actor和渲染一起等待，这是设计上接受的限制，不在此处掩盖。

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::actor::Actor;
use crate::common::AppState;
use crate::driver::TickSource;
use crate::logger::TelemetryHandle;
use crate::render::Renderer;

/// tick间隔（毫秒）
pub const TICK_MS: u64 = 100;

pub struct Scheduler {
    clock: Box<dyn TickSource>,
    actors: Vec<Box<dyn Actor>>,
    renderer: Box<dyn Renderer>,
    housekeeper: Box<dyn Actor>,
    state: AppState,
    telemetry: Option<TelemetryHandle>,
}

impl Scheduler {
    pub fn new(
        clock: Box<dyn TickSource>,
        actors: Vec<Box<dyn Actor>>,
        renderer: Box<dyn Renderer>,
        housekeeper: Box<dyn Actor>,
    ) -> Self {
        Self {
            clock,
            actors,
            renderer,
            housekeeper,
            state: AppState::default(),
            telemetry: None,
        }
    }

    pub fn set_telemetry(&mut self, handle: TelemetryHandle) {
        self.telemetry = Some(handle);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 执行一个tick。同一tick内的状态修改对后调度的actor与渲染层可见。
    pub fn tick(&mut self) {
        let now = self.clock.ticks();
        for actor in self.actors.iter_mut() {
            actor.act(now, &mut self.state);
        }
        self.renderer.render(&self.state);
        self.housekeeper.act(now, &mut self.state);

        if let Some(telemetry) = &self.telemetry {
            telemetry.set_wifi_status(self.state.wifi_connected);
        }
    }

    /// 一直运行到shutdown标记置位，随后确定性地收尾每个actor
    /// （WifiActor在这里解除关联并给射频断电）。
    pub fn run(&mut self, shutdown: &AtomicBool) {
        log::info!("Scheduler: entering main loop");
        while !shutdown.load(Ordering::Relaxed) {
            self.tick();
            std::thread::sleep(Duration::from_millis(TICK_MS));
        }
        log::info!("Scheduler: shutdown requested, tearing down actors");
        for actor in self.actors.iter_mut() {
            actor.shutdown();
        }
        self.housekeeper.shutdown();
    }
}
