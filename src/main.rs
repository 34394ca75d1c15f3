//! desk-clock 主机端入口：装配平台驱动与actor序列并进入主循环。

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use desk_clock::actor::{
    Actor, CalendarActor, ClockActor, HousekeeperActor, LocationActor, TimeSyncActor, WeatherActor,
    WifiActor, WifiPolicy,
};
use desk_clock::common::config::Settings;
use desk_clock::logger::Telemetry;
use desk_clock::platform::host::{
    ConsoleRenderer, HostMaintenance, HostNtp, HostTicks, RelayTransport, ReqwestHttp, SimWifi,
    SoftRtc,
};
use desk_clock::scheduler::Scheduler;

/// 模拟接口的关联时延
const SIM_ASSOCIATE_MS: u64 = 2000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings_path = std::env::args().nth(1).unwrap_or_else(|| "settings.json".into());
    let settings = match Settings::load(Path::new(&settings_path)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("settings: {e}, falling back to defaults");
            Settings::default()
        }
    };

    // 日志：终端输出+远端relay，断网期间排队
    let telemetry = Telemetry::new(Box::new(RelayTransport::new(&settings)));
    let telemetry_handle = telemetry.install()?;

    log::info!("desk-clock starting, service '{}'", settings.service_name);

    let rtc = Arc::new(Mutex::new(SoftRtc::new()));
    let http = ReqwestHttp::new();

    // 固定的actor顺序：Wifi → Clock → TimeSync → Location → Weather → Calendar
    let actors: Vec<Box<dyn Actor>> = vec![
        Box::new(WifiActor::new(
            SimWifi::new(SIM_ASSOCIATE_MS),
            &settings,
            WifiPolicy::default(),
        )),
        Box::new(ClockActor::new(rtc.clone())),
        Box::new(TimeSyncActor::new(rtc.clone(), HostNtp)),
        Box::new(LocationActor::new(http.clone())),
        Box::new(WeatherActor::new(http.clone(), &settings)),
        Box::new(CalendarActor::new(http, &settings)),
    ];

    let mut scheduler = Scheduler::new(
        Box::new(HostTicks::new()),
        actors,
        Box::new(ConsoleRenderer),
        Box::new(HousekeeperActor::new(HostMaintenance)),
    );
    scheduler.set_telemetry(telemetry_handle);

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))?;

    scheduler.run(&shutdown);
    log::info!("desk-clock stopped");
    Ok(())
}
