// src/logger.rs
//! 结构化日志：终端输出交给env_logger按常规格式处理，
//! info及以上级别的记录额外上报到远端relay。
//! 断网期间上报条目进入有界队列（丢最旧），在连通恢复的上升沿统一冲刷。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::common::Result;

/// 离线队列容量，超出后丢弃最旧的条目
pub const QUEUE_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

/// 远端传输seam。发送失败不升级——日志通道绝不拖垮主循环。
pub trait LogTransport: Send + Sync {
    fn send(&self, entries: &[LogEntry]) -> Result<()>;
}

struct Shared {
    queue: Mutex<VecDeque<LogEntry>>,
    connected: AtomicBool,
    transport: Box<dyn LogTransport>,
}

impl Shared {
    fn enqueue(&self, entry: LogEntry) {
        let Ok(mut queue) = self.queue.lock() else {
            return;
        };
        if queue.len() == QUEUE_CAPACITY {
            queue.pop_front();
        }
        queue.push_back(entry);
    }

    fn ship(&self, entry: LogEntry) {
        if self.connected.load(Ordering::Relaxed) {
            if let Err(e) = self.transport.send(std::slice::from_ref(&entry)) {
                eprintln!("[telemetry] send failed: {e}");
            }
        } else {
            self.enqueue(entry);
        }
    }

    fn flush(&self) {
        let drained: Vec<LogEntry> = {
            let Ok(mut queue) = self.queue.lock() else {
                return;
            };
            queue.drain(..).collect()
        };
        if drained.is_empty() {
            return;
        }
        if let Err(e) = self.transport.send(&drained) {
            eprintln!("[telemetry] flush of {} entries failed: {e}", drained.len());
        }
    }
}

/// 进程级logger，实现`log::Log`。
pub struct Telemetry {
    console: env_logger::Logger,
    shared: Arc<Shared>,
}

/// 调度器持有的轻量句柄，用来通报连通状态变化。
#[derive(Clone)]
pub struct TelemetryHandle {
    shared: Arc<Shared>,
}

impl TelemetryHandle {
    /// 在false→true的上升沿冲刷离线队列。
    pub fn set_wifi_status(&self, connected: bool) {
        let was = self.shared.connected.swap(connected, Ordering::Relaxed);
        if connected && !was {
            self.shared.flush();
        }
    }
}

impl Telemetry {
    pub fn new(transport: Box<dyn LogTransport>) -> Self {
        Self {
            console: env_logger::Builder::from_default_env().build(),
            shared: Arc::new(Shared {
                queue: Mutex::new(VecDeque::new()),
                connected: AtomicBool::new(false),
                transport,
            }),
        }
    }

    pub fn handle(&self) -> TelemetryHandle {
        TelemetryHandle {
            shared: self.shared.clone(),
        }
    }

    /// 注册为全局logger。返回供调度器使用的句柄。
    pub fn install(self) -> core::result::Result<TelemetryHandle, log::SetLoggerError> {
        let handle = self.handle();
        let max_level = self.console.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(handle)
    }
}

impl log::Log for Telemetry {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        self.console.log(record);

        // 只上报本crate的记录，避免传输层内部日志递归进入shipper
        let in_crate = record.target().starts_with(env!("CARGO_CRATE_NAME"));
        if in_crate && record.level() <= log::Level::Info {
            self.shared.ship(LogEntry {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {
        self.console.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct CapturingTransport {
        batches: Arc<Mutex<Vec<Vec<LogEntry>>>>,
        fail: Arc<AtomicBool>,
    }

    impl LogTransport for CapturingTransport {
        fn send(&self, entries: &[LogEntry]) -> Result<()> {
            if self.fail.load(Ordering::Relaxed) {
                return Err(crate::common::AppError::HttpTransport("down".into()));
            }
            self.batches.lock().unwrap().push(entries.to_vec());
            Ok(())
        }
    }

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            level: log::Level::Info,
            target: "desk_clock::test".into(),
            message: message.into(),
        }
    }

    fn telemetry() -> (Telemetry, CapturingTransport) {
        let transport = CapturingTransport::default();
        (Telemetry::new(Box::new(transport.clone())), transport)
    }

    #[test]
    fn disconnected_entries_are_queued_not_sent() {
        let (telemetry, transport) = telemetry();
        telemetry.shared.ship(entry("one"));
        telemetry.shared.ship(entry("two"));
        assert!(transport.batches.lock().unwrap().is_empty());
        assert_eq!(telemetry.shared.queue.lock().unwrap().len(), 2);
    }

    #[test]
    fn queue_is_bounded_and_drops_oldest() {
        let (telemetry, _) = telemetry();
        for i in 0..(QUEUE_CAPACITY + 5) {
            telemetry.shared.ship(entry(&format!("m{i}")));
        }
        let queue = telemetry.shared.queue.lock().unwrap();
        assert_eq!(queue.len(), QUEUE_CAPACITY);
        assert_eq!(queue.front().unwrap().message, "m5");
        assert_eq!(queue.back().unwrap().message, "m54");
    }

    #[test]
    fn rising_edge_flushes_the_queue_once() {
        let (telemetry, transport) = telemetry();
        let handle = telemetry.handle();
        telemetry.shared.ship(entry("queued"));
        handle.set_wifi_status(true);

        let batches = transport.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[0][0].message, "queued");
        drop(batches);

        // 持续为true不重复冲刷
        handle.set_wifi_status(true);
        assert_eq!(transport.batches.lock().unwrap().len(), 1);
    }

    #[test]
    fn connected_entries_ship_immediately() {
        let (telemetry, transport) = telemetry();
        telemetry.handle().set_wifi_status(true);
        telemetry.shared.ship(entry("live"));
        let batches = transport.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0][0].message, "live");
        assert!(telemetry.shared.queue.lock().unwrap().is_empty());
    }

    #[test]
    fn transport_failure_never_panics() {
        let (telemetry, transport) = telemetry();
        transport.fail.store(true, Ordering::Relaxed);
        let handle = telemetry.handle();
        telemetry.shared.ship(entry("queued"));
        handle.set_wifi_status(true);
        telemetry.shared.ship(entry("live"));
    }
}
