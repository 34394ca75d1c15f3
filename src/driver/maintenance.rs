// src/driver/maintenance.rs

/// 周期性回收空闲内存的钩子，无失败路径。
pub trait Maintenance {
    fn reclaim_memory(&mut self);
}
