//! desk-clock 连接与编排核心
//!
//! 单线程协作式调度：固定的actor序列每个tick各执行一次，
//! 之后渲染共享状态，最后休眠。无抢占、无并发网络请求。

pub mod actor;
pub mod common;
pub mod driver;
pub mod logger;
pub mod platform;
pub mod render;
pub mod scheduler;
pub mod throttle;
