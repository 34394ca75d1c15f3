// src/platform/mod.rs
//! 平台实现层。当前仓库只携带主机端（模拟器）平台，
//! 板级驱动通过同一组trait接入。

pub mod host;
