// src/render/mod.rs
//! 渲染层输入契约。像素与字体绘制不属于编排核心，
//! 这里只约定：渲染在一个tick的全部actor执行完之后发生，且只读状态。

use crate::common::AppState;

pub trait Renderer {
    fn render(&mut self, state: &AppState);
}
