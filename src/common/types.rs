// src/common/types.rs
//! 基础共享类型：单调tick计数与有界字符串辅助。

/// 单调毫秒tick计数，允许回绕（模 2^32）。
/// 比较只能通过[`Ticks::since`]进行，禁止直接大小比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticks(pub u32);

impl Ticks {
    /// 自`earlier`以来经过的毫秒数，回绕安全。
    pub fn since(self, earlier: Ticks) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

/// 把任意字符串截断装入有界字符串，超出容量的部分丢弃。
pub fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
