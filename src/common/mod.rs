// src/common/mod.rs
pub mod config;
pub mod error;
pub mod state;
pub mod types;

pub use error::{AppError, ErrorCode, Result};
pub use state::AppState;
pub use types::{Ticks, truncated};
