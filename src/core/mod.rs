//! 核心基础设施层
//!
//! - `logger`: 日志系统初始化
//! - `error`: HTTP 层错误类型

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};
pub use logger::init_logger;
