// lib.rs - 联系人簿：存储、校验、会话与 HTTP 服务

pub mod core; // 日志与 HTTP 层错误
pub mod data; // JSON 文件与缓存
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use models::*;

pub use crate::core::{init_logger, AppError, AppResult};
pub use data::DataError;
pub use server::{AppState, ContactServer};
pub use services::{
    ContactStore, FieldError, JsonContactStore, MemoryContactStore, SessionHandle,
    SessionManager,
};
pub use utils::{load_config, ConfigError};

// 重新导出常用类型
pub use anyhow::{Context, Result};
