//! 统一数据管理模块
//!
//! 提供 JSON 数据文件的读写以及会话使用的内存缓存。
//!
//! # 模块组织
//!
//! - `error`: 统一错误类型定义
//! - `cache`: LRU 缓存（容量限制 + 空闲过期）
//! - `managers`: JSON 文件管理器

pub mod cache;
pub mod error;
pub mod managers;

pub use error::{DataError, Result};
