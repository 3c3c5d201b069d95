//! HTTP 工具模块
//!
//! 包含通用的响应体类型和响应模板

pub mod body;
pub mod error_responses;

// 重新导出常用类型
pub use body::{box_body, empty, full, BoxBody};
