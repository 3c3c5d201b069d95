//! 统一错误类型定义
//!
//! 使用 `thiserror` 定义数据层的错误类型，上层通过 `anyhow` 或 `AppError` 透传。

use std::path::PathBuf;
use thiserror::Error;

/// 数据层统一错误类型
#[derive(Error, Debug)]
pub enum DataError {
    /// 文件 I/O 错误
    #[error("文件 I/O 错误: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化/反序列化错误
    #[error("JSON 序列化错误: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// 并发错误（锁中毒等）
    #[error("并发错误: {0}")]
    Concurrency(String),
}

pub type Result<T> = std::result::Result<T, DataError>;

impl DataError {
    /// 从 `std::io::Error` 和路径创建 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
