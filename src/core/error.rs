//! HTTP 层错误类型
//!
//! 处理请求过程中无法恢复的错误，统一转换为 500 响应。
//! 校验失败和资源不存在不属于这里，它们由路由处理器直接渲染为页面或 400/404。

use crate::data::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// 存储读写失败
    #[error("存储错误: {0}")]
    Data(#[from] DataError),

    /// 模板渲染失败
    #[error("模板渲染错误: {0}")]
    Template(#[from] askama::Error),

    /// 响应构建失败
    #[error("HTTP 响应构建错误: {0}")]
    Http(#[from] hyper::http::Error),

    /// 读取请求体失败
    #[error("读取请求体失败: {0}")]
    Body(String),

    /// 阻塞任务异常退出
    #[error("后台任务失败: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// 静态文件读取失败
    #[error("读取静态文件失败: {0}")]
    StaticFile(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
