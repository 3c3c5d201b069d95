//! HTTP 服务层
//!
//! - `instance`: 监听与连接管理
//! - `router`: 路径到路由的映射
//! - `handlers`: 路由处理、表单解析、提示消息
//! - `views`: askama 页面模板
//! - `static_files`: public 目录静态文件
//! - `utils`: 响应体与固定响应

mod handlers;
mod instance;
mod router;
mod static_files;
pub mod utils;
mod views;


pub use handlers::{dispatch, AppState, ADDED_MESSAGE, DELETED_MESSAGE, UPDATED_MESSAGE};
pub use instance::ContactServer;
pub use router::{resolve, MalformedPath, Route};
