//! 会话管理模块
//!
//! 基于 Cookie 的内存会话，承载一次性提示消息（flash）。

mod manager;

pub use manager::{SessionHandle, SessionManager};

/// 从 Cookie 请求头中取出指定名称的值
///
/// 格式为 `a=1; b=2`，名称大小写敏感，值两侧的双引号会被去掉。
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}
