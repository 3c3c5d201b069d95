//! 缓存层实现
//!
//! - `lru`: 通用 LRU 缓存（容量限制 + 空闲过期），供会话存储使用

pub mod lru;

pub use lru::LruCache;
