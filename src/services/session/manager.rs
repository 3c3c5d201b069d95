// SessionManager - 会话与一次性提示消息
//
// 会话保存在内存 LRU 中，按 Cookie 中的会话 ID 查找，空闲超过 TTL 即失效。
// 提示消息（flash）写入会话后，在下一次渲染页面时取出并清空，只显示一次。

use super::cookie_value;
use crate::data::cache::LruCache;
use crate::models::SessionConfig;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 单个会话的状态
#[derive(Debug, Default)]
struct SessionState {
    flash: Vec<String>,
}

/// 当前请求绑定的会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: String,
    /// 本次请求新建的会话
    pub is_new: bool,
}

pub struct SessionManager {
    sessions: Mutex<LruCache<String, SessionState>>,
    cookie_name: String,
    counter: AtomicU64,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(
                config.capacity,
                Duration::from_millis(config.ttl_ms),
            )),
            cookie_name: config.cookie_name.clone(),
            counter: AtomicU64::new(0),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    // 锁中毒时继续使用内部数据：会话状态只有提示消息，不存在需要回滚的不变式
    fn sessions(&self) -> MutexGuard<'_, LruCache<String, SessionState>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 根据请求的 Cookie 头恢复会话，不存在或已过期时新建
    ///
    /// 未知的会话 ID 不会被沿用，而是分配新的 ID。
    pub fn resume(&self, cookie_header: Option<&str>) -> SessionHandle {
        let mut sessions = self.sessions();

        if let Some(id) = cookie_header.and_then(|h| cookie_value(h, &self.cookie_name)) {
            if sessions.get_mut(&id.to_string()).is_some() {
                return SessionHandle {
                    id: id.to_string(),
                    is_new: false,
                };
            }
        }

        let purged = sessions.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "已清理过期会话");
        }

        let id = self.generate_id();
        sessions.insert(id.clone(), SessionState::default());
        tracing::trace!(session = %id, "新建会话");

        SessionHandle { id, is_new: true }
    }

    /// 写入一条提示消息（会话已失效时忽略）
    pub fn push_flash(&self, session_id: &str, message: impl Into<String>) {
        let mut sessions = self.sessions();
        match sessions.get_mut(&session_id.to_string()) {
            Some(state) => state.flash.push(message.into()),
            None => tracing::warn!(session = %session_id, "会话已失效，提示消息被丢弃"),
        }
    }

    /// 取出并清空提示消息
    pub fn take_flash(&self, session_id: &str) -> Vec<String> {
        let mut sessions = self.sessions();
        sessions
            .get_mut(&session_id.to_string())
            .map(|state| std::mem::take(&mut state.flash))
            .unwrap_or_default()
    }

    /// 生成 Set-Cookie 头的值
    pub fn set_cookie_header(&self, session_id: &str) -> String {
        let ttl = self.sessions().ttl();
        let max_age = ttl.as_millis().div_ceil(1000);
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.cookie_name, session_id, max_age
        )
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions().len()
    }

    fn generate_id(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);

        let mut hasher = Sha256::new();
        hasher.update(nanos.to_le_bytes());
        hasher.update(seq.to_le_bytes());
        hasher.update(std::process::id().to_le_bytes());
        hasher.update((self as *const Self as usize).to_le_bytes());
        format!("{:x}", hasher.finalize())
    }
}
