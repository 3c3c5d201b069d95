//! 通用 LRU 缓存实现
//!
//! 提供基于 LRU (Least Recently Used) 淘汰策略的缓存，支持：
//! - 容量限制：超过容量自动淘汰最久未使用的项
//! - 空闲过期：条目在 TTL 内未被访问即失效，每次访问都会续期
//!
//! 会话存储基于此缓存实现。
//!
//! # 使用示例
//!
//! ```rust
//! use std::time::Duration;
//! use crate::data::cache::LruCache;
//!
//! let mut cache = LruCache::new(100, Duration::from_secs(6));
//! cache.insert("sid", vec!["Successfully Added Contact!".to_string()]);
//! cache.get_mut(&"sid").unwrap().clear();
//! ```

use linked_hash_map::LinkedHashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// 缓存条目，包含值和最近访问时间
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    last_access: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            last_access: Instant::now(),
        }
    }

    /// 检查是否已过期
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_access.elapsed() > ttl
    }
}

/// LRU 缓存实现
///
/// 使用 `LinkedHashMap` 保证访问顺序，实现 LRU 淘汰策略。
#[derive(Debug)]
pub struct LruCache<K: Eq + Hash, V> {
    cache: LinkedHashMap<K, CacheEntry<V>>,
    capacity: usize,
    ttl: Duration,
}

impl<K: Eq + Hash, V> LruCache<K, V> {
    /// 创建新的 LRU 缓存
    ///
    /// # 参数
    ///
    /// - `capacity`: 缓存容量（最大条目数，最小为 1）
    /// - `ttl`: 条目空闲多久后过期
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: LinkedHashMap::new(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// 检查键是否存在且未过期（不续期）
    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        self.cache
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.ttl))
    }

    /// 获取可变引用
    ///
    /// 键存在且未过期时返回 `Some(&mut V)`，同时续期并移至最近使用位置。
    /// 已过期的条目会被删除。
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let expired = self.cache.get(key)?.is_expired(self.ttl);
        if expired {
            self.cache.remove(key);
            return None;
        }

        let entry = self.cache.get_refresh(key)?;
        entry.last_access = Instant::now();
        Some(&mut entry.value)
    }

    /// 插入缓存值
    ///
    /// 如果键已存在，更新其值和访问时间。
    /// 如果超过容量限制，自动淘汰最久未使用的项。
    pub fn insert(&mut self, key: K, value: V) {
        if self.cache.contains_key(&key) {
            self.cache.remove(&key);
        }

        if self.cache.len() >= self.capacity {
            self.cache.pop_front();
        }

        self.cache.insert(key, CacheEntry::new(value));
    }

    /// 清理所有过期条目，返回清理数量
    ///
    /// 最久未访问的条目位于链表头部，遇到第一个未过期条目即可停止。
    pub fn purge_expired(&mut self) -> usize {
        let mut purged = 0;
        while self
            .cache
            .front()
            .is_some_and(|(_, entry)| entry.is_expired(self.ttl))
        {
            self.cache.pop_front();
            purged += 1;
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_insert_and_get() {
        let mut cache = LruCache::new(10, Duration::from_secs(60));
        cache.insert("key1", "value1");
        assert_eq!(cache.get_mut(&"key1"), Some(&mut "value1"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent_key() {
        let mut cache = LruCache::<String, i32>::new(10, Duration::from_secs(60));
        assert_eq!(cache.get_mut(&"missing".to_string()), None);
        assert!(!cache.contains(&"missing".to_string()));
    }

    #[test]
    fn test_mutation_through_get_mut() {
        let mut cache = LruCache::new(10, Duration::from_secs(60));
        cache.insert("sid", Vec::<String>::new());
        cache.get_mut(&"sid").unwrap().push("hello".to_string());
        assert_eq!(cache.get_mut(&"sid").unwrap().len(), 1);
    }

    #[test]
    fn test_capacity_limit() {
        let mut cache = LruCache::new(3, Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.insert("d", 4);

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"d"));
    }

    #[test]
    fn test_lru_eviction_order() {
        let mut cache = LruCache::new(3, Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);

        // 访问 "a"，使其成为最近使用
        cache.get_mut(&"a");

        // 插入 "d"，应该淘汰 "b"
        cache.insert("d", 4);
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = LruCache::new(0, Duration::from_secs(60));
        assert_eq!(cache.capacity(), 1);
        cache.insert("a", 1);
        assert!(cache.contains(&"a"));
    }

    #[test]
    fn test_idle_expiration() {
        let mut cache = LruCache::new(10, Duration::from_millis(100));
        cache.insert("key", "value");
        assert!(cache.get_mut(&"key").is_some());

        thread::sleep(Duration::from_millis(150));

        assert_eq!(cache.get_mut(&"key"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_access_renews_expiry() {
        let mut cache = LruCache::new(10, Duration::from_millis(200));
        cache.insert("key", "value");

        thread::sleep(Duration::from_millis(120));
        assert!(cache.get_mut(&"key").is_some());
        thread::sleep(Duration::from_millis(120));

        // 总计超过 TTL，但期间有访问续期
        assert!(cache.get_mut(&"key").is_some());
    }

    #[test]
    fn test_purge_expired() {
        let mut cache = LruCache::new(10, Duration::from_millis(100));
        cache.insert("a", 1);
        cache.insert("b", 2);
        thread::sleep(Duration::from_millis(150));
        cache.insert("c", 3);

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&"c"));
    }
}
