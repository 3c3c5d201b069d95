//! JSON 文件管理器
//!
//! 整文件读写 JSON 数据，支持：
//! - 类型化读写（`read_as` / `write_as`）
//! - 文件不存在时按默认内容初始化（`ensure_file`）
//! - 自动创建父目录
//! - 原子替换：先写同目录临时文件再 rename，读取方不会看到写了一半的文件
//! - Unix 权限设置（0o600）
//!
//! 不做任何缓存：每次读取都直接访问磁盘，保证文件是唯一的数据源。
//!
//! # 使用示例
//!
//! ```rust
//! use std::path::Path;
//! use crate::data::managers::JsonManager;
//!
//! let manager = JsonManager::compact();
//! manager.ensure_file(Path::new("data/contacts.json"), &serde_json::json!([]))?;
//! let contacts: Vec<Contact> = manager.read_as(Path::new("data/contacts.json"))?;
//! ```

use crate::data::{DataError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// JSON 文件管理器
#[derive(Debug, Clone, Copy)]
pub struct JsonManager {
    /// 是否格式化输出
    pretty: bool,
}

impl JsonManager {
    /// 紧凑输出模式（单行 JSON）
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// 格式化输出模式
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// 读取并反序列化为指定类型
    pub fn read_as<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 序列化任意类型并整文件写入
    pub fn write_as<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| DataError::io(parent, e))?;
            }
        }

        let content = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let temp_path = temp_path_for(path);
        let written = fs::write(&temp_path, content)
            .map_err(|e| DataError::io(&temp_path, e))
            .and_then(|_| set_permissions(&temp_path))
            .and_then(|_| fs::rename(&temp_path, path).map_err(|e| DataError::io(path, e)));

        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    /// 确保文件存在，不存在时写入默认内容
    ///
    /// 已存在的文件保持不变（幂等）。返回是否新建了文件。
    pub fn ensure_file(&self, path: &Path, default: &Value) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        self.write_as(path, default)?;
        Ok(true)
    }
}

/// 同目录下的临时文件路径（同一文件系统内 rename 才是原子的）
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{file_name}.{}.{seq}.tmp", std::process::id()))
}

impl Default for JsonManager {
    fn default() -> Self {
        Self::compact()
    }
}

/// 设置文件权限（Unix 平台 0o600）
#[cfg(unix)]
fn set_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = fs::metadata(path).map_err(|e| DataError::io(path, e))?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms).map_err(|e| DataError::io(path, e))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_write_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("contacts.json");

        let manager = JsonManager::compact();
        let content = json!([{"name": "A", "email": "a@x.com", "phone": "081234567890"}]);

        manager.write_as(&file_path, &content).unwrap();
        assert_eq!(manager.read_as::<Value>(&file_path).unwrap(), content);
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("contacts.json");

        JsonManager::compact()
            .write_as(&file_path, &json!([{"name": "A"}]))
            .unwrap();

        let raw = fs::read_to_string(&file_path).unwrap();
        assert_eq!(raw, r#"[{"name":"A"}]"#);
    }

    #[test]
    fn test_pretty_output() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("contacts.json");

        let manager = JsonManager::pretty();
        manager.write_as(&file_path, &json!([{"name": "A"}])).unwrap();

        let raw = fs::read_to_string(&file_path).unwrap();
        assert!(raw.contains('\n'));
    }

    #[test]
    fn test_read_invalid_json_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("contacts.json");
        fs::write(&file_path, "not json").unwrap();

        let err = JsonManager::compact()
            .read_as::<Value>(&file_path)
            .unwrap_err();
        assert!(matches!(err, DataError::JsonSerialization(_)));
    }

    #[test]
    fn test_read_missing_file_fails_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing.json");

        let err = JsonManager::compact()
            .read_as::<Value>(&file_path)
            .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_ensure_file_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data").join("contacts.json");
        let manager = JsonManager::compact();

        assert!(manager.ensure_file(&file_path, &json!([])).unwrap());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[]");

        manager.write_as(&file_path, &json!([{"name": "A"}])).unwrap();
        assert!(!manager.ensure_file(&file_path, &json!([])).unwrap());
        assert_eq!(
            manager.read_as::<Value>(&file_path).unwrap(),
            json!([{"name": "A"}])
        );
    }

    #[test]
    fn test_write_replaces_file_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("contacts.json");
        let manager = JsonManager::compact();

        manager.write_as(&file_path, &json!([{"name": "A"}])).unwrap();
        manager.write_as(&file_path, &json!([])).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[]");
        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["contacts.json"]);
    }

    #[test]
    fn test_failed_write_keeps_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("contacts.json");
        let manager = JsonManager::compact();
        manager.write_as(&file_path, &json!([{"name": "A"}])).unwrap();

        // 目标路径是非空目录时 rename 失败
        let blocked = temp_dir.path().join("blocked");
        fs::create_dir_all(blocked.join("inner")).unwrap();
        assert!(manager.write_as(&blocked, &json!([])).is_err());

        assert_eq!(
            manager.read_as::<Value>(&file_path).unwrap(),
            json!([{"name": "A"}])
        );
        let leftovers = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter(|entry| {
                entry
                    .as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tmp")
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    #[cfg(unix)]
    fn test_permissions_unix() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("contacts.json");

        JsonManager::compact()
            .write_as(&file_path, &json!([]))
            .unwrap();

        let perms = fs::metadata(&file_path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
