//! JSON 文件联系人存储
//!
//! 数据文件是唯一数据源：每次操作都重新读取整个文件，修改后整文件写回。
//! 写操作的"读取-修改-写回"全过程受进程内互斥锁和文件排他锁双重保护，
//! 同一进程的并发请求和共享数据目录的多个进程都不会丢失更新。
//! 写回是原子替换（见 `JsonManager::write_as`），读取无需加锁也只会看到完整的文件。

use super::{apply_update, find_by_name, remove_by_name, ContactStore};
use crate::data::managers::JsonManager;
use crate::data::{DataError, Result};
use crate::models::{Contact, ContactUpdate, StoreConfig};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct JsonContactStore {
    path: PathBuf,
    lock_path: PathBuf,
    json: JsonManager,
    write_guard: Mutex<()>,
}

impl JsonContactStore {
    /// 按配置打开存储（见 [`JsonContactStore::open_at`]）
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let json = if config.pretty {
            JsonManager::pretty()
        } else {
            JsonManager::compact()
        };
        Self::open_at(config.file_path(), json)
    }

    /// 打开指定路径的存储
    ///
    /// 幂等初始化：数据目录不存在时创建，数据文件不存在时写入 `[]`。
    pub fn open_at(path: impl Into<PathBuf>, json: JsonManager) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| DataError::io(dir, e))?;
            }
        }

        if json.ensure_file(&path, &serde_json::json!([]))? {
            tracing::info!(path = %path.display(), "已创建空联系人数据文件");
        }

        Ok(Self {
            lock_path: path.with_extension("lock"),
            path,
            json,
            write_guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 在锁保护下执行一次完整的读取-修改-写回
    fn mutate<F>(&self, op: &'static str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Contact>),
    {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| DataError::Concurrency("联系人存储互斥锁已中毒".to_string()))?;

        // 锁在 lock_file drop 时自动释放
        let lock_file =
            File::create(&self.lock_path).map_err(|e| DataError::io(&self.lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| DataError::io(&self.lock_path, e))?;

        let mut contacts = self.load()?;
        f(&mut contacts);
        self.json.write_as(&self.path, &contacts)?;

        tracing::debug!(op, count = contacts.len(), "联系人数据已写回");
        Ok(())
    }
}

impl ContactStore for JsonContactStore {
    fn load(&self) -> Result<Vec<Contact>> {
        self.json.read_as(&self.path)
    }

    fn add(&self, contact: Contact) -> Result<()> {
        tracing::info!(name = %contact.name, "添加联系人");
        self.mutate("add", |contacts| contacts.push(contact))
    }

    fn find(&self, name: &str) -> Result<Option<Contact>> {
        Ok(find_by_name(&self.load()?, name).cloned())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.mutate("delete", |contacts| {
            let removed = remove_by_name(contacts, name);
            tracing::info!(name = %name, removed, "删除联系人");
        })
    }

    fn update(&self, update: ContactUpdate) -> Result<()> {
        tracing::info!(old_name = %update.old_name, name = %update.name, "更新联系人");
        self.mutate("update", |contacts| apply_update(contacts, update))
    }
}
