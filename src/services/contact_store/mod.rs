//! 联系人存储模块
//!
//! `ContactStore` 定义 load/add/find/delete/update 五个操作：
//! - `JsonContactStore`: 生产实现，每次操作整文件读取、修改、写回
//! - `MemoryContactStore`: 内存实现，供路由层测试使用
//!
//! 两种实现共用本模块中的列表操作函数，保证语义一致。

mod json_store;
mod memory_store;

pub use json_store::JsonContactStore;
pub use memory_store::MemoryContactStore;

use crate::data::Result;
use crate::models::{Contact, ContactUpdate};

/// 联系人存储抽象
///
/// 存储层不校验名称唯一性，调用方需先通过 `find` 检查重复。
pub trait ContactStore: Send + Sync {
    /// 读取全部联系人（保持文件中的顺序）
    fn load(&self) -> Result<Vec<Contact>>;

    /// 追加联系人到末尾
    fn add(&self, contact: Contact) -> Result<()>;

    /// 按名称查找第一个匹配的联系人
    fn find(&self, name: &str) -> Result<Option<Contact>> {
        Ok(find_by_name(&self.load()?, name).cloned())
    }

    /// 删除所有同名联系人，名称不存在时不做任何改动
    fn delete(&self, name: &str) -> Result<()>;

    /// 用新记录替换 `old_name` 对应的联系人，位置保持不变
    fn update(&self, update: ContactUpdate) -> Result<()>;
}

pub(crate) fn find_by_name<'a>(contacts: &'a [Contact], name: &str) -> Option<&'a Contact> {
    contacts.iter().find(|contact| contact.name == name)
}

/// 删除所有同名联系人，返回删除数量
pub(crate) fn remove_by_name(contacts: &mut Vec<Contact>, name: &str) -> usize {
    let before = contacts.len();
    contacts.retain(|contact| contact.name != name);
    before - contacts.len()
}

/// 原位替换联系人
///
/// 先记录 `old_name` 第一次出现的位置，再删除所有同名记录，最后把新记录插回该位置。
/// 位置之前的记录都不同名，因此删除后该位置一定有效。
/// `old_name` 不存在时新记录插入到列表头部。
pub(crate) fn apply_update(contacts: &mut Vec<Contact>, update: ContactUpdate) {
    let (old_name, contact) = update.into_parts();
    let index = contacts
        .iter()
        .position(|existing| existing.name == old_name)
        .unwrap_or(0);

    contacts.retain(|existing| existing.name != old_name);
    contacts.insert(index, contact);
}
