//! 内存联系人存储
//!
//! 不落盘，语义与 `JsonContactStore` 完全一致，用于路由层测试。

use super::{apply_update, remove_by_name, ContactStore};
use crate::data::{DataError, Result};
use crate::models::{Contact, ContactUpdate};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RwLock::new(contacts),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Contact>>> {
        self.contacts
            .read()
            .map_err(|_| DataError::Concurrency("内存存储读锁已中毒".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Contact>>> {
        self.contacts
            .write()
            .map_err(|_| DataError::Concurrency("内存存储写锁已中毒".to_string()))
    }
}

impl ContactStore for MemoryContactStore {
    fn load(&self) -> Result<Vec<Contact>> {
        Ok(self.read()?.clone())
    }

    fn add(&self, contact: Contact) -> Result<()> {
        self.write()?.push(contact);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut contacts = self.write()?;
        remove_by_name(&mut contacts, name);
        Ok(())
    }

    fn update(&self, update: ContactUpdate) -> Result<()> {
        let mut contacts = self.write()?;
        apply_update(&mut contacts, update);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_add_then_load() {
        let store = MemoryContactStore::new();
        let a = Contact::new("A", "a@x.com", "081234567890");

        store.add(a.clone()).unwrap();
        assert_eq!(store.load().unwrap(), vec![a.clone()]);
        assert_eq!(store.find("A").unwrap(), Some(a));
    }

    #[test]
    fn test_round_trip_of_mixed_operations() {
        let store = MemoryContactStore::with_contacts(vec![
            Contact::new("A", "a@x.com", "081234567890"),
            Contact::new("B", "b@x.com", "081234567891"),
        ]);

        store
            .add(Contact::new("C", "c@x.com", "081234567892"))
            .unwrap();
        store.delete("A").unwrap();
        store
            .update(ContactUpdate {
                old_name: "C".to_string(),
                name: "D".to_string(),
                email: "d@x.com".to_string(),
                phone: "081234567893".to_string(),
            })
            .unwrap();

        assert_eq!(
            store.load().unwrap(),
            vec![
                Contact::new("B", "b@x.com", "081234567891"),
                Contact::new("D", "d@x.com", "081234567893"),
            ]
        );
    }
}
