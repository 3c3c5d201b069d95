// 联系人数据模型

use serde::{Deserialize, Serialize};

/// 联系人记录
///
/// `name` 是联系人的唯一标识（区分大小写的精确匹配）。
/// 读取时兼容旧版数据文件中的 `nama` / `nohp` 字段名，写回时统一使用新字段名。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(alias = "nama")]
    pub name: String,
    pub email: String,
    #[serde(alias = "nohp")]
    pub phone: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// 联系人更新请求
///
/// `old_name` 用于定位原记录，持久化前会被剥离。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub old_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactUpdate {
    /// 拆分为 (旧名称, 新记录)
    pub fn into_parts(self) -> (String, Contact) {
        (
            self.old_name,
            Contact {
                name: self.name,
                email: self.email,
                phone: self.phone,
            },
        )
    }
}

/// 新增/编辑表单提交的原始输入
///
/// 校验失败时原样回显给用户，因此所有字段都保留为字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// 编辑表单中的隐藏字段
    pub old_name: Option<String>,
}

impl ContactForm {
    /// 由表单键值对构建，未知字段忽略，重复字段以最后一次为准
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "name" => form.name = value.into(),
                "email" => form.email = value.into(),
                "phone" => form.phone = value.into(),
                "oldName" => form.old_name = Some(value.into()),
                _ => {}
            }
        }
        form
    }

    pub fn into_contact(self) -> Contact {
        Contact {
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }

    /// 转换为更新请求，缺少 `oldName` 时视为空字符串
    pub fn into_update(self) -> ContactUpdate {
        ContactUpdate {
            old_name: self.old_name.unwrap_or_default(),
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

impl From<Contact> for ContactForm {
    fn from(contact: Contact) -> Self {
        Self {
            old_name: Some(contact.name.clone()),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_serializes_canonical_fields() {
        let contact = Contact::new("A", "a@x.com", "081234567890");
        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            value,
            json!({"name": "A", "email": "a@x.com", "phone": "081234567890"})
        );
    }

    #[test]
    fn test_contact_accepts_legacy_field_names() {
        let contact: Contact = serde_json::from_value(json!({
            "nama": "Budi",
            "email": "budi@x.com",
            "nohp": "081234567890"
        }))
        .unwrap();
        assert_eq!(contact, Contact::new("Budi", "budi@x.com", "081234567890"));
    }

    #[test]
    fn test_update_strips_old_name() {
        let update: ContactUpdate = serde_json::from_value(json!({
            "oldName": "A",
            "name": "B",
            "email": "b@x.com",
            "phone": "081111111111"
        }))
        .unwrap();

        let (old_name, contact) = update.into_parts();
        assert_eq!(old_name, "A");
        assert_eq!(
            serde_json::to_value(&contact).unwrap(),
            json!({"name": "B", "email": "b@x.com", "phone": "081111111111"})
        );
    }

    #[test]
    fn test_form_from_pairs() {
        let form = ContactForm::from_pairs([
            ("name", "A"),
            ("email", "a@x.com"),
            ("phone", "081234567890"),
            ("oldName", "Z"),
            ("extra", "ignored"),
        ]);

        assert_eq!(form.old_name.as_deref(), Some("Z"));
        let update = form.into_update();
        assert_eq!(update.old_name, "Z");
        assert_eq!(update.name, "A");
    }

    #[test]
    fn test_form_from_contact_prefills_old_name() {
        let form = ContactForm::from(Contact::new("A", "a@x.com", "081234567890"));
        assert_eq!(form.old_name.as_deref(), Some("A"));
        assert_eq!(form.into_contact(), Contact::new("A", "a@x.com", "081234567890"));
    }
}
