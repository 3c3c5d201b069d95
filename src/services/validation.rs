//! 联系人表单校验
//!
//! 新增和编辑前执行三条规则（全部执行，错误累积）：
//! - 名称不能与已有联系人重复（编辑时与自身旧名称相同除外）
//! - 邮箱格式合法
//! - 手机号为合法的印尼手机号

use crate::data::Result;
use crate::models::ContactForm;
use crate::services::contact_store::ContactStore;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DUPLICATE_NAME_MESSAGE: &str = "The Name Already Exists!";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid Email!";
pub const INVALID_PHONE_MESSAGE: &str = "Invalid Phone Number!";

// 邮箱允许的非 ASCII 字符（国际化本地部分与 IDN 域名）
macro_rules! intl {
    () => {
        r"\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}"
    };
}

static EMAIL_LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~",
        intl!(),
        r"-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~",
        intl!(),
        r"-]+)*$"
    ))
    .expect("valid email local-part regex")
});

static EMAIL_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^([A-Za-z0-9",
        intl!(),
        r"]([A-Za-z0-9",
        intl!(),
        r"-]{0,61}[A-Za-z0-9",
        intl!(),
        r"])?\.)+[A-Za-z",
        intl!(),
        r"]{2,63}$"
    ))
    .expect("valid email domain regex")
});

/// 印尼手机号：+62 / 62 / 0 前缀，8 开头，运营商号段，再接 5-11 位数字或空白
static ID_MOBILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?62|0)8(1[1-9]|2[1238]|3[1238]|5[12356789]|7[78]|9[56789]|8[1-9])[\s\d]{5,11}$")
        .expect("valid mobile phone regex")
});

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// 表单字段名
    pub field: &'static str,
    /// 用户提交的原始值
    pub value: String,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, value: &str, message: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            message,
        }
    }
}

/// 校验新增表单
pub fn validate_new_contact(
    store: &dyn ContactStore,
    form: &ContactForm,
) -> Result<Vec<FieldError>> {
    validate(store, form, None)
}

/// 校验编辑表单，名称与 `oldName` 相同时跳过重复检查
pub fn validate_contact_update(
    store: &dyn ContactStore,
    form: &ContactForm,
) -> Result<Vec<FieldError>> {
    validate(store, form, Some(form.old_name.as_deref().unwrap_or_default()))
}

fn validate(
    store: &dyn ContactStore,
    form: &ContactForm,
    own_name: Option<&str>,
) -> Result<Vec<FieldError>> {
    let mut errors = Vec::new();

    let exempt = own_name.is_some_and(|own| own == form.name);
    if !exempt && store.find(&form.name)?.is_some() {
        errors.push(FieldError::new("name", &form.name, DUPLICATE_NAME_MESSAGE));
    }

    if !is_email(&form.email) {
        errors.push(FieldError::new("email", &form.email, INVALID_EMAIL_MESSAGE));
    }

    if !is_mobile_phone(&form.phone) {
        errors.push(FieldError::new("phone", &form.phone, INVALID_PHONE_MESSAGE));
    }

    if !errors.is_empty() {
        tracing::debug!(
            fields = ?errors.iter().map(|e| e.field).collect::<Vec<_>>(),
            "表单校验未通过"
        );
    }

    Ok(errors)
}

/// 邮箱格式校验
pub fn is_email(value: &str) -> bool {
    if value.len() > 254 {
        return false;
    }

    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    local.len() <= 64 && EMAIL_LOCAL_RE.is_match(local) && EMAIL_DOMAIN_RE.is_match(domain)
}

/// 印尼手机号格式校验
pub fn is_mobile_phone(value: &str) -> bool {
    ID_MOBILE_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;
    use crate::services::contact_store::MemoryContactStore;

    fn form(name: &str, email: &str, phone: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            old_name: None,
        }
    }

    fn store_with_a() -> MemoryContactStore {
        MemoryContactStore::with_contacts(vec![Contact::new("A", "a@x.com", "081234567890")])
    }

    #[test]
    fn test_valid_emails() {
        for email in [
            "a@x.com",
            "zidan@gmail.com",
            "first.last+tag@sub.example.co.id",
            "o'neil@example.org",
            "josé@example.com",
            "budi@contoh.世界",
            "用户@例子.测试",
        ] {
            assert!(is_email(email), "{email} 应该合法");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plain",
            "@x.com",
            "a@",
            "a@x",
            "a@@x.com",
            ".a@x.com",
            "a..b@x.com",
            "a@-x.com",
            "a b@x.com",
            "a@x.c",
            "josé@x.1",
            "a\u{00A0}b@x.com",
        ] {
            assert!(!is_email(email), "{email} 应该不合法");
        }
    }

    #[test]
    fn test_valid_phones() {
        for phone in [
            "081234567890",
            "081111111111",
            "+6281234567890",
            "6285712345678",
            "0895 1234 5678",
        ] {
            assert!(is_mobile_phone(phone), "{phone} 应该合法");
        }
    }

    #[test]
    fn test_invalid_phones() {
        for phone in [
            "",
            "12345",
            "0212345678",
            "081012345678",
            "0812345",
            "08123456789012345",
            "0812-3456-7890",
            "+1 555 123 4567",
        ] {
            assert!(!is_mobile_phone(phone), "{phone} 应该不合法");
        }
    }

    #[test]
    fn test_new_contact_passes() {
        let store = store_with_a();
        let errors =
            validate_new_contact(&store, &form("B", "b@x.com", "081234567890")).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_new_contact_duplicate_name() {
        let store = store_with_a();
        let errors =
            validate_new_contact(&store, &form("A", "a@x.com", "081234567890")).unwrap();

        assert_eq!(
            errors,
            vec![FieldError::new("name", "A", DUPLICATE_NAME_MESSAGE)]
        );
    }

    #[test]
    fn test_errors_accumulate() {
        let store = store_with_a();
        let errors = validate_new_contact(&store, &form("A", "nope", "123")).unwrap();

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "email", "phone"]);
        assert_eq!(errors[1].message, INVALID_EMAIL_MESSAGE);
        assert_eq!(errors[2].message, INVALID_PHONE_MESSAGE);
        assert_eq!(errors[2].value, "123");
    }

    #[test]
    fn test_update_keeping_own_name_is_allowed() {
        let store = store_with_a();
        let mut input = form("A", "new@x.com", "081234567890");
        input.old_name = Some("A".to_string());

        assert!(validate_contact_update(&store, &input).unwrap().is_empty());
    }

    #[test]
    fn test_update_to_other_existing_name_is_rejected() {
        let store = MemoryContactStore::with_contacts(vec![
            Contact::new("A", "a@x.com", "081234567890"),
            Contact::new("B", "b@x.com", "081234567891"),
        ]);
        let mut input = form("B", "a@x.com", "081234567890");
        input.old_name = Some("A".to_string());

        let errors = validate_contact_update(&store, &input).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }
}
