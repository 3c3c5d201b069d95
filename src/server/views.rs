//! 页面模板
//!
//! 每个页面对应 `templates/` 下的一个 askama 模板，共用 `layout.html`
//! （标题、导航、提示消息区）。模板中插入的用户数据一律做 HTML 转义。

use askama::Template;

use crate::models::{Contact, ContactForm};
use crate::services::FieldError;

pub struct Member {
    pub name: &'static str,
    pub email: &'static str,
}

const OWNER: &str = "Zidan Abraham";

static MEMBERS: [Member; 3] = [
    Member {
        name: "Zidan Abraham",
        email: "zidan@gmail.com",
    },
    Member {
        name: "I Nyoman Suryadana",
        email: "surya@gmail.com",
    },
    Member {
        name: "Rizky Ryan",
        email: "rizky@gmail.com",
    },
];

/// 列表/详情中展示的联系人，`slug` 是 URL 编码后的名称
#[derive(Debug, Default)]
pub struct ContactRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub slug: String,
}

impl From<Contact> for ContactRow {
    fn from(contact: Contact) -> Self {
        let slug = urlencoding::encode(&contact.name).into_owned();
        Self {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            slug,
        }
    }
}

/// 表单回显值
#[derive(Debug, Default)]
pub struct FormView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub old_name: String,
}

impl From<ContactForm> for FormView {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            old_name: form.old_name.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub title: &'static str,
    pub flash: Vec<String>,
    pub owner: &'static str,
    pub members: &'static [Member],
}

impl HomePage {
    pub fn new(flash: Vec<String>) -> Self {
        Self {
            title: "Home",
            flash,
            owner: OWNER,
            members: &MEMBERS,
        }
    }
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub title: &'static str,
    pub flash: Vec<String>,
}

impl AboutPage {
    pub fn new(flash: Vec<String>) -> Self {
        Self {
            title: "About",
            flash,
        }
    }
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactListPage {
    pub title: &'static str,
    pub flash: Vec<String>,
    pub contacts: Vec<ContactRow>,
}

impl ContactListPage {
    pub fn new(flash: Vec<String>, contacts: Vec<Contact>) -> Self {
        Self {
            title: "Contact List",
            flash,
            contacts: contacts.into_iter().map(ContactRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "add-contact.html")]
pub struct AddContactPage {
    pub title: &'static str,
    pub flash: Vec<String>,
    pub form: FormView,
    pub errors: Vec<FieldError>,
}

impl AddContactPage {
    pub fn new(flash: Vec<String>, form: ContactForm, errors: Vec<FieldError>) -> Self {
        Self {
            title: "Add Contact",
            flash,
            form: form.into(),
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "edit-contact.html")]
pub struct EditContactPage {
    pub title: &'static str,
    pub flash: Vec<String>,
    pub form: FormView,
    pub errors: Vec<FieldError>,
}

impl EditContactPage {
    pub fn new(flash: Vec<String>, form: ContactForm, errors: Vec<FieldError>) -> Self {
        Self {
            title: "Edit Contact",
            flash,
            form: form.into(),
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailPage {
    pub title: &'static str,
    pub flash: Vec<String>,
    pub contact: ContactRow,
    pub found: bool,
}

impl DetailPage {
    /// 联系人不存在时渲染提示
    pub fn new(flash: Vec<String>, contact: Option<Contact>) -> Self {
        Self {
            title: "Detail Contact",
            flash,
            found: contact.is_some(),
            contact: contact.map(ContactRow::from).unwrap_or_default(),
        }
    }
}
