// 路由解析
//
// 把 (方法, 路径) 映射为 Route：
// - 字面量段不区分大小写，允许一个结尾斜杠
// - 参数段做百分号解码，编码非法时返回 MalformedPath（响应 400）
// - HEAD 按 GET 处理

use hyper::Method;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    ContactList,
    AddForm,
    CreateContact,
    EditForm(String),
    UpdateContact,
    DeleteContact(String),
    Detail(String),
    NotFound,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("路径参数编码无效: {0}")]
pub struct MalformedPath(pub String);

pub fn resolve(method: &Method, path: &str) -> Result<Route, MalformedPath> {
    let trimmed = match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    };
    let segments: Vec<&str> = trimmed
        .strip_prefix('/')
        .unwrap_or(trimmed)
        .split('/')
        .collect();

    let is_get = *method == Method::GET || *method == Method::HEAD;
    let is_post = *method == Method::POST;

    let route = match segments.as_slice() {
        [""] if is_get => Route::Home,
        [about] if is_get && lit(about, "about") => Route::About,
        [contact] if lit(contact, "contact") => {
            if is_get {
                Route::ContactList
            } else if is_post {
                Route::CreateContact
            } else {
                Route::NotFound
            }
        }
        [contact, add] if is_get && lit(contact, "contact") && lit(add, "add") => Route::AddForm,
        [contact, update] if is_post && lit(contact, "contact") && lit(update, "update") => {
            Route::UpdateContact
        }
        [contact, edit, name] if is_get && lit(contact, "contact") && lit(edit, "edit") => {
            param(name)?.map_or(Route::NotFound, Route::EditForm)
        }
        [contact, delete, name] if is_get && lit(contact, "contact") && lit(delete, "delete") => {
            param(name)?.map_or(Route::NotFound, Route::DeleteContact)
        }
        [contact, name] if is_get && lit(contact, "contact") => {
            param(name)?.map_or(Route::NotFound, Route::Detail)
        }
        _ => Route::NotFound,
    };

    Ok(route)
}

fn lit(segment: &str, literal: &str) -> bool {
    segment.eq_ignore_ascii_case(literal)
}

/// 解码路径参数，空参数不匹配路由
fn param(segment: &str) -> Result<Option<String>, MalformedPath> {
    if segment.is_empty() {
        return Ok(None);
    }
    decode_segment(segment).map(Some)
}

/// 百分号解码，`%` 后必须跟两位十六进制数，且解码结果必须是 UTF-8
pub fn decode_segment(segment: &str) -> Result<String, MalformedPath> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(MalformedPath(segment.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| MalformedPath(segment.to_string()))
}
