// 请求处理
//
// dispatch 是每个请求的入口：
// 1. 恢复会话（Cookie）
// 2. GET/HEAD 先查静态文件
// 3. 路由匹配并执行对应的存储操作
// 4. 出错时记录日志并返回 500，响应统一附带会话 Cookie

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, SET_COOKIE};
use hyper::{Method, Request, Response};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::router::{self, Route};
use super::static_files;
use super::utils::body::{full, BoxBody, BoxError};
use super::utils::error_responses::{
    bad_request, html, internal_error, not_found, payload_too_large, redirect,
};
use super::views::{
    AboutPage, AddContactPage, ContactListPage, DetailPage, EditContactPage, HomePage,
};
use crate::core::{AppError, AppResult};
use crate::data::Result as DataResult;
use crate::models::{ContactForm, ServerConfig};
use crate::services::validation::{validate_contact_update, validate_new_contact};
use crate::services::{ContactStore, SessionHandle, SessionManager};
use askama::Template;

pub const ADDED_MESSAGE: &str = "Successfully Added Contact!";
pub const UPDATED_MESSAGE: &str = "Successfully Updated Contact!";
pub const DELETED_MESSAGE: &str = "Successfully Deleted Contact!";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// 所有请求共享的状态
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub sessions: Arc<SessionManager>,
    /// 静态文件目录，None 表示不提供静态文件
    pub public_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContactStore>,
        sessions: Arc<SessionManager>,
        config: &ServerConfig,
    ) -> Self {
        Self {
            store,
            sessions,
            public_dir: config.public_dir.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// 处理单个请求
pub async fn dispatch<B>(state: &AppState, req: Request<B>) -> Response<BoxBody>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let cookie = req.headers().get(COOKIE).and_then(|v| v.to_str().ok());
    let session = state.sessions.resume(cookie);

    let mut response = match handle(state, &session, req).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(method = %method, path = %path, error = %e, "请求处理失败");
            internal_error()
        }
    };

    match HeaderValue::from_str(&state.sessions.set_cookie_header(&session.id)) {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "会话 Cookie 无法写入响应头"),
    }

    tracing::debug!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        new_session = session.is_new,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "请求完成"
    );

    response
}

async fn handle<B>(
    state: &AppState,
    session: &SessionHandle,
    req: Request<B>,
) -> AppResult<Response<BoxBody>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let (parts, body) = req.into_parts();
    let is_get = parts.method == Method::GET || parts.method == Method::HEAD;

    if is_get {
        if let Some(public_dir) = &state.public_dir {
            if let Some(file) = static_files::lookup(public_dir, parts.uri.path()).await? {
                let mut response = Response::new(full(file.content));
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(file.content_type));
                return Ok(response);
            }
        }
    }

    let route = match router::resolve(&parts.method, parts.uri.path()) {
        Ok(route) => route,
        Err(e) => {
            tracing::debug!(path = %parts.uri.path(), error = %e, "拒绝请求");
            return Ok(bad_request());
        }
    };

    let sessions = state.sessions.as_ref();

    match route {
        Route::Home => render(HomePage::new(sessions.take_flash(&session.id))),
        Route::About => render(AboutPage::new(sessions.take_flash(&session.id))),
        Route::ContactList => {
            let contacts = with_store(state, |store| store.load()).await?;
            render(ContactListPage::new(
                sessions.take_flash(&session.id),
                contacts,
            ))
        }
        Route::AddForm => render(AddContactPage::new(
            sessions.take_flash(&session.id),
            ContactForm::default(),
            Vec::new(),
        )),
        Route::CreateContact => {
            let Some(form) = read_form(&parts.headers, body, state.max_body_bytes).await? else {
                return Ok(payload_too_large());
            };

            let (form, errors) = with_store(state, move |store| {
                let errors = validate_new_contact(store, &form)?;
                if errors.is_empty() {
                    store.add(form.clone().into_contact())?;
                }
                Ok((form, errors))
            })
            .await?;

            if !errors.is_empty() {
                return render(AddContactPage::new(
                    sessions.take_flash(&session.id),
                    form,
                    errors,
                ));
            }

            sessions.push_flash(&session.id, ADDED_MESSAGE);
            Ok(redirect("/contact"))
        }
        Route::EditForm(name) => {
            let contact = with_store(state, move |store| store.find(&name)).await?;
            render(EditContactPage::new(
                sessions.take_flash(&session.id),
                contact.map(ContactForm::from).unwrap_or_default(),
                Vec::new(),
            ))
        }
        Route::UpdateContact => {
            let Some(form) = read_form(&parts.headers, body, state.max_body_bytes).await? else {
                return Ok(payload_too_large());
            };

            let (form, errors) = with_store(state, move |store| {
                let errors = validate_contact_update(store, &form)?;
                if errors.is_empty() {
                    store.update(form.clone().into_update())?;
                }
                Ok((form, errors))
            })
            .await?;

            if !errors.is_empty() {
                return render(EditContactPage::new(
                    sessions.take_flash(&session.id),
                    form,
                    errors,
                ));
            }

            sessions.push_flash(&session.id, UPDATED_MESSAGE);
            Ok(redirect("/contact"))
        }
        Route::DeleteContact(name) => {
            let deleted = with_store(state, move |store| {
                if store.find(&name)?.is_none() {
                    tracing::debug!(name = %name, "删除的联系人不存在");
                    return Ok(false);
                }
                store.delete(&name)?;
                Ok(true)
            })
            .await?;

            if !deleted {
                return Ok(bad_request());
            }

            sessions.push_flash(&session.id, DELETED_MESSAGE);
            Ok(redirect("/contact"))
        }
        Route::Detail(name) => {
            let contact = with_store(state, move |store| store.find(&name)).await?;
            render(DetailPage::new(sessions.take_flash(&session.id), contact))
        }
        Route::NotFound => Ok(not_found()),
    }
}

/// 在阻塞线程池中执行存储操作（文件 I/O 与文件锁会阻塞工作线程）
async fn with_store<T, F>(state: &AppState, op: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn ContactStore) -> DataResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    Ok(tokio::task::spawn_blocking(move || op(store.as_ref())).await??)
}

fn render<T: Template>(page: T) -> AppResult<Response<BoxBody>> {
    Ok(html(page.render()?))
}

/// 读取并解析表单请求体
///
/// 请求体超过上限时返回 `Ok(None)`；Content-Type 不是表单编码时按空表单处理。
async fn read_form<B>(headers: &HeaderMap, body: B, limit: usize) -> AppResult<Option<ContactForm>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let is_form = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE));

    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            tracing::warn!(limit, "请求体超过上限");
            return Ok(None);
        }
        Err(e) => return Err(AppError::Body(e.to_string())),
    };

    if !is_form {
        return Ok(Some(ContactForm::default()));
    }

    Ok(Some(ContactForm::from_pairs(url::form_urlencoded::parse(
        &bytes,
    ))))
}
