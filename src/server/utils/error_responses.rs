//! 固定格式的响应模板
//!
//! 400/404/413/500 错误页、重定向以及 HTML 页面响应的构建。

use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, LOCATION};
use hyper::{Response, StatusCode};

use super::body::{empty, full, BoxBody};

const HTML: &str = "text/html; charset=utf-8";

fn fixed(status: StatusCode, content_type: &'static str, body: &'static str) -> Response<BoxBody> {
    let mut response = Response::new(full(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, hyper::header::HeaderValue::from_static(content_type));
    response
}

/// 删除不存在的联系人、URL 编码错误等
pub fn bad_request() -> Response<BoxBody> {
    fixed(StatusCode::BAD_REQUEST, HTML, "<h1>400 Bad Request</h1>")
}

/// 未匹配任何路由
pub fn not_found() -> Response<BoxBody> {
    fixed(StatusCode::NOT_FOUND, HTML, "<h1>404 Not Found</h1>")
}

/// 请求体超过上限
pub fn payload_too_large() -> Response<BoxBody> {
    fixed(
        StatusCode::PAYLOAD_TOO_LARGE,
        HTML,
        "<h1>413 Payload Too Large</h1>",
    )
}

/// 内部错误（细节只写日志，不返回给客户端）
pub fn internal_error() -> Response<BoxBody> {
    fixed(
        StatusCode::INTERNAL_SERVER_ERROR,
        "text/plain; charset=utf-8",
        "Internal Server Error",
    )
}

/// 302 重定向
pub fn redirect(location: &'static str) -> Response<BoxBody> {
    let mut response = Response::new(empty());
    *response.status_mut() = StatusCode::FOUND;
    response
        .headers_mut()
        .insert(LOCATION, hyper::header::HeaderValue::from_static(location));
    response
}

/// 200 HTML 页面
pub fn html(page: String) -> Response<BoxBody> {
    let mut response = Response::new(full(Bytes::from(page)));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, hyper::header::HeaderValue::from_static(HTML));
    response
}
