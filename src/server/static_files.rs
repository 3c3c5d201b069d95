// 静态文件
//
// GET/HEAD 请求先在 public 目录中查找同名文件，找不到再交给路由。
// 含 `..` 的路径、目录以及解码失败的路径一律不处理。

use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::router::decode_segment;
use crate::core::AppResult;

pub struct StaticFile {
    pub content: Bytes,
    pub content_type: &'static str,
}

/// 请求路径对应的 public 目录内文件
fn resolve_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let mut target = public_dir.to_path_buf();
    let mut pushed = false;

    for segment in request_path.split('/').filter(|s| !s.is_empty()) {
        let decoded = decode_segment(segment).ok()?;
        if decoded.contains(['/', '\\', '\0']) {
            return None;
        }
        let mut components = Path::new(&decoded).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => target.push(part),
            _ => return None,
        }
        pushed = true;
    }

    pushed.then_some(target)
}

pub async fn lookup(public_dir: &Path, request_path: &str) -> AppResult<Option<StaticFile>> {
    let Some(path) = resolve_path(public_dir, request_path) else {
        return Ok(None);
    };

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "静态文件不可访问");
            }
            return Ok(None);
        }
    };
    if !metadata.is_file() {
        return Ok(None);
    }

    let content = tokio::fs::read(&path).await?;
    tracing::trace!(path = %path.display(), size = content.len(), "返回静态文件");

    Ok(Some(StaticFile {
        content: Bytes::from(content),
        content_type: content_type_for(&path),
    }))
}

pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
