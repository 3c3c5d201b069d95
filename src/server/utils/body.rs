//! HTTP Body 类型定义
//!
//! 统一的 BoxBody 实现，所有响应（页面、重定向、静态文件、错误）都使用它。

use bytes::Bytes;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::{Body, Frame};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pin_project! {
    pub struct BoxBody {
        #[pin]
        inner: Pin<Box<dyn Body<Data = Bytes, Error = BoxError> + Send>>,
    }
}

impl Body for BoxBody {
    type Data = Bytes;
    type Error = BoxError;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        self.project().inner.poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> hyper::body::SizeHint {
        self.inner.size_hint()
    }
}

/// 创建 BoxBody 的辅助函数
pub fn box_body<B>(body: B) -> BoxBody
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    BoxBody {
        inner: Box::pin(body.map_err(Into::into)),
    }
}

/// 完整内容的响应体
pub fn full(content: impl Into<Bytes>) -> BoxBody {
    box_body(Full::new(content.into()))
}

/// 空响应体（重定向、HEAD 请求）
pub fn empty() -> BoxBody {
    box_body(Empty::<Bytes>::new())
}
