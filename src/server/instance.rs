// HTTP 服务实例
//
// ContactServer 负责：
// - 绑定监听地址（端口为 0 时由系统分配）
// - 接受连接，每个连接一个 tokio 任务，使用 hyper http1 处理
// - 停止时中止接受循环

use anyhow::{Context, Result};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::handlers::{dispatch, AppState};
use crate::models::ServerConfig;

pub struct ContactServer {
    state: Arc<AppState>,
    host: String,
    port: u16,
    server_handle: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl ContactServer {
    pub fn new(state: AppState, config: &ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            host: config.host.clone(),
            port: config.port,
            server_handle: Arc::new(RwLock::new(None)),
        }
    }

    /// 启动服务，返回实际绑定的地址
    pub async fn start(&self) -> Result<SocketAddr> {
        let mut handle = self.server_handle.write().await;
        if handle.is_some() {
            anyhow::bail!("服务已在运行");
        }

        let listener = TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("绑定地址 {}:{} 失败", self.host, self.port))?;
        let addr = listener.local_addr().context("读取监听地址失败")?;

        tracing::info!(addr = %addr, "服务启动");

        let state = Arc::clone(&self.state);
        *handle = Some(tokio::spawn(accept_loop(listener, state)));

        Ok(addr)
    }

    /// 停止服务（已建立的连接由各自的任务处理完毕）
    pub async fn stop(&self) -> Result<()> {
        let handle = self.server_handle.write().await.take();

        if let Some(handle) = handle {
            handle.abort();
            tracing::info!("服务已停止");
        }

        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.server_handle
            .read()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

async fn accept_loop(listener: TcpListener, state: Arc<AppState>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "接受连接失败");
                continue;
            }
        };

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req: Request<Incoming>| {
                let state = Arc::clone(&state);
                async move { Ok::<_, Infallible>(dispatch(&state, req).await) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                tracing::debug!(peer = %peer, error = ?e, "连接处理失败");
            }
        });
    }
}
