use anyhow::Context;
use contactbook::{
    init_logger, load_config, AppState, ContactServer, JsonContactStore, SessionManager,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("加载配置失败")?;
    init_logger(&config.log)?;

    let store = JsonContactStore::open(&config.store).context("初始化联系人存储失败")?;
    tracing::info!(path = %store.path().display(), "联系人存储就绪");

    let sessions = SessionManager::new(&config.session);
    let state = AppState::new(Arc::new(store), Arc::new(sessions), &config.server);
    let server = ContactServer::new(state, &config.server);

    let addr = server.start().await?;
    tracing::info!("Server listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .context("监听退出信号失败")?;
    tracing::info!("收到退出信号，正在关闭");

    server.stop().await
}
