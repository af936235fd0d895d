//! 本地开发服务入口。

use batiment_client::{BatimentApi, InMemoryBatimentApi};
use batiment_config::ClientConfig;
use batiment_dev_server::{AppState, app};
use batiment_telemetry::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）并读取运行配置
    let config = ClientConfig::load()?;
    // 初始化结构化日志
    init_tracing();

    let api: Arc<dyn BatimentApi> = Arc::new(InMemoryBatimentApi::new());
    let state = AppState::from_config(api, &config);

    let listener = tokio::net::TcpListener::bind(&config.dev_server_addr).await?;
    info!(
        target: "batiment.server",
        addr = %config.dev_server_addr,
        auth = config.dev_server_token.is_some(),
        "dev server listening"
    );
    axum::serve(listener, app(state)).await?;
    Ok(())
}
