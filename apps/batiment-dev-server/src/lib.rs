//! 本地开发服务：在内存实现之上暴露建筑 REST 契约（`/api` 前缀）。
//!
//! 仅用于本地联调与端到端测试，不是真正的持久化与校验引擎。

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use axum::{Router, middleware as axum_middleware, routing::get};
use batiment_client::BatimentApi;
use batiment_config::ClientConfig;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// 处理器共享状态。
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn BatimentApi>,
    /// 请求未携带 `size` 时的分页大小。
    pub default_page_size: u32,
    /// 设置后 `/api` 下的请求必须携带该 Bearer token。
    pub token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(api: Arc<dyn BatimentApi>) -> Self {
        Self {
            api,
            default_page_size: api_contract::DEFAULT_PAGE_SIZE,
            token: None,
        }
    }

    pub fn from_config(api: Arc<dyn BatimentApi>, config: &ClientConfig) -> Self {
        Self {
            api,
            default_page_size: config.default_page_size,
            token: config.dev_server_token.as_deref().map(Arc::from),
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(Arc::from(token));
        self
    }
}

/// 组装完整应用：`/health` + `/api/*`，外层注入请求追踪 ID。
pub fn app(state: AppState) -> Router {
    let api = routes::create_api_router().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::require_token,
    ));
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_context))
                .layer(TraceLayer::new_for_http()),
        )
}
