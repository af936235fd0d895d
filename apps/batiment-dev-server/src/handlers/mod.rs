//! Handlers 模块

pub mod batiments;
pub mod elements;
pub mod niveaux;

pub use batiments::*;
pub use elements::*;
pub use niveaux::*;

use axum::{Json, response::IntoResponse};
use serde::Deserialize;

/// 健康检查端点
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

#[derive(Debug, Deserialize)]
pub struct BatimentPath {
    pub id: String,
}
