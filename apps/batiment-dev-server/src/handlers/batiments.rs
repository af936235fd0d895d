//! 建筑资源 handlers
//!
//! - POST /batiments/init - 以名称和类型创建空建筑
//! - GET /batiments - 过滤 + 分页列表
//! - GET /batiments/all - 不分页的完整列表
//! - GET/PUT/DELETE /batiments/{id}
//! - POST /batiments?validate= - 创建
//! - POST /batiments/{id}/duplicate - 复制（可指定新名称）
//! - GET /batiments/{id}/validate - 校验报告

use super::BatimentPath;
use crate::AppState;
use crate::utils::response::{api_error, json_result};
use api_contract::{
    BatimentFilters, BatimentInitRequest, BatimentUpsertRequest, DuplicateRequest, Pagination,
    ValidateQuery,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{StatutBatiment, TypeBatiment};
use serde::Deserialize;
use tracing::info;

/// `GET /batiments` 的查询参数（扁平结构，便于查询串反序列化）。
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub nom: Option<String>,
    #[serde(rename = "type")]
    pub type_batiment: Option<TypeBatiment>,
    pub statut: Option<StatutBatiment>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl ListParams {
    fn split(self, default_page_size: u32) -> (BatimentFilters, Pagination) {
        let filters = BatimentFilters {
            nom: self.nom.filter(|nom| !nom.trim().is_empty()),
            type_batiment: self.type_batiment,
            statut: self.statut,
        };
        let mut pagination = Pagination::new(
            self.page.unwrap_or(0),
            self.size.filter(|size| *size > 0).unwrap_or(default_page_size),
        );
        pagination.sort = self.sort.filter(|sort| !sort.is_empty());
        (filters, pagination)
    }
}

pub async fn init_batiment(
    State(state): State<AppState>,
    Json(req): Json<BatimentInitRequest>,
) -> Response {
    let result = state.api.init(&req.nom, req.type_batiment).await;
    if let Ok(batiment) = &result {
        info!(target: "batiment.server", batiment_id = %batiment.id, "building initialised");
    }
    json_result(result)
}

pub async fn list_batiments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let (filters, pagination) = params.split(state.default_page_size);
    json_result(state.api.list(&filters, &pagination).await)
}

pub async fn list_all_batiments(State(state): State<AppState>) -> Response {
    json_result(state.api.list_all().await)
}

pub async fn get_batiment(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
) -> Response {
    json_result(state.api.get(&path.id).await)
}

pub async fn create_batiment(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
    Json(req): Json<BatimentUpsertRequest>,
) -> Response {
    let result = state.api.create(&req, query.validate).await;
    if let Ok(batiment) = &result {
        info!(target: "batiment.server", batiment_id = %batiment.id, "building created");
    }
    json_result(result)
}

pub async fn update_batiment(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Query(query): Query<ValidateQuery>,
    Json(req): Json<BatimentUpsertRequest>,
) -> Response {
    json_result(state.api.update(&path.id, &req, query.validate).await)
}

pub async fn delete_batiment(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
) -> Response {
    match state.api.delete(&path.id).await {
        Ok(()) => {
            info!(target: "batiment.server", batiment_id = %path.id, "building deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => api_error(err),
    }
}

/// 请求体可省略，省略时使用默认名称。
pub async fn duplicate_batiment(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    body: Option<Json<DuplicateRequest>>,
) -> Response {
    let nouveau_nom = body.and_then(|Json(req)| req.nouveau_nom);
    json_result(state.api.duplicate(&path.id, nouveau_nom.as_deref()).await)
}

pub async fn validate_batiment(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
) -> Response {
    json_result(state.api.validate(&path.id).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_fall_back_to_default_size() {
        let params = ListParams {
            nom: Some("  ".to_string()),
            size: Some(0),
            ..ListParams::default()
        };
        let (filters, pagination) = params.split(15);
        assert!(filters.nom.is_none());
        assert_eq!(pagination.page, 0);
        assert_eq!(pagination.size, 15);
    }
}
