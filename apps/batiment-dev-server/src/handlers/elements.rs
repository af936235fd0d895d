//! 单例子资源 handlers
//!
//! PUT 为整体覆盖；只有地块与基础提供 DELETE。每个写操作都返回完整建筑。

use super::BatimentPath;
use crate::AppState;
use crate::utils::response::json_result;
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use domain::{
    Charpente, Fondations, SystemeChauffage, SystemeElectrique, SystemePlomberie,
    SystemeVentilation, Terrain, Toiture,
};

pub async fn set_terrain(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(terrain): Json<Terrain>,
) -> Response {
    json_result(state.api.set_terrain(&path.id, &terrain).await)
}

pub async fn delete_terrain(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
) -> Response {
    json_result(state.api.delete_terrain(&path.id).await)
}

pub async fn set_fondations(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(fondations): Json<Fondations>,
) -> Response {
    json_result(state.api.set_fondations(&path.id, &fondations).await)
}

pub async fn delete_fondations(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
) -> Response {
    json_result(state.api.delete_fondations(&path.id).await)
}

pub async fn set_charpente(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(charpente): Json<Charpente>,
) -> Response {
    json_result(state.api.set_charpente(&path.id, &charpente).await)
}

pub async fn set_toiture(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(toiture): Json<Toiture>,
) -> Response {
    json_result(state.api.set_toiture(&path.id, &toiture).await)
}

pub async fn set_systeme_electrique(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(systeme): Json<SystemeElectrique>,
) -> Response {
    json_result(state.api.set_systeme_electrique(&path.id, &systeme).await)
}

pub async fn set_systeme_plomberie(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(systeme): Json<SystemePlomberie>,
) -> Response {
    json_result(state.api.set_systeme_plomberie(&path.id, &systeme).await)
}

pub async fn set_systeme_chauffage(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(systeme): Json<SystemeChauffage>,
) -> Response {
    json_result(state.api.set_systeme_chauffage(&path.id, &systeme).await)
}

pub async fn set_systeme_ventilation(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(systeme): Json<SystemeVentilation>,
) -> Response {
    json_result(state.api.set_systeme_ventilation(&path.id, &systeme).await)
}
