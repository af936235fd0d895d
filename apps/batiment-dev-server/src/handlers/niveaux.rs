//! 楼层与嵌套集合 handlers
//!
//! - /batiments/{id}/niveaux[/{niveauId}[/duplicate]]
//! - 楼层下：pieces、murs、cloisons
//! - 墙体下：ouvertures
//!
//! 子资源只能经由所属建筑的路径访问；路径中任一级不存在时返回 404。

use super::BatimentPath;
use crate::AppState;
use crate::utils::response::json_result;
use api_contract::{CloisonPayload, MurPayload, NiveauPayload, OuverturePayload, PiecePayload};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NiveauPath {
    pub id: String,
    pub niveau_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PiecePath {
    pub id: String,
    pub niveau_id: String,
    pub piece_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MurPath {
    pub id: String,
    pub niveau_id: String,
    pub mur_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CloisonPath {
    pub id: String,
    pub niveau_id: String,
    pub cloison_id: String,
}

#[derive(Debug, Deserialize)]
pub struct OuverturePath {
    pub id: String,
    pub niveau_id: String,
    pub mur_id: String,
    pub ouverture_id: String,
}

pub async fn add_niveau(
    State(state): State<AppState>,
    Path(path): Path<BatimentPath>,
    Json(payload): Json<NiveauPayload>,
) -> Response {
    json_result(state.api.add_niveau(&path.id, &payload).await)
}

pub async fn update_niveau(
    State(state): State<AppState>,
    Path(path): Path<NiveauPath>,
    Json(payload): Json<NiveauPayload>,
) -> Response {
    json_result(
        state
            .api
            .update_niveau(&path.id, &path.niveau_id, &payload)
            .await,
    )
}

pub async fn delete_niveau(State(state): State<AppState>, Path(path): Path<NiveauPath>) -> Response {
    json_result(state.api.delete_niveau(&path.id, &path.niveau_id).await)
}

pub async fn duplicate_niveau(
    State(state): State<AppState>,
    Path(path): Path<NiveauPath>,
) -> Response {
    json_result(state.api.duplicate_niveau(&path.id, &path.niveau_id).await)
}

pub async fn add_piece(
    State(state): State<AppState>,
    Path(path): Path<NiveauPath>,
    Json(payload): Json<PiecePayload>,
) -> Response {
    json_result(
        state
            .api
            .add_piece(&path.id, &path.niveau_id, &payload)
            .await,
    )
}

pub async fn update_piece(
    State(state): State<AppState>,
    Path(path): Path<PiecePath>,
    Json(payload): Json<PiecePayload>,
) -> Response {
    json_result(
        state
            .api
            .update_piece(&path.id, &path.niveau_id, &path.piece_id, &payload)
            .await,
    )
}

pub async fn delete_piece(State(state): State<AppState>, Path(path): Path<PiecePath>) -> Response {
    json_result(
        state
            .api
            .delete_piece(&path.id, &path.niveau_id, &path.piece_id)
            .await,
    )
}

pub async fn add_mur(
    State(state): State<AppState>,
    Path(path): Path<NiveauPath>,
    Json(payload): Json<MurPayload>,
) -> Response {
    json_result(state.api.add_mur(&path.id, &path.niveau_id, &payload).await)
}

pub async fn update_mur(
    State(state): State<AppState>,
    Path(path): Path<MurPath>,
    Json(payload): Json<MurPayload>,
) -> Response {
    json_result(
        state
            .api
            .update_mur(&path.id, &path.niveau_id, &path.mur_id, &payload)
            .await,
    )
}

pub async fn delete_mur(State(state): State<AppState>, Path(path): Path<MurPath>) -> Response {
    json_result(
        state
            .api
            .delete_mur(&path.id, &path.niveau_id, &path.mur_id)
            .await,
    )
}

pub async fn add_cloison(
    State(state): State<AppState>,
    Path(path): Path<NiveauPath>,
    Json(payload): Json<CloisonPayload>,
) -> Response {
    json_result(
        state
            .api
            .add_cloison(&path.id, &path.niveau_id, &payload)
            .await,
    )
}

pub async fn update_cloison(
    State(state): State<AppState>,
    Path(path): Path<CloisonPath>,
    Json(payload): Json<CloisonPayload>,
) -> Response {
    json_result(
        state
            .api
            .update_cloison(&path.id, &path.niveau_id, &path.cloison_id, &payload)
            .await,
    )
}

pub async fn delete_cloison(
    State(state): State<AppState>,
    Path(path): Path<CloisonPath>,
) -> Response {
    json_result(
        state
            .api
            .delete_cloison(&path.id, &path.niveau_id, &path.cloison_id)
            .await,
    )
}

pub async fn add_ouverture(
    State(state): State<AppState>,
    Path(path): Path<MurPath>,
    Json(payload): Json<OuverturePayload>,
) -> Response {
    json_result(
        state
            .api
            .add_ouverture(&path.id, &path.niveau_id, &path.mur_id, &payload)
            .await,
    )
}

pub async fn update_ouverture(
    State(state): State<AppState>,
    Path(path): Path<OuverturePath>,
    Json(payload): Json<OuverturePayload>,
) -> Response {
    json_result(
        state
            .api
            .update_ouverture(
                &path.id,
                &path.niveau_id,
                &path.mur_id,
                &path.ouverture_id,
                &payload,
            )
            .await,
    )
}

pub async fn delete_ouverture(
    State(state): State<AppState>,
    Path(path): Path<OuverturePath>,
) -> Response {
    json_result(
        state
            .api
            .delete_ouverture(&path.id, &path.niveau_id, &path.mur_id, &path.ouverture_id)
            .await,
    )
}
