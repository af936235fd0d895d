//! 路由定义
//!
//! 集中管理 `/api` 下的全部路由：
//! - 建筑：/batiments, /batiments/init, /batiments/all, /batiments/:id
//! - 单例子资源：/batiments/:id/{terrain,fondations,charpente,toiture,systeme-*}
//! - 楼层：/batiments/:id/niveaux[/:niveau_id[/duplicate]]
//! - 楼层下的集合：pieces, murs, cloisons；墙体下的 ouvertures

use crate::AppState;
use crate::handlers::*;
use axum::{
    Router,
    routing::{get, post, put},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/batiments", get(list_batiments).post(create_batiment))
        .route("/batiments/init", post(init_batiment))
        .route("/batiments/all", get(list_all_batiments))
        .route(
            "/batiments/:id",
            get(get_batiment).put(update_batiment).delete(delete_batiment),
        )
        .route("/batiments/:id/duplicate", post(duplicate_batiment))
        .route("/batiments/:id/validate", get(validate_batiment))
        .route(
            "/batiments/:id/terrain",
            put(set_terrain).delete(delete_terrain),
        )
        .route(
            "/batiments/:id/fondations",
            put(set_fondations).delete(delete_fondations),
        )
        .route("/batiments/:id/charpente", put(set_charpente))
        .route("/batiments/:id/toiture", put(set_toiture))
        .route(
            "/batiments/:id/systeme-electrique",
            put(set_systeme_electrique),
        )
        .route(
            "/batiments/:id/systeme-plomberie",
            put(set_systeme_plomberie),
        )
        .route(
            "/batiments/:id/systeme-chauffage",
            put(set_systeme_chauffage),
        )
        .route(
            "/batiments/:id/systeme-ventilation",
            put(set_systeme_ventilation),
        )
        .route("/batiments/:id/niveaux", post(add_niveau))
        .route(
            "/batiments/:id/niveaux/:niveau_id",
            put(update_niveau).delete(delete_niveau),
        )
        .route(
            "/batiments/:id/niveaux/:niveau_id/duplicate",
            post(duplicate_niveau),
        )
        .route("/batiments/:id/niveaux/:niveau_id/pieces", post(add_piece))
        .route(
            "/batiments/:id/niveaux/:niveau_id/pieces/:piece_id",
            put(update_piece).delete(delete_piece),
        )
        .route("/batiments/:id/niveaux/:niveau_id/murs", post(add_mur))
        .route(
            "/batiments/:id/niveaux/:niveau_id/murs/:mur_id",
            put(update_mur).delete(delete_mur),
        )
        .route(
            "/batiments/:id/niveaux/:niveau_id/cloisons",
            post(add_cloison),
        )
        .route(
            "/batiments/:id/niveaux/:niveau_id/cloisons/:cloison_id",
            put(update_cloison).delete(delete_cloison),
        )
        .route(
            "/batiments/:id/niveaux/:niveau_id/murs/:mur_id/ouvertures",
            post(add_ouverture),
        )
        .route(
            "/batiments/:id/niveaux/:niveau_id/murs/:mur_id/ouvertures/:ouverture_id",
            put(update_ouverture).delete(delete_ouverture),
        )
}
