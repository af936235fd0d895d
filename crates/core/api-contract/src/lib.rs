//! 稳定的 DTO 与 REST 契约（基础路径 `/api`）。
//!
//! 所有写操作都返回完整的 `Batiment` 聚合；这里只定义请求体、查询参数、
//! 分页与错误结构。

use domain::{
    Charpente, Fondations, MateriauMur, OrientationMur, StatutBatiment, SystemeChauffage,
    SystemeElectrique, SystemePlomberie, SystemeVentilation, Terrain, Toiture, TypeBatiment,
    TypeCloison, TypeMur, TypeOuverture, TypePiece,
};
use serde::{Deserialize, Serialize};

/// 默认分页大小。
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// 服务端未给出消息时的默认错误文案。
pub const DEFAULT_ERROR_MESSAGE: &str = "Une erreur est survenue";

/// `POST /batiments/init` 请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatimentInitRequest {
    pub nom: String,
    #[serde(rename = "type")]
    pub type_batiment: TypeBatiment,
}

/// `POST /batiments` 与 `PUT /batiments/{id}` 请求体。
///
/// 楼层通过嵌套端点维护，不在此处提交。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatimentUpsertRequest {
    pub nom: String,
    #[serde(rename = "type")]
    pub type_batiment: TypeBatiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut: Option<StatutBatiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Terrain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fondations: Option<Fondations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charpente: Option<Charpente>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toiture: Option<Toiture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systeme_electrique: Option<SystemeElectrique>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systeme_plomberie: Option<SystemePlomberie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systeme_chauffage: Option<SystemeChauffage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systeme_ventilation: Option<SystemeVentilation>,
}

impl BatimentUpsertRequest {
    /// 仅含基本信息的请求体。
    pub fn basic(nom: impl Into<String>, type_batiment: TypeBatiment, adresse: Option<String>) -> Self {
        Self {
            nom: nom.into(),
            type_batiment,
            adresse,
            statut: None,
            terrain: None,
            fondations: None,
            charpente: None,
            toiture: None,
            systeme_electrique: None,
            systeme_plomberie: None,
            systeme_chauffage: None,
            systeme_ventilation: None,
        }
    }
}

/// `POST /batiments/{id}/duplicate` 请求体。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nouveau_nom: Option<String>,
}

/// `?validate=` 查询参数。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidateQuery {
    #[serde(default)]
    pub validate: bool,
}

/// 列表过滤条件（稀疏可选）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatimentFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_batiment: Option<TypeBatiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut: Option<StatutBatiment>,
}

/// 分页参数：页码从 0 开始。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }
}

/// `GET /batiments` 的完整查询串（过滤 + 分页）。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(flatten)]
    pub filters: BatimentFilters,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// 分页响应。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
}

impl<T> Page<T> {
    /// 从完整有序集合切出一页。
    pub fn slice(items: Vec<T>, pagination: &Pagination) -> Self {
        let total_elements = items.len() as u64;
        let size = pagination.size.max(1);
        let total_pages = items.len().div_ceil(size as usize) as u32;
        let start = (pagination.page as usize).saturating_mul(size as usize);
        let content = items.into_iter().skip(start).take(size as usize).collect();
        Self {
            content,
            total_elements,
            total_pages,
            size,
            number: pagination.page,
        }
    }
}

/// 字段级校验错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 非 2xx 响应的错误体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// 楼层新增/更新请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NiveauPayload {
    pub nom: String,
    pub numero: i32,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_plancher: Option<f64>,
    pub hauteur_sous_plafond: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<f64>,
}

/// 房间新增/更新请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiecePayload {
    pub nom: String,
    #[serde(rename = "type")]
    pub type_piece: TypePiece,
    pub surface: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hauteur_sous_plafond: Option<f64>,
}

/// 墙体新增/更新请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MurPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    pub longueur: f64,
    pub hauteur: f64,
    pub epaisseur: f64,
    #[serde(rename = "type")]
    pub type_mur: TypeMur,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materiau: Option<MateriauMur>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationMur>,
}

/// 隔墙新增/更新请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloisonPayload {
    pub longueur: f64,
    pub hauteur: f64,
    pub epaisseur: f64,
    #[serde(rename = "type")]
    pub type_cloison: TypeCloison,
}

/// 开口新增/更新请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuverturePayload {
    pub nom: String,
    #[serde(rename = "type")]
    pub type_ouverture: TypeOuverture,
    pub largeur: f64,
    pub hauteur: f64,
}
