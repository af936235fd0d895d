//! 单例子资源：地块、基础、屋架、屋面。
//!
//! 每个建筑至多一个实例；设置即整体覆盖（不做合并）。

use crate::Details;
use serde::{Deserialize, Serialize};

/// 土壤类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeSol {
    Argile,
    Sable,
    Roche,
    Limon,
    Gravier,
    Tourbe,
    Remblai,
    Mixte,
}

/// 基础类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFondation {
    SemellesFilantes,
    RadierGeneral,
    PieuxFores,
    PieuxBattus,
    Micropieux,
}

/// 屋架类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCharpente {
    Traditionnelle,
    FermettesIndustrielles,
    Metallique,
}

/// 屋顶形状。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormeToit {
    MonoPente,
    DeuxPentes,
    QuatrePentes,
}

/// 屋面材料。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeToiture {
    TuilesTerreCuite,
    ArdoisesNaturelles,
    Zinc,
    BacAcier,
    Shingle,
    Vegetalisee,
    Epdm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

/// 地块。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terrain {
    pub surface: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_parcelles_cadastrales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour: Option<Vec<Point3D>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_sol: Option<TypeSol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portance_sol: Option<f64>,
    #[serde(
        rename = "profondeurNappePhréatique",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profondeur_nappe_phreatique: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_argile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pente: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

/// 基础。
///
/// 鞋基、地梁、筏板、桩等技术细节保存在 `details` 中原样往返。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fondations {
    pub type_fondation: TypeFondation,
    pub profondeur: f64,
    #[serde(flatten)]
    pub details: Details,
}

/// 屋架。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charpente {
    #[serde(rename = "type")]
    pub type_charpente: TypeCharpente,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materiau: Option<String>,
    #[serde(flatten)]
    pub details: Details,
}

/// 屋面。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toiture {
    #[serde(rename = "type")]
    pub type_toiture: TypeToiture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forme: Option<FormeToit>,
    pub pente: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_totale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_ecran: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_faitage: Option<f64>,
    #[serde(flatten)]
    pub details: Details,
}

impl Fondations {
    pub fn new(type_fondation: TypeFondation, profondeur: f64) -> Self {
        Self {
            type_fondation,
            profondeur,
            details: Details::new(),
        }
    }
}

impl Charpente {
    pub fn new(type_charpente: TypeCharpente) -> Self {
        Self {
            type_charpente,
            materiau: None,
            details: Details::new(),
        }
    }
}

impl Toiture {
    pub fn new(type_toiture: TypeToiture, pente: f64) -> Self {
        Self {
            type_toiture,
            forme: None,
            pente,
            surface_totale: None,
            surface_ecran: None,
            altitude_faitage: None,
            details: Details::new(),
        }
    }
}
