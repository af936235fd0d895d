//! 技术系统：电气、给排水、供暖、通风。
//!
//! 仅暴露覆盖语义（PUT），没有独立的删除端点。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeSystemeElectrique {
    Monophase,
    Triphase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeProductionEauChaude {
    ChauffeEauElectrique,
    ChauffeEauGaz,
    BallonThermodynamique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeGenerateurChauffage {
    ChaudiereGaz,
    ChaudiereFioul,
    PompeAChaleur,
    PoeleBois,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeEnergie {
    Gaz,
    Fioul,
    #[default]
    Electricite,
    Bois,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeVentilation {
    VmcSimpleFlux,
    VmcDoubleFlux,
    VentilationNaturelle,
}

/// 配电箱。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableauElectrique {
    pub puissance: f64,
    pub nombre_circuits: u32,
    #[serde(rename = "type")]
    pub type_tableau: TypeSystemeElectrique,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemeElectrique {
    pub puissance_abonnement: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tableau_electrique: Option<TableauElectrique>,
}

/// 热水生产设备。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEauChaude {
    #[serde(rename = "type")]
    pub type_production: TypeProductionEauChaude,
    pub capacite: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puissance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemePlomberie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseau_distribution: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseau_evacuation: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_eau_chaude: Option<ProductionEauChaude>,
}

/// 供暖热源。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateurChauffage {
    #[serde(rename = "type")]
    pub type_generateur: TypeGenerateurChauffage,
    pub puissance: f64,
    pub energie: TypeEnergie,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendement: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemeChauffage {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_chauffage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generateur: Option<GenerateurChauffage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemeVentilation {
    #[serde(rename = "type")]
    pub type_ventilation: TypeVentilation,
}
