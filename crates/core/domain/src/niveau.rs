//! 楼层及其子集合：房间、墙体（含开口）、隔墙、楼板、竖井洞口。

use crate::Details;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeMur {
    MurPorteur,
    MurRefend,
    Cloison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MateriauMur {
    Parpaings,
    BriqueMonomur,
    BetonBanche,
    OssatureBois,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrientationMur {
    Nord,
    Sud,
    Est,
    Ouest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypePiece {
    Salon,
    Cuisine,
    Chambre,
    SalleDeBain,
    Wc,
    Couloir,
    Grenier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypePlancher {
    HourdisPoutrelles,
    DallePleineBeton,
    PlancherBois,
    Clt,
}

/// 隔墙类型（与墙体类型是两套独立枚举）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCloison {
    PlaquePlatre,
    CarreauPlatre,
    BriquePlatriere,
    OssatureBois,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeOuverture {
    Fenetre,
    Porte,
    PorteFenetre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeTremie {
    Escalier,
    Technique,
}

/// 房间。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: String,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_piece: TypePiece,
    pub surface: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hauteur_sous_plafond: Option<f64>,
}

/// 墙上开口（门窗），归属于所在墙体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ouverture {
    pub id: String,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_ouverture: TypeOuverture,
    pub largeur: f64,
    pub hauteur: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_mur: Option<String>,
}

/// 墙体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mur {
    pub id: String,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub porteur: Option<bool>,
    #[serde(default)]
    pub ouvertures: Vec<Ouverture>,
    #[serde(flatten)]
    pub details: Details,
}

/// 隔墙。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloison {
    pub id: String,
    pub longueur: f64,
    pub hauteur: f64,
    pub epaisseur: f64,
    #[serde(rename = "type")]
    pub type_cloison: TypeCloison,
}

/// 楼板。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plancher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_plancher: TypePlancher,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epaisseur: Option<f64>,
}

/// 竖井洞口（楼梯井、技术井）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tremie {
    pub id: String,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_tremie: TypeTremie,
    pub surface: f64,
}

/// 楼层。
///
/// `numero` 由用户指定，可重复或跳号；客户端不做唯一性约束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Niveau {
    pub id: String,
    pub nom: String,
    pub numero: i32,
    pub altitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_plancher: Option<f64>,
    pub hauteur_sous_plafond: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<f64>,
    #[serde(default)]
    pub pieces: Vec<Piece>,
    #[serde(default)]
    pub murs: Vec<Mur>,
    #[serde(default)]
    pub cloisons: Vec<Cloison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plancher: Option<Plancher>,
    #[serde(default)]
    pub tremies: Vec<Tremie>,
}

impl Niveau {
    pub fn mur(&self, mur_id: &str) -> Option<&Mur> {
        self.murs.iter().find(|mur| mur.id == mur_id)
    }

    pub fn mur_mut(&mut self, mur_id: &str) -> Option<&mut Mur> {
        self.murs.iter_mut().find(|mur| mur.id == mur_id)
    }
}
