use crate::elements::{Charpente, Fondations, Terrain, Toiture};
use crate::niveau::Niveau;
use crate::systemes::{SystemeChauffage, SystemeElectrique, SystemePlomberie, SystemeVentilation};
use serde::{Deserialize, Serialize};

/// 建筑类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeBatiment {
    MaisonIndividuelle,
    Immeuble,
    BatimentAgricole,
    BatimentIndustriel,
}

/// 建筑状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutBatiment {
    #[default]
    Brouillon,
    EnCours,
    Valide,
    Archive,
}

/// 建筑聚合根。
///
/// 服务端每次写操作都返回完整聚合，它是变更后唯一可信的状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batiment {
    pub id: String,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_batiment: TypeBatiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modification: Option<String>,
    #[serde(default)]
    pub statut: StatutBatiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Terrain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fondations: Option<Fondations>,
    #[serde(default)]
    pub niveaux: Vec<Niveau>,
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

impl Batiment {
    /// 构造一个不含任何子元素的空建筑。
    pub fn empty(id: impl Into<String>, nom: impl Into<String>, type_batiment: TypeBatiment) -> Self {
        Self {
            id: id.into(),
            nom: nom.into(),
            type_batiment,
            adresse: None,
            date_creation: None,
            date_modification: None,
            statut: StatutBatiment::Brouillon,
            terrain: None,
            fondations: None,
            niveaux: Vec::new(),
            charpente: None,
            toiture: None,
            systeme_electrique: None,
            systeme_plomberie: None,
            systeme_chauffage: None,
            systeme_ventilation: None,
        }
    }

    /// 是否尚未挂载任何子元素。
    pub fn has_no_elements(&self) -> bool {
        self.terrain.is_none()
            && self.fondations.is_none()
            && self.niveaux.is_empty()
            && self.charpente.is_none()
            && self.toiture.is_none()
            && self.systeme_electrique.is_none()
            && self.systeme_plomberie.is_none()
            && self.systeme_chauffage.is_none()
            && self.systeme_ventilation.is_none()
    }

    /// 按 `numero` 排序的楼层视图（编号可重复或跳号，排序稳定）。
    pub fn niveaux_ordonnes(&self) -> Vec<&Niveau> {
        let mut niveaux: Vec<&Niveau> = self.niveaux.iter().collect();
        niveaux.sort_by_key(|niveau| niveau.numero);
        niveaux
    }

    pub fn niveau(&self, niveau_id: &str) -> Option<&Niveau> {
        self.niveaux.iter().find(|niveau| niveau.id == niveau_id)
    }

    pub fn niveau_mut(&mut self, niveau_id: &str) -> Option<&mut Niveau> {
        self.niveaux.iter_mut().find(|niveau| niveau.id == niveau_id)
    }
}
