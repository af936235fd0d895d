//! 向导表单数据，每个步骤一个分节，字段全部可选直到校验通过。

use domain::{
    FormeToit, TypeBatiment, TypeEnergie, TypeFondation, TypeGenerateurChauffage,
    TypeProductionEauChaude, TypeSol, TypeSystemeElectrique, TypeToiture, TypeVentilation,
};
use serde::{Deserialize, Serialize};

/// 建筑平面形状（仅向导使用，不发送到服务端）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormeBatiment {
    I,
    L,
    T,
    U,
    O,
    Rectangulaire,
    Carre,
    Personnalise,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSection {
    pub nom: Option<String>,
    #[serde(rename = "type")]
    pub type_batiment: Option<TypeBatiment>,
    pub forme: Option<FormeBatiment>,
    pub adresse: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionsSection {
    pub longueur: Option<f64>,
    pub largeur: Option<f64>,
    pub hauteur: Option<f64>,
    pub nombre_niveaux: Option<u32>,
    pub hauteur_sous_plafond: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainSection {
    pub surface: Option<f64>,
    pub type_sol: Option<TypeSol>,
    pub altitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FondationsSection {
    #[serde(rename = "type")]
    pub type_fondation: Option<TypeFondation>,
    pub profondeur: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToitureSection {
    #[serde(rename = "type")]
    pub type_toiture: Option<TypeToiture>,
    pub forme: Option<FormeToit>,
    pub pente: Option<f64>,
    pub surface_totale: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectriqueSection {
    pub puissance_abonnement: Option<f64>,
    /// 配电箱类型；填写时才生成配电箱。
    #[serde(rename = "type")]
    pub type_tableau: Option<TypeSystemeElectrique>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChauffageSection {
    #[serde(rename = "type")]
    pub type_generateur: Option<TypeGenerateurChauffage>,
    pub energie: Option<TypeEnergie>,
    pub puissance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentilationSection {
    #[serde(rename = "type")]
    pub type_ventilation: Option<TypeVentilation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlomberieSection {
    pub type_production_eau_chaude: Option<TypeProductionEauChaude>,
    pub capacite: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemesSection {
    pub electrique: ElectriqueSection,
    pub chauffage: ChauffageSection,
    pub ventilation: VentilationSection,
    pub plomberie: PlomberieSection,
}

/// 向导的完整本地数据。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardData {
    pub general: GeneralSection,
    pub dimensions: DimensionsSection,
    pub terrain: TerrainSection,
    pub fondations: FondationsSection,
    pub toiture: ToitureSection,
    pub systemes: SystemesSection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_use_wire_names() {
        let mut data = WizardData::default();
        data.general.forme = Some(FormeBatiment::Rectangulaire);
        data.dimensions.nombre_niveaux = Some(2);
        data.systemes.plomberie.type_production_eau_chaude =
            Some(TypeProductionEauChaude::BallonThermodynamique);

        let value = serde_json::to_value(&data).expect("serialize");
        assert_eq!(value["general"]["forme"], "RECTANGULAIRE");
        assert_eq!(value["dimensions"]["nombreNiveaux"], 2);
        assert_eq!(
            value["systemes"]["plomberie"]["typeProductionEauChaude"],
            "BALLON_THERMODYNAMIQUE"
        );
    }
}
