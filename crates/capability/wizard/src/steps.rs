//! 向导步骤与逐步校验。
//!
//! 错误字段使用带分节前缀的路径，例如 `dimensions.nombreNiveaux`。

use crate::model::WizardData;
use batiment_editor::FieldErrors;

const NOM_MAX: usize = 100;
const ADRESSE_MAX: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    General,
    Dimensions,
    Terrain,
    Fondations,
    Toiture,
    Systemes,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::General,
        WizardStep::Dimensions,
        WizardStep::Terrain,
        WizardStep::Fondations,
        WizardStep::Toiture,
        WizardStep::Systemes,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::General => "Informations générales",
            WizardStep::Dimensions => "Dimensions",
            WizardStep::Terrain => "Terrain",
            WizardStep::Fondations => "Fondations",
            WizardStep::Toiture => "Toiture",
            WizardStep::Systemes => "Systèmes",
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|index| Self::ALL[index])
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// 只校验本步骤拥有的字段。
    pub fn validate(self, data: &WizardData) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        match self {
            WizardStep::General => {
                let general = &data.general;
                errors.required_text("general.nom", general.nom.as_deref());
                errors.max_len("general.nom", general.nom.as_deref().map(str::trim), NOM_MAX);
                errors.required("general.type", general.type_batiment);
                errors.required("general.forme", general.forme);
                errors.max_len("general.adresse", general.adresse.as_deref(), ADRESSE_MAX);
            }
            WizardStep::Dimensions => {
                let dimensions = &data.dimensions;
                errors.required_min("dimensions.longueur", dimensions.longueur, 0.1);
                errors.required_min("dimensions.largeur", dimensions.largeur, 0.1);
                errors.min("dimensions.hauteur", dimensions.hauteur, 0.0);
                errors.required_range(
                    "dimensions.nombreNiveaux",
                    dimensions.nombre_niveaux.map(f64::from),
                    1.0,
                    50.0,
                );
                errors.required_range(
                    "dimensions.hauteurSousPlafond",
                    dimensions.hauteur_sous_plafond,
                    2.0,
                    10.0,
                );
            }
            WizardStep::Terrain => {
                errors.required_min("terrain.surface", data.terrain.surface, 1.0);
                errors.required("terrain.typeSol", data.terrain.type_sol);
            }
            WizardStep::Fondations => {
                errors.required("fondations.type", data.fondations.type_fondation);
                errors.required_range("fondations.profondeur", data.fondations.profondeur, 0.1, 20.0);
            }
            WizardStep::Toiture => {
                let toiture = &data.toiture;
                errors.required("toiture.type", toiture.type_toiture);
                errors.required_range("toiture.pente", toiture.pente, 0.0, 90.0);
                errors.min("toiture.surfaceTotale", toiture.surface_totale, 0.0);
            }
            WizardStep::Systemes => {
                let systemes = &data.systemes;
                errors.min(
                    "systemes.electrique.puissanceAbonnement",
                    systemes.electrique.puissance_abonnement,
                    0.0,
                );
                errors.min("systemes.chauffage.puissance", systemes.chauffage.puissance, 0.0);
                errors.min("systemes.plomberie.capacite", systemes.plomberie.capacite, 0.0);
            }
        }
        errors.finish(|| Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormeBatiment;
    use domain::TypeBatiment;

    #[test]
    fn navigation_is_linear() {
        assert_eq!(WizardStep::General.prev(), None);
        assert_eq!(WizardStep::General.next(), Some(WizardStep::Dimensions));
        assert_eq!(WizardStep::Systemes.next(), None);
        assert!(WizardStep::Systemes.is_last());
        assert_eq!(WizardStep::Toiture.index(), 4);
    }

    #[test]
    fn general_requires_name_type_and_shape() {
        let mut data = WizardData::default();
        data.general.nom = Some("   ".to_string());
        let errors = WizardStep::General.validate(&data).expect_err("invalid");
        assert!(errors.get("general.nom").is_some());
        assert!(errors.get("general.type").is_some());
        assert!(errors.get("general.forme").is_some());

        data.general.nom = Some("Maison".to_string());
        data.general.type_batiment = Some(TypeBatiment::MaisonIndividuelle);
        data.general.forme = Some(FormeBatiment::L);
        assert!(WizardStep::General.validate(&data).is_ok());

        data.general.adresse = Some("x".repeat(201));
        let errors = WizardStep::General.validate(&data).expect_err("too long");
        assert!(errors.get("general.adresse").is_some());
    }

    #[test]
    fn dimensions_bounds() {
        let mut data = WizardData::default();
        data.dimensions.longueur = Some(10.0);
        data.dimensions.largeur = Some(8.0);
        data.dimensions.nombre_niveaux = Some(51);
        data.dimensions.hauteur_sous_plafond = Some(1.5);
        let errors = WizardStep::Dimensions.validate(&data).expect_err("invalid");
        assert!(errors.get("dimensions.nombreNiveaux").is_some());
        assert!(errors.get("dimensions.hauteurSousPlafond").is_some());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn systems_are_optional() {
        assert!(WizardStep::Systemes.validate(&WizardData::default()).is_ok());
        let mut data = WizardData::default();
        data.systemes.plomberie.capacite = Some(-1.0);
        assert!(WizardStep::Systemes.validate(&data).is_err());
    }
}
