//! 各单例子资源的草稿、本地校验与保存调用。
//!
//! 删除只对地块与基础开放；屋架、屋面与四个技术系统只有覆盖语义。

use crate::ApiFuture;
use crate::form::{DeletableElement, ElementSpec};
use crate::rules::FieldErrors;
use batiment_client::{ApiOperation, BatimentApi};
use domain::{
    Batiment, Charpente, Details, Fondations, FormeToit, GenerateurChauffage, Point3D,
    ProductionEauChaude, SystemeChauffage, SystemeElectrique, SystemePlomberie,
    SystemeVentilation, TableauElectrique, Terrain, Toiture, TypeCharpente, TypeEnergie,
    TypeFondation, TypeGenerateurChauffage, TypeProductionEauChaude, TypeSol,
    TypeSystemeElectrique, TypeToiture, TypeVentilation,
};

pub type TerrainForm = crate::form::ElementForm<TerrainSpec>;
pub type FondationsForm = crate::form::ElementForm<FondationsSpec>;
pub type CharpenteForm = crate::form::ElementForm<CharpenteSpec>;
pub type ToitureForm = crate::form::ElementForm<ToitureSpec>;
pub type SystemeElectriqueForm = crate::form::ElementForm<SystemeElectriqueSpec>;
pub type SystemePlomberieForm = crate::form::ElementForm<SystemePlomberieSpec>;
pub type SystemeChauffageForm = crate::form::ElementForm<SystemeChauffageSpec>;
pub type SystemeVentilationForm = crate::form::ElementForm<SystemeVentilationSpec>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerrainDraft {
    pub surface: Option<f64>,
    pub type_sol: Option<TypeSol>,
    pub portance_sol: Option<f64>,
    pub profondeur_nappe_phreatique: Option<f64>,
    pub numero_parcelles_cadastrales: Option<String>,
    pub contour: Option<Vec<Point3D>>,
    pub presence_argile: Option<bool>,
    pub pente: Option<f64>,
    pub altitude: Option<f64>,
}

pub struct TerrainSpec;

impl ElementSpec for TerrainSpec {
    type Value = Terrain;
    type Draft = TerrainDraft;

    const LABEL: &'static str = "Terrain";
    const SAVE: ApiOperation = ApiOperation::SetTerrain;

    fn current(batiment: &Batiment) -> Option<&Terrain> {
        batiment.terrain.as_ref()
    }

    fn draft_from(value: &Terrain) -> TerrainDraft {
        TerrainDraft {
            surface: Some(value.surface),
            type_sol: value.type_sol,
            portance_sol: value.portance_sol,
            profondeur_nappe_phreatique: value.profondeur_nappe_phreatique,
            numero_parcelles_cadastrales: value.numero_parcelles_cadastrales.clone(),
            contour: value.contour.clone(),
            presence_argile: value.presence_argile,
            pente: value.pente,
            altitude: value.altitude,
        }
    }

    fn validate(draft: &TerrainDraft) -> Result<Terrain, FieldErrors> {
        let mut errors = FieldErrors::new();
        let surface = errors.required_min("surface", draft.surface, 0.0);
        let type_sol = errors.required("typeSol", draft.type_sol);
        errors.min("portanceSol", draft.portance_sol, 0.0);
        errors.min(
            "profondeurNappePhréatique",
            draft.profondeur_nappe_phreatique,
            0.0,
        );
        let parcelles = errors.optional_text(draft.numero_parcelles_cadastrales.as_deref());
        errors.finish(|| {
            Some(Terrain {
                surface: surface?,
                numero_parcelles_cadastrales: parcelles,
                contour: draft.contour.clone(),
                type_sol: Some(type_sol?),
                portance_sol: draft.portance_sol,
                profondeur_nappe_phreatique: draft.profondeur_nappe_phreatique,
                presence_argile: draft.presence_argile,
                pente: draft.pente,
                altitude: draft.altitude,
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a Terrain,
    ) -> ApiFuture<'a, Batiment> {
        api.set_terrain(batiment_id, value)
    }
}

impl DeletableElement for TerrainSpec {
    const DELETE: ApiOperation = ApiOperation::DeleteTerrain;

    fn delete<'a>(api: &'a dyn BatimentApi, batiment_id: &'a str) -> ApiFuture<'a, Batiment> {
        api.delete_terrain(batiment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FondationsDraft {
    pub type_fondation: Option<TypeFondation>,
    pub profondeur: Option<f64>,
    /// 技术子文档，原样保留。
    pub details: Details,
}

pub struct FondationsSpec;

impl ElementSpec for FondationsSpec {
    type Value = Fondations;
    type Draft = FondationsDraft;

    const LABEL: &'static str = "Fondations";
    const SAVE: ApiOperation = ApiOperation::SetFondations;

    fn current(batiment: &Batiment) -> Option<&Fondations> {
        batiment.fondations.as_ref()
    }

    fn draft_from(value: &Fondations) -> FondationsDraft {
        FondationsDraft {
            type_fondation: Some(value.type_fondation),
            profondeur: Some(value.profondeur),
            details: value.details.clone(),
        }
    }

    fn validate(draft: &FondationsDraft) -> Result<Fondations, FieldErrors> {
        let mut errors = FieldErrors::new();
        let type_fondation = errors.required("typeFondation", draft.type_fondation);
        let profondeur = errors.required_min("profondeur", draft.profondeur, 0.0);
        errors.finish(|| {
            Some(Fondations {
                type_fondation: type_fondation?,
                profondeur: profondeur?,
                details: draft.details.clone(),
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a Fondations,
    ) -> ApiFuture<'a, Batiment> {
        api.set_fondations(batiment_id, value)
    }
}

impl DeletableElement for FondationsSpec {
    const DELETE: ApiOperation = ApiOperation::DeleteFondations;

    fn delete<'a>(api: &'a dyn BatimentApi, batiment_id: &'a str) -> ApiFuture<'a, Batiment> {
        api.delete_fondations(batiment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharpenteDraft {
    pub type_charpente: Option<TypeCharpente>,
    pub materiau: Option<String>,
    pub details: Details,
}

pub struct CharpenteSpec;

impl ElementSpec for CharpenteSpec {
    type Value = Charpente;
    type Draft = CharpenteDraft;

    const LABEL: &'static str = "Charpente";
    const SAVE: ApiOperation = ApiOperation::SetCharpente;

    fn current(batiment: &Batiment) -> Option<&Charpente> {
        batiment.charpente.as_ref()
    }

    fn draft_from(value: &Charpente) -> CharpenteDraft {
        CharpenteDraft {
            type_charpente: Some(value.type_charpente),
            materiau: value.materiau.clone(),
            details: value.details.clone(),
        }
    }

    fn validate(draft: &CharpenteDraft) -> Result<Charpente, FieldErrors> {
        let mut errors = FieldErrors::new();
        let type_charpente = errors.required("type", draft.type_charpente);
        let materiau = errors.optional_text(draft.materiau.as_deref());
        errors.finish(|| {
            Some(Charpente {
                type_charpente: type_charpente?,
                materiau,
                details: draft.details.clone(),
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a Charpente,
    ) -> ApiFuture<'a, Batiment> {
        api.set_charpente(batiment_id, value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToitureDraft {
    pub type_toiture: Option<TypeToiture>,
    pub forme: Option<FormeToit>,
    pub pente: Option<f64>,
    pub surface_totale: Option<f64>,
    pub surface_ecran: Option<f64>,
    pub altitude_faitage: Option<f64>,
    pub details: Details,
}

pub struct ToitureSpec;

impl ElementSpec for ToitureSpec {
    type Value = Toiture;
    type Draft = ToitureDraft;

    const LABEL: &'static str = "Toiture";
    const SAVE: ApiOperation = ApiOperation::SetToiture;

    fn current(batiment: &Batiment) -> Option<&Toiture> {
        batiment.toiture.as_ref()
    }

    fn draft_from(value: &Toiture) -> ToitureDraft {
        ToitureDraft {
            type_toiture: Some(value.type_toiture),
            forme: value.forme,
            pente: Some(value.pente),
            surface_totale: value.surface_totale,
            surface_ecran: value.surface_ecran,
            altitude_faitage: value.altitude_faitage,
            details: value.details.clone(),
        }
    }

    fn validate(draft: &ToitureDraft) -> Result<Toiture, FieldErrors> {
        let mut errors = FieldErrors::new();
        let type_toiture = errors.required("type", draft.type_toiture);
        let pente = errors.required_range("pente", draft.pente, 0.0, 90.0);
        errors.min("surfaceTotale", draft.surface_totale, 0.0);
        errors.finish(|| {
            Some(Toiture {
                type_toiture: type_toiture?,
                forme: draft.forme,
                pente: pente?,
                surface_totale: draft.surface_totale,
                surface_ecran: draft.surface_ecran,
                altitude_faitage: draft.altitude_faitage,
                details: draft.details.clone(),
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a Toiture,
    ) -> ApiFuture<'a, Batiment> {
        api.set_toiture(batiment_id, value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableauDraft {
    pub type_tableau: Option<TypeSystemeElectrique>,
    pub puissance: Option<f64>,
    pub nombre_circuits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemeElectriqueDraft {
    pub puissance_abonnement: Option<f64>,
    pub tableau: Option<TableauDraft>,
}

pub struct SystemeElectriqueSpec;

impl ElementSpec for SystemeElectriqueSpec {
    type Value = SystemeElectrique;
    type Draft = SystemeElectriqueDraft;

    const LABEL: &'static str = "Système électrique";
    const SAVE: ApiOperation = ApiOperation::SetSystemeElectrique;

    fn current(batiment: &Batiment) -> Option<&SystemeElectrique> {
        batiment.systeme_electrique.as_ref()
    }

    fn draft_from(value: &SystemeElectrique) -> SystemeElectriqueDraft {
        SystemeElectriqueDraft {
            puissance_abonnement: Some(value.puissance_abonnement),
            tableau: value.tableau_electrique.as_ref().map(|tableau| TableauDraft {
                type_tableau: Some(tableau.type_tableau),
                puissance: Some(tableau.puissance),
                nombre_circuits: Some(tableau.nombre_circuits),
            }),
        }
    }

    fn validate(draft: &SystemeElectriqueDraft) -> Result<SystemeElectrique, FieldErrors> {
        let mut errors = FieldErrors::new();
        let puissance_abonnement =
            errors.required_min("puissanceAbonnement", draft.puissance_abonnement, 0.0);
        let tableau = draft.tableau.as_ref().map(|tableau| {
            let type_tableau = errors.required("tableauElectrique.type", tableau.type_tableau);
            errors.min("tableauElectrique.puissance", tableau.puissance, 0.0);
            if tableau.nombre_circuits.is_some_and(|count| count < 1) {
                errors.push(
                    "tableauElectrique.nombreCircuits",
                    "tableauElectrique.nombreCircuits must be >= 1",
                );
            }
            type_tableau.map(|type_tableau| TableauElectrique {
                puissance: tableau.puissance.unwrap_or(0.0),
                nombre_circuits: tableau.nombre_circuits.unwrap_or(1),
                type_tableau,
            })
        });
        errors.finish(|| {
            Some(SystemeElectrique {
                puissance_abonnement: puissance_abonnement?,
                tableau_electrique: match tableau {
                    Some(tableau) => Some(tableau?),
                    None => None,
                },
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a SystemeElectrique,
    ) -> ApiFuture<'a, Batiment> {
        api.set_systeme_electrique(batiment_id, value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductionDraft {
    pub type_production: Option<TypeProductionEauChaude>,
    pub capacite: Option<f64>,
    pub puissance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemePlomberieDraft {
    pub reseau_distribution: Option<serde_json::Value>,
    pub reseau_evacuation: Option<serde_json::Value>,
    pub production_eau_chaude: Option<ProductionDraft>,
}

pub struct SystemePlomberieSpec;

impl ElementSpec for SystemePlomberieSpec {
    type Value = SystemePlomberie;
    type Draft = SystemePlomberieDraft;

    const LABEL: &'static str = "Système de plomberie";
    const SAVE: ApiOperation = ApiOperation::SetSystemePlomberie;

    fn current(batiment: &Batiment) -> Option<&SystemePlomberie> {
        batiment.systeme_plomberie.as_ref()
    }

    fn draft_from(value: &SystemePlomberie) -> SystemePlomberieDraft {
        SystemePlomberieDraft {
            reseau_distribution: value.reseau_distribution.clone(),
            reseau_evacuation: value.reseau_evacuation.clone(),
            production_eau_chaude: value.production_eau_chaude.as_ref().map(|production| {
                ProductionDraft {
                    type_production: Some(production.type_production),
                    capacite: Some(production.capacite),
                    puissance: production.puissance,
                }
            }),
        }
    }

    fn validate(draft: &SystemePlomberieDraft) -> Result<SystemePlomberie, FieldErrors> {
        let mut errors = FieldErrors::new();
        let production = draft.production_eau_chaude.as_ref().map(|production| {
            let type_production =
                errors.required("productionEauChaude.type", production.type_production);
            let capacite =
                errors.required_min("productionEauChaude.capacite", production.capacite, 0.0);
            errors.min("productionEauChaude.puissance", production.puissance, 0.0);
            Some(ProductionEauChaude {
                type_production: type_production?,
                capacite: capacite?,
                puissance: production.puissance,
            })
        });
        errors.finish(|| {
            Some(SystemePlomberie {
                reseau_distribution: draft.reseau_distribution.clone(),
                reseau_evacuation: draft.reseau_evacuation.clone(),
                production_eau_chaude: match production {
                    Some(production) => Some(production?),
                    None => None,
                },
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a SystemePlomberie,
    ) -> ApiFuture<'a, Batiment> {
        api.set_systeme_plomberie(batiment_id, value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateurDraft {
    pub type_generateur: Option<TypeGenerateurChauffage>,
    pub puissance: Option<f64>,
    pub energie: Option<TypeEnergie>,
    pub rendement: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemeChauffageDraft {
    pub type_chauffage: Option<String>,
    pub generateur: Option<GenerateurDraft>,
}

pub struct SystemeChauffageSpec;

impl ElementSpec for SystemeChauffageSpec {
    type Value = SystemeChauffage;
    type Draft = SystemeChauffageDraft;

    const LABEL: &'static str = "Système de chauffage";
    const SAVE: ApiOperation = ApiOperation::SetSystemeChauffage;

    fn current(batiment: &Batiment) -> Option<&SystemeChauffage> {
        batiment.systeme_chauffage.as_ref()
    }

    fn draft_from(value: &SystemeChauffage) -> SystemeChauffageDraft {
        SystemeChauffageDraft {
            type_chauffage: value.type_chauffage.clone(),
            generateur: value.generateur.as_ref().map(|generateur| GenerateurDraft {
                type_generateur: Some(generateur.type_generateur),
                puissance: Some(generateur.puissance),
                energie: Some(generateur.energie),
                rendement: generateur.rendement,
            }),
        }
    }

    fn validate(draft: &SystemeChauffageDraft) -> Result<SystemeChauffage, FieldErrors> {
        let mut errors = FieldErrors::new();
        let type_chauffage = errors.optional_text(draft.type_chauffage.as_deref());
        let generateur = draft.generateur.as_ref().map(|generateur| {
            let type_generateur = errors.required("generateur.type", generateur.type_generateur);
            let energie = errors.required("generateur.energie", generateur.energie);
            let puissance = errors.required_min("generateur.puissance", generateur.puissance, 0.0);
            errors.range("generateur.rendement", generateur.rendement, 0.0, 100.0);
            Some(GenerateurChauffage {
                type_generateur: type_generateur?,
                puissance: puissance?,
                energie: energie?,
                rendement: generateur.rendement,
            })
        });
        errors.finish(|| {
            Some(SystemeChauffage {
                type_chauffage,
                generateur: match generateur {
                    Some(generateur) => Some(generateur?),
                    None => None,
                },
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a SystemeChauffage,
    ) -> ApiFuture<'a, Batiment> {
        api.set_systeme_chauffage(batiment_id, value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemeVentilationDraft {
    pub type_ventilation: Option<TypeVentilation>,
}

pub struct SystemeVentilationSpec;

impl ElementSpec for SystemeVentilationSpec {
    type Value = SystemeVentilation;
    type Draft = SystemeVentilationDraft;

    const LABEL: &'static str = "Système de ventilation";
    const SAVE: ApiOperation = ApiOperation::SetSystemeVentilation;

    fn current(batiment: &Batiment) -> Option<&SystemeVentilation> {
        batiment.systeme_ventilation.as_ref()
    }

    fn draft_from(value: &SystemeVentilation) -> SystemeVentilationDraft {
        SystemeVentilationDraft {
            type_ventilation: Some(value.type_ventilation),
        }
    }

    fn validate(draft: &SystemeVentilationDraft) -> Result<SystemeVentilation, FieldErrors> {
        let mut errors = FieldErrors::new();
        let type_ventilation = errors.required("type", draft.type_ventilation);
        errors.finish(|| {
            Some(SystemeVentilation {
                type_ventilation: type_ventilation?,
            })
        })
    }

    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a SystemeVentilation,
    ) -> ApiFuture<'a, Batiment> {
        api.set_systeme_ventilation(batiment_id, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_requires_surface_and_soil() {
        let errors = TerrainSpec::validate(&TerrainDraft::default()).expect_err("invalid");
        assert!(errors.get("surface").is_some());
        assert!(errors.get("typeSol").is_some());
    }

    #[test]
    fn terrain_draft_round_trips_every_field() {
        let terrain = Terrain {
            surface: 512.25,
            numero_parcelles_cadastrales: Some("AB-12".to_string()),
            contour: None,
            type_sol: Some(TypeSol::Limon),
            portance_sol: Some(150.0),
            profondeur_nappe_phreatique: Some(4.0),
            presence_argile: Some(false),
            pente: Some(2.0),
            altitude: Some(120.0),
        };
        let draft = TerrainSpec::draft_from(&terrain);
        assert_eq!(TerrainSpec::validate(&draft), Ok(terrain));
    }

    #[test]
    fn roof_slope_is_bounded() {
        let draft = ToitureDraft {
            type_toiture: Some(TypeToiture::Zinc),
            pente: Some(95.0),
            ..ToitureDraft::default()
        };
        let errors = ToitureSpec::validate(&draft).expect_err("slope");
        assert!(errors.get("pente").is_some());
    }

    #[test]
    fn panel_needs_a_type_when_present() {
        let draft = SystemeElectriqueDraft {
            puissance_abonnement: Some(9.0),
            tableau: Some(TableauDraft {
                type_tableau: None,
                puissance: Some(9.0),
                nombre_circuits: Some(0),
            }),
        };
        let errors = SystemeElectriqueSpec::validate(&draft).expect_err("panel");
        assert!(errors.get("tableauElectrique.type").is_some());
        assert!(errors.get("tableauElectrique.nombreCircuits").is_some());
    }

    #[test]
    fn generator_efficiency_is_a_percentage() {
        let draft = SystemeChauffageDraft {
            type_chauffage: None,
            generateur: Some(GenerateurDraft {
                type_generateur: Some(TypeGenerateurChauffage::PompeAChaleur),
                puissance: Some(8.0),
                energie: Some(TypeEnergie::Electricite),
                rendement: Some(350.0),
            }),
        };
        assert!(SystemeChauffageSpec::validate(&draft).is_err());
    }
}
