//! 楼层及其子集合的管理器描述。

use crate::ApiFuture;
use crate::managers::{CollectionManager, CollectionScope, CollectionSpec};
use crate::rules::FieldErrors;
use api_contract::{CloisonPayload, MurPayload, NiveauPayload, OuverturePayload, PiecePayload};
use batiment_cache::BatimentRepository;
use batiment_client::{ApiError, ApiOperation, BatimentApi};
use domain::{
    Batiment, Cloison, MateriauMur, Mur, Niveau, OrientationMur, Ouverture, Piece, TypeCloison,
    TypeMur, TypeOuverture, TypePiece,
};

/// 建筑下的集合（楼层）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatimentScope {
    pub batiment_id: String,
}

/// 楼层下的集合（房间、墙体、隔墙）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NiveauScope {
    pub batiment_id: String,
    pub niveau_id: String,
}

/// 墙体下的集合（开口）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MurScope {
    pub batiment_id: String,
    pub niveau_id: String,
    pub mur_id: String,
}

impl CollectionScope for BatimentScope {
    fn batiment_id(&self) -> &str {
        &self.batiment_id
    }
}

impl CollectionScope for NiveauScope {
    fn batiment_id(&self) -> &str {
        &self.batiment_id
    }
}

impl CollectionScope for MurScope {
    fn batiment_id(&self) -> &str {
        &self.batiment_id
    }
}

pub type NiveauxManager = CollectionManager<NiveauSpec>;
pub type PiecesManager = CollectionManager<PieceSpec>;
pub type MursManager = CollectionManager<MurSpec>;
pub type CloisonsManager = CollectionManager<CloisonSpec>;
pub type OuverturesManager = CollectionManager<OuvertureSpec>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NiveauDraft {
    pub nom: Option<String>,
    pub numero: Option<i32>,
    pub altitude: Option<f64>,
    pub altitude_plancher: Option<f64>,
    pub hauteur_sous_plafond: Option<f64>,
    pub surface: Option<f64>,
}

pub struct NiveauSpec;

impl CollectionSpec for NiveauSpec {
    type Scope = BatimentScope;
    type Item = Niveau;
    type Draft = NiveauDraft;
    type Payload = NiveauPayload;

    const LABEL: &'static str = "Niveau";
    const ADD: ApiOperation = ApiOperation::AddNiveau;
    const UPDATE: ApiOperation = ApiOperation::UpdateNiveau;
    const DELETE: ApiOperation = ApiOperation::DeleteNiveau;

    fn items<'b>(batiment: &'b Batiment, _scope: &BatimentScope) -> Vec<&'b Niveau> {
        batiment.niveaux_ordonnes()
    }

    fn item_id(item: &Niveau) -> &str {
        &item.id
    }

    fn draft_from(item: &Niveau) -> NiveauDraft {
        NiveauDraft {
            nom: Some(item.nom.clone()),
            numero: Some(item.numero),
            altitude: Some(item.altitude),
            altitude_plancher: item.altitude_plancher,
            hauteur_sous_plafond: Some(item.hauteur_sous_plafond),
            surface: item.surface,
        }
    }

    fn validate(draft: &NiveauDraft) -> Result<NiveauPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let nom = errors.required_text("nom", draft.nom.as_deref());
        let numero = errors.required("numero", draft.numero);
        if numero.is_some_and(|numero| !(-10..=50).contains(&numero)) {
            errors.push("numero", "numero must be between -10 and 50");
        }
        let hauteur = errors.required_min("hauteurSousPlafond", draft.hauteur_sous_plafond, 0.0);
        errors.min("surface", draft.surface, 0.0);
        errors.finish(|| {
            Some(NiveauPayload {
                nom: nom?,
                numero: numero?,
                altitude: draft.altitude.unwrap_or(0.0),
                altitude_plancher: draft.altitude_plancher,
                hauteur_sous_plafond: hauteur?,
                surface: draft.surface,
            })
        })
    }

    fn add<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a BatimentScope,
        payload: &'a NiveauPayload,
    ) -> ApiFuture<'a, Batiment> {
        api.add_niveau(&scope.batiment_id, payload)
    }

    fn update<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a BatimentScope,
        item_id: &'a str,
        payload: &'a NiveauPayload,
    ) -> ApiFuture<'a, Batiment> {
        api.update_niveau(&scope.batiment_id, item_id, payload)
    }

    fn remove<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a BatimentScope,
        item_id: &'a str,
    ) -> ApiFuture<'a, Batiment> {
        api.delete_niveau(&scope.batiment_id, item_id)
    }
}

impl CollectionManager<NiveauSpec> {
    /// 服务端深拷贝楼层（含房间、墙体、隔墙）。
    pub async fn duplicate(
        &mut self,
        repository: &BatimentRepository,
        niveau_id: &str,
    ) -> Result<Batiment, ApiError> {
        let batiment_id = self.scope().batiment_id.clone();
        let result = repository
            .mutate(
                ApiOperation::DuplicateNiveau,
                Some(&batiment_id),
                repository.api().duplicate_niveau(&batiment_id, niveau_id),
            )
            .await;
        match &result {
            Ok(_) => self.succeeded("Niveau dupliqué".to_string()),
            Err(err) => self.failed("duplicate", err),
        }
        result
    }
}

fn niveau<'b>(batiment: &'b Batiment, niveau_id: &str) -> Option<&'b Niveau> {
    batiment.niveau(niveau_id)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieceDraft {
    pub nom: Option<String>,
    pub type_piece: Option<TypePiece>,
    pub surface: Option<f64>,
    pub hauteur_sous_plafond: Option<f64>,
}

pub struct PieceSpec;

impl CollectionSpec for PieceSpec {
    type Scope = NiveauScope;
    type Item = Piece;
    type Draft = PieceDraft;
    type Payload = PiecePayload;

    const LABEL: &'static str = "Pièce";
    const ADD: ApiOperation = ApiOperation::AddPiece;
    const UPDATE: ApiOperation = ApiOperation::UpdatePiece;
    const DELETE: ApiOperation = ApiOperation::DeletePiece;

    fn items<'b>(batiment: &'b Batiment, scope: &NiveauScope) -> Vec<&'b Piece> {
        niveau(batiment, &scope.niveau_id)
            .map(|niveau| niveau.pieces.iter().collect())
            .unwrap_or_default()
    }

    fn item_id(item: &Piece) -> &str {
        &item.id
    }

    fn draft_from(item: &Piece) -> PieceDraft {
        PieceDraft {
            nom: Some(item.nom.clone()),
            type_piece: Some(item.type_piece),
            surface: Some(item.surface),
            hauteur_sous_plafond: item.hauteur_sous_plafond,
        }
    }

    fn validate(draft: &PieceDraft) -> Result<PiecePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let nom = errors.required_text("nom", draft.nom.as_deref());
        let type_piece = errors.required("type", draft.type_piece);
        let surface = errors.required_min("surface", draft.surface, 0.0);
        errors.min("hauteurSousPlafond", draft.hauteur_sous_plafond, 0.0);
        errors.finish(|| {
            Some(PiecePayload {
                nom: nom?,
                type_piece: type_piece?,
                surface: surface?,
                hauteur_sous_plafond: draft.hauteur_sous_plafond,
            })
        })
    }

    fn add<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        payload: &'a PiecePayload,
    ) -> ApiFuture<'a, Batiment> {
        api.add_piece(&scope.batiment_id, &scope.niveau_id, payload)
    }

    fn update<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        item_id: &'a str,
        payload: &'a PiecePayload,
    ) -> ApiFuture<'a, Batiment> {
        api.update_piece(&scope.batiment_id, &scope.niveau_id, item_id, payload)
    }

    fn remove<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        item_id: &'a str,
    ) -> ApiFuture<'a, Batiment> {
        api.delete_piece(&scope.batiment_id, &scope.niveau_id, item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MurDraft {
    pub nom: Option<String>,
    pub longueur: Option<f64>,
    pub hauteur: Option<f64>,
    pub epaisseur: Option<f64>,
    pub type_mur: Option<TypeMur>,
    pub materiau: Option<MateriauMur>,
    pub orientation: Option<OrientationMur>,
}

pub struct MurSpec;

impl CollectionSpec for MurSpec {
    type Scope = NiveauScope;
    type Item = Mur;
    type Draft = MurDraft;
    type Payload = MurPayload;

    const LABEL: &'static str = "Mur";
    const ADD: ApiOperation = ApiOperation::AddMur;
    const UPDATE: ApiOperation = ApiOperation::UpdateMur;
    const DELETE: ApiOperation = ApiOperation::DeleteMur;

    fn items<'b>(batiment: &'b Batiment, scope: &NiveauScope) -> Vec<&'b Mur> {
        niveau(batiment, &scope.niveau_id)
            .map(|niveau| niveau.murs.iter().collect())
            .unwrap_or_default()
    }

    fn item_id(item: &Mur) -> &str {
        &item.id
    }

    fn draft_from(item: &Mur) -> MurDraft {
        MurDraft {
            nom: item.nom.clone(),
            longueur: Some(item.longueur),
            hauteur: Some(item.hauteur),
            epaisseur: Some(item.epaisseur),
            type_mur: Some(item.type_mur),
            materiau: item.materiau,
            orientation: item.orientation,
        }
    }

    fn validate(draft: &MurDraft) -> Result<MurPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let longueur = errors.required_min("longueur", draft.longueur, 0.0);
        let hauteur = errors.required_min("hauteur", draft.hauteur, 0.0);
        let epaisseur = errors.required_min("epaisseur", draft.epaisseur, 0.0);
        let type_mur = errors.required("type", draft.type_mur);
        let nom = errors.optional_text(draft.nom.as_deref());
        errors.finish(|| {
            Some(MurPayload {
                nom,
                longueur: longueur?,
                hauteur: hauteur?,
                epaisseur: epaisseur?,
                type_mur: type_mur?,
                materiau: draft.materiau,
                orientation: draft.orientation,
            })
        })
    }

    fn add<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        payload: &'a MurPayload,
    ) -> ApiFuture<'a, Batiment> {
        api.add_mur(&scope.batiment_id, &scope.niveau_id, payload)
    }

    fn update<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        item_id: &'a str,
        payload: &'a MurPayload,
    ) -> ApiFuture<'a, Batiment> {
        api.update_mur(&scope.batiment_id, &scope.niveau_id, item_id, payload)
    }

    fn remove<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        item_id: &'a str,
    ) -> ApiFuture<'a, Batiment> {
        api.delete_mur(&scope.batiment_id, &scope.niveau_id, item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloisonDraft {
    pub longueur: Option<f64>,
    pub hauteur: Option<f64>,
    pub epaisseur: Option<f64>,
    pub type_cloison: Option<TypeCloison>,
}

pub struct CloisonSpec;

impl CollectionSpec for CloisonSpec {
    type Scope = NiveauScope;
    type Item = Cloison;
    type Draft = CloisonDraft;
    type Payload = CloisonPayload;

    const LABEL: &'static str = "Cloison";
    const ADD: ApiOperation = ApiOperation::AddCloison;
    const UPDATE: ApiOperation = ApiOperation::UpdateCloison;
    const DELETE: ApiOperation = ApiOperation::DeleteCloison;

    fn items<'b>(batiment: &'b Batiment, scope: &NiveauScope) -> Vec<&'b Cloison> {
        niveau(batiment, &scope.niveau_id)
            .map(|niveau| niveau.cloisons.iter().collect())
            .unwrap_or_default()
    }

    fn item_id(item: &Cloison) -> &str {
        &item.id
    }

    fn draft_from(item: &Cloison) -> CloisonDraft {
        CloisonDraft {
            longueur: Some(item.longueur),
            hauteur: Some(item.hauteur),
            epaisseur: Some(item.epaisseur),
            type_cloison: Some(item.type_cloison),
        }
    }

    fn validate(draft: &CloisonDraft) -> Result<CloisonPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let type_cloison = errors.required("type", draft.type_cloison);
        let longueur = errors.required_min("longueur", draft.longueur, 0.0);
        let hauteur = errors.required_min("hauteur", draft.hauteur, 0.0);
        let epaisseur = errors.required_min("epaisseur", draft.epaisseur, 0.0);
        errors.finish(|| {
            Some(CloisonPayload {
                longueur: longueur?,
                hauteur: hauteur?,
                epaisseur: epaisseur?,
                type_cloison: type_cloison?,
            })
        })
    }

    fn add<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        payload: &'a CloisonPayload,
    ) -> ApiFuture<'a, Batiment> {
        api.add_cloison(&scope.batiment_id, &scope.niveau_id, payload)
    }

    fn update<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        item_id: &'a str,
        payload: &'a CloisonPayload,
    ) -> ApiFuture<'a, Batiment> {
        api.update_cloison(&scope.batiment_id, &scope.niveau_id, item_id, payload)
    }

    fn remove<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a NiveauScope,
        item_id: &'a str,
    ) -> ApiFuture<'a, Batiment> {
        api.delete_cloison(&scope.batiment_id, &scope.niveau_id, item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OuvertureDraft {
    pub nom: Option<String>,
    pub type_ouverture: Option<TypeOuverture>,
    pub largeur: Option<f64>,
    pub hauteur: Option<f64>,
}

pub struct OuvertureSpec;

impl CollectionSpec for OuvertureSpec {
    type Scope = MurScope;
    type Item = Ouverture;
    type Draft = OuvertureDraft;
    type Payload = OuverturePayload;

    const LABEL: &'static str = "Ouverture";
    const ADD: ApiOperation = ApiOperation::AddOuverture;
    const UPDATE: ApiOperation = ApiOperation::UpdateOuverture;
    const DELETE: ApiOperation = ApiOperation::DeleteOuverture;

    fn items<'b>(batiment: &'b Batiment, scope: &MurScope) -> Vec<&'b Ouverture> {
        niveau(batiment, &scope.niveau_id)
            .and_then(|niveau| niveau.mur(&scope.mur_id))
            .map(|mur| mur.ouvertures.iter().collect())
            .unwrap_or_default()
    }

    fn item_id(item: &Ouverture) -> &str {
        &item.id
    }

    fn draft_from(item: &Ouverture) -> OuvertureDraft {
        OuvertureDraft {
            nom: Some(item.nom.clone()),
            type_ouverture: Some(item.type_ouverture),
            largeur: Some(item.largeur),
            hauteur: Some(item.hauteur),
        }
    }

    fn validate(draft: &OuvertureDraft) -> Result<OuverturePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let nom = errors.required_text("nom", draft.nom.as_deref());
        let type_ouverture = errors.required("type", draft.type_ouverture);
        let largeur = errors.required_min("largeur", draft.largeur, 0.0);
        let hauteur = errors.required_min("hauteur", draft.hauteur, 0.0);
        errors.finish(|| {
            Some(OuverturePayload {
                nom: nom?,
                type_ouverture: type_ouverture?,
                largeur: largeur?,
                hauteur: hauteur?,
            })
        })
    }

    fn add<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a MurScope,
        payload: &'a OuverturePayload,
    ) -> ApiFuture<'a, Batiment> {
        api.add_ouverture(&scope.batiment_id, &scope.niveau_id, &scope.mur_id, payload)
    }

    fn update<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a MurScope,
        item_id: &'a str,
        payload: &'a OuverturePayload,
    ) -> ApiFuture<'a, Batiment> {
        api.update_ouverture(
            &scope.batiment_id,
            &scope.niveau_id,
            &scope.mur_id,
            item_id,
            payload,
        )
    }

    fn remove<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a MurScope,
        item_id: &'a str,
    ) -> ApiFuture<'a, Batiment> {
        api.delete_ouverture(&scope.batiment_id, &scope.niveau_id, &scope.mur_id, item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_numero_is_bounded() {
        let draft = NiveauDraft {
            nom: Some("Sous-sol".to_string()),
            numero: Some(-11),
            hauteur_sous_plafond: Some(2.4),
            ..NiveauDraft::default()
        };
        let errors = NiveauSpec::validate(&draft).expect_err("numero");
        assert!(errors.get("numero").is_some());
    }

    #[test]
    fn level_altitude_defaults_to_zero() {
        let draft = NiveauDraft {
            nom: Some("RDC".to_string()),
            numero: Some(0),
            hauteur_sous_plafond: Some(2.5),
            ..NiveauDraft::default()
        };
        let payload = NiveauSpec::validate(&draft).expect("valid");
        assert_eq!(payload.altitude, 0.0);
    }

    #[test]
    fn wall_lengths_must_be_positive() {
        let draft = MurDraft {
            longueur: Some(-1.0),
            hauteur: Some(2.5),
            epaisseur: None,
            type_mur: Some(TypeMur::MurRefend),
            ..MurDraft::default()
        };
        let errors = MurSpec::validate(&draft).expect_err("wall");
        assert!(errors.get("longueur").is_some());
        assert!(errors.get("epaisseur").is_some());
        assert!(errors.get("hauteur").is_none());
    }
}
