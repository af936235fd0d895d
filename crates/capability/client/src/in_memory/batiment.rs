use super::copy::{copy_batiment, copy_niveau};
use super::rules::evaluate;
use super::{Entry, InMemoryBatimentApi, new_id, now};
use crate::error::ApiError;
use crate::traits::{ApiOperation, BatimentApi};
use api_contract::{
    BatimentFilters, BatimentUpsertRequest, CloisonPayload, FieldError, MurPayload,
    NiveauPayload, OuverturePayload, Page, Pagination, PiecePayload,
};
use async_trait::async_trait;
use domain::{
    Batiment, Charpente, Cloison, Fondations, Mur, Niveau, Ouverture, Piece, SystemeChauffage,
    SystemeElectrique, SystemePlomberie, SystemeVentilation, Terrain, Toiture, TypeBatiment,
    TypeMur, ValidationReport,
};
use std::cmp::Ordering;

fn niveau_mut<'a>(batiment: &'a mut Batiment, niveau_id: &str) -> Result<&'a mut Niveau, ApiError> {
    batiment
        .niveau_mut(niveau_id)
        .ok_or_else(|| ApiError::not_found(format!("niveau {niveau_id}")))
}

fn mur_mut<'a>(
    batiment: &'a mut Batiment,
    niveau_id: &str,
    mur_id: &str,
) -> Result<&'a mut Mur, ApiError> {
    niveau_mut(batiment, niveau_id)?
        .mur_mut(mur_id)
        .ok_or_else(|| ApiError::not_found(format!("mur {mur_id}")))
}

/// 按 id 删除集合元素；不存在时返回 404。
fn remove_by<T>(
    items: &mut Vec<T>,
    what: &str,
    id: &str,
    key: impl Fn(&T) -> &str,
) -> Result<(), ApiError> {
    let before = items.len();
    items.retain(|item| key(item) != id);
    if items.len() == before {
        return Err(ApiError::not_found(format!("{what} {id}")));
    }
    Ok(())
}

fn find_by<'a, T>(
    items: &'a mut [T],
    what: &str,
    id: &str,
    key: impl Fn(&T) -> &str,
) -> Result<&'a mut T, ApiError> {
    items
        .iter_mut()
        .find(|item| key(&**item) == id)
        .ok_or_else(|| ApiError::not_found(format!("{what} {id}")))
}

fn apply_upsert(batiment: &mut Batiment, request: &BatimentUpsertRequest) {
    batiment.nom = request.nom.trim().to_string();
    batiment.type_batiment = request.type_batiment;
    batiment.adresse = request.adresse.clone();
    batiment.statut = request.statut.unwrap_or_default();
    batiment.terrain = request.terrain.clone();
    batiment.fondations = request.fondations.clone();
    batiment.charpente = request.charpente.clone();
    batiment.toiture = request.toiture.clone();
    batiment.systeme_electrique = request.systeme_electrique.clone();
    batiment.systeme_plomberie = request.systeme_plomberie.clone();
    batiment.systeme_chauffage = request.systeme_chauffage.clone();
    batiment.systeme_ventilation = request.systeme_ventilation.clone();
}

fn ensure_nom(nom: &str) -> Result<(), ApiError> {
    if nom.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Le nom est obligatoire",
            vec![FieldError {
                field: "nom".to_string(),
                message: "Le nom est obligatoire".to_string(),
            }],
        ));
    }
    Ok(())
}

/// `validate=true` 时拒绝存在 ERROR 级问题的状态。
fn ensure_valid(batiment: &Batiment) -> Result<(), ApiError> {
    let report = evaluate(batiment);
    if report.valid {
        return Ok(());
    }
    let errors = report
        .errors
        .iter()
        .map(|issue| FieldError {
            field: issue.field.clone().unwrap_or_else(|| issue.rule_name.clone()),
            message: issue.message.clone(),
        })
        .collect();
    Err(ApiError::bad_request("Validation du bâtiment échouée", errors)
        .with_code("VALIDATION.FAILED"))
}

fn matches(batiment: &Batiment, filters: &BatimentFilters) -> bool {
    if let Some(nom) = filters.nom.as_deref().filter(|nom| !nom.is_empty()) {
        if !batiment.nom.to_lowercase().contains(&nom.to_lowercase()) {
            return false;
        }
    }
    if filters
        .type_batiment
        .is_some_and(|value| value != batiment.type_batiment)
    {
        return false;
    }
    if filters.statut.is_some_and(|value| value != batiment.statut) {
        return false;
    }
    true
}

/// 支持 `nom`，格式 `nom[,asc|desc]`；其他值按创建顺序。
fn compare(sort: Option<&str>, a: &Entry, b: &Entry) -> Ordering {
    let Some(sort) = sort else {
        return a.seq.cmp(&b.seq);
    };
    let mut parts = sort.split(',');
    let field = parts.next().unwrap_or_default().trim();
    let descending = parts
        .next()
        .is_some_and(|dir| dir.trim().eq_ignore_ascii_case("desc"));
    let ordering = match field {
        "nom" => a.batiment.nom.cmp(&b.batiment.nom),
        _ => a.seq.cmp(&b.seq),
    }
    .then(a.seq.cmp(&b.seq));
    if descending { ordering.reverse() } else { ordering }
}

fn niveau_from(payload: &NiveauPayload) -> Niveau {
    Niveau {
        id: new_id(),
        nom: payload.nom.clone(),
        numero: payload.numero,
        altitude: payload.altitude,
        altitude_plancher: payload.altitude_plancher,
        hauteur_sous_plafond: payload.hauteur_sous_plafond,
        surface: payload.surface,
        pieces: Vec::new(),
        murs: Vec::new(),
        cloisons: Vec::new(),
        plancher: None,
        tremies: Vec::new(),
    }
}

fn piece_from(id: String, payload: &PiecePayload) -> Piece {
    Piece {
        id,
        nom: payload.nom.clone(),
        type_piece: payload.type_piece,
        surface: payload.surface,
        hauteur_sous_plafond: payload.hauteur_sous_plafond,
    }
}

/// 写入墙体属性；面积与承重标记由服务端推导。
fn apply_mur(mur: &mut Mur, payload: &MurPayload) {
    mur.nom = payload.nom.clone();
    mur.longueur = payload.longueur;
    mur.hauteur = payload.hauteur;
    mur.epaisseur = payload.epaisseur;
    mur.type_mur = payload.type_mur;
    mur.materiau = payload.materiau;
    mur.orientation = payload.orientation;
    mur.surface = Some(payload.longueur * payload.hauteur);
    mur.porteur = Some(payload.type_mur == TypeMur::MurPorteur);
}

fn cloison_from(id: String, payload: &CloisonPayload) -> Cloison {
    Cloison {
        id,
        longueur: payload.longueur,
        hauteur: payload.hauteur,
        epaisseur: payload.epaisseur,
        type_cloison: payload.type_cloison,
    }
}

fn ouverture_from(id: String, mur_id: &str, payload: &OuverturePayload) -> Ouverture {
    Ouverture {
        id,
        nom: payload.nom.clone(),
        type_ouverture: payload.type_ouverture,
        largeur: payload.largeur,
        hauteur: payload.hauteur,
        id_mur: Some(mur_id.to_string()),
    }
}

impl InMemoryBatimentApi {
    fn store_new(&self, batiment: Batiment) -> Result<Batiment, ApiError> {
        let seq = self.next_seq();
        let mut entries = self.write()?;
        entries.insert(
            batiment.id.clone(),
            Entry {
                seq,
                batiment: batiment.clone(),
            },
        );
        Ok(batiment)
    }

    fn fresh(&self, nom: &str, type_batiment: TypeBatiment) -> Batiment {
        let mut batiment = Batiment::empty(new_id(), nom, type_batiment);
        let timestamp = now();
        batiment.date_creation = Some(timestamp.clone());
        batiment.date_modification = Some(timestamp);
        batiment
    }
}

#[async_trait]
impl BatimentApi for InMemoryBatimentApi {
    async fn init(&self, nom: &str, type_batiment: TypeBatiment) -> Result<Batiment, ApiError> {
        self.enter(ApiOperation::Init)?;
        ensure_nom(nom)?;
        self.store_new(self.fresh(nom.trim(), type_batiment))
    }

    async fn list(
        &self,
        filters: &BatimentFilters,
        pagination: &Pagination,
    ) -> Result<Page<Batiment>, ApiError> {
        self.enter(ApiOperation::List)?;
        let entries = self.read()?;
        let mut selected: Vec<&Entry> = entries
            .values()
            .filter(|entry| matches(&entry.batiment, filters))
            .collect();
        selected.sort_by(|a, b| compare(pagination.sort.as_deref(), a, b));
        let items = selected
            .into_iter()
            .map(|entry| entry.batiment.clone())
            .collect();
        Ok(Page::slice(items, pagination))
    }

    async fn list_all(&self) -> Result<Vec<Batiment>, ApiError> {
        self.enter(ApiOperation::ListAll)?;
        let entries = self.read()?;
        let mut selected: Vec<&Entry> = entries.values().collect();
        selected.sort_by_key(|entry| entry.seq);
        Ok(selected
            .into_iter()
            .map(|entry| entry.batiment.clone())
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Batiment, ApiError> {
        self.enter(ApiOperation::Get)?;
        let entries = self.read()?;
        entries
            .get(id)
            .map(|entry| entry.batiment.clone())
            .ok_or_else(|| ApiError::not_found(format!("batiment {id}")))
    }

    async fn create(
        &self,
        request: &BatimentUpsertRequest,
        validate: bool,
    ) -> Result<Batiment, ApiError> {
        self.enter(ApiOperation::Create)?;
        ensure_nom(&request.nom)?;
        let mut batiment = self.fresh(request.nom.trim(), request.type_batiment);
        apply_upsert(&mut batiment, request);
        if validate {
            ensure_valid(&batiment)?;
        }
        self.store_new(batiment)
    }

    async fn update(
        &self,
        id: &str,
        request: &BatimentUpsertRequest,
        validate: bool,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::Update, id, |batiment| {
            ensure_nom(&request.nom)?;
            apply_upsert(batiment, request);
            if validate {
                ensure_valid(batiment)?;
            }
            Ok(())
        })
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.enter(ApiOperation::Delete)?;
        let mut entries = self.write()?;
        entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found(format!("batiment {id}")))
    }

    async fn duplicate(&self, id: &str, nouveau_nom: Option<&str>) -> Result<Batiment, ApiError> {
        self.enter(ApiOperation::Duplicate)?;
        let source = {
            let entries = self.read()?;
            entries
                .get(id)
                .map(|entry| entry.batiment.clone())
                .ok_or_else(|| ApiError::not_found(format!("batiment {id}")))?
        };
        let nom = match nouveau_nom.map(str::trim).filter(|nom| !nom.is_empty()) {
            Some(nom) => nom.to_string(),
            None => format!("{} (copie)", source.nom),
        };
        let mut copy = copy_batiment(&source, new_id(), nom);
        let timestamp = now();
        copy.date_creation = Some(timestamp.clone());
        copy.date_modification = Some(timestamp);
        self.store_new(copy)
    }

    async fn validate(&self, id: &str) -> Result<ValidationReport, ApiError> {
        self.enter(ApiOperation::Validate)?;
        let entries = self.read()?;
        entries
            .get(id)
            .map(|entry| evaluate(&entry.batiment))
            .ok_or_else(|| ApiError::not_found(format!("batiment {id}")))
    }

    async fn set_terrain(&self, id: &str, terrain: &Terrain) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetTerrain, id, |batiment| {
            batiment.terrain = Some(terrain.clone());
            Ok(())
        })
    }

    async fn delete_terrain(&self, id: &str) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DeleteTerrain, id, |batiment| {
            batiment.terrain = None;
            Ok(())
        })
    }

    async fn set_fondations(
        &self,
        id: &str,
        fondations: &Fondations,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetFondations, id, |batiment| {
            batiment.fondations = Some(fondations.clone());
            Ok(())
        })
    }

    async fn delete_fondations(&self, id: &str) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DeleteFondations, id, |batiment| {
            batiment.fondations = None;
            Ok(())
        })
    }

    async fn set_charpente(&self, id: &str, charpente: &Charpente) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetCharpente, id, |batiment| {
            batiment.charpente = Some(charpente.clone());
            Ok(())
        })
    }

    async fn set_toiture(&self, id: &str, toiture: &Toiture) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetToiture, id, |batiment| {
            batiment.toiture = Some(toiture.clone());
            Ok(())
        })
    }

    async fn set_systeme_electrique(
        &self,
        id: &str,
        systeme: &SystemeElectrique,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetSystemeElectrique, id, |batiment| {
            batiment.systeme_electrique = Some(systeme.clone());
            Ok(())
        })
    }

    async fn set_systeme_plomberie(
        &self,
        id: &str,
        systeme: &SystemePlomberie,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetSystemePlomberie, id, |batiment| {
            batiment.systeme_plomberie = Some(systeme.clone());
            Ok(())
        })
    }

    async fn set_systeme_chauffage(
        &self,
        id: &str,
        systeme: &SystemeChauffage,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetSystemeChauffage, id, |batiment| {
            batiment.systeme_chauffage = Some(systeme.clone());
            Ok(())
        })
    }

    async fn set_systeme_ventilation(
        &self,
        id: &str,
        systeme: &SystemeVentilation,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::SetSystemeVentilation, id, |batiment| {
            batiment.systeme_ventilation = Some(systeme.clone());
            Ok(())
        })
    }

    async fn add_niveau(&self, id: &str, niveau: &NiveauPayload) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::AddNiveau, id, |batiment| {
            batiment.niveaux.push(niveau_from(niveau));
            Ok(())
        })
    }

    async fn update_niveau(
        &self,
        id: &str,
        niveau_id: &str,
        payload: &NiveauPayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::UpdateNiveau, id, |batiment| {
            let niveau = niveau_mut(batiment, niveau_id)?;
            niveau.nom = payload.nom.clone();
            niveau.numero = payload.numero;
            niveau.altitude = payload.altitude;
            niveau.altitude_plancher = payload.altitude_plancher;
            niveau.hauteur_sous_plafond = payload.hauteur_sous_plafond;
            niveau.surface = payload.surface;
            Ok(())
        })
    }

    async fn delete_niveau(&self, id: &str, niveau_id: &str) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DeleteNiveau, id, |batiment| {
            remove_by(&mut batiment.niveaux, "niveau", niveau_id, |n| n.id.as_str())
        })
    }

    async fn duplicate_niveau(&self, id: &str, niveau_id: &str) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DuplicateNiveau, id, |batiment| {
            let source = batiment
                .niveau(niveau_id)
                .ok_or_else(|| ApiError::not_found(format!("niveau {niveau_id}")))?;
            let mut copy = copy_niveau(source);
            copy.nom = format!("{} (copie)", source.nom);
            copy.numero = batiment
                .niveaux
                .iter()
                .map(|niveau| niveau.numero)
                .max()
                .unwrap_or(0)
                + 1;
            batiment.niveaux.push(copy);
            Ok(())
        })
    }

    async fn add_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece: &PiecePayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::AddPiece, id, |batiment| {
            niveau_mut(batiment, niveau_id)?
                .pieces
                .push(piece_from(new_id(), piece));
            Ok(())
        })
    }

    async fn update_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece_id: &str,
        piece: &PiecePayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::UpdatePiece, id, |batiment| {
            let niveau = niveau_mut(batiment, niveau_id)?;
            let existing = find_by(&mut niveau.pieces, "piece", piece_id, |p| p.id.as_str())?;
            *existing = piece_from(piece_id.to_string(), piece);
            Ok(())
        })
    }

    async fn delete_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DeletePiece, id, |batiment| {
            let niveau = niveau_mut(batiment, niveau_id)?;
            remove_by(&mut niveau.pieces, "piece", piece_id, |p| p.id.as_str())
        })
    }

    async fn add_mur(
        &self,
        id: &str,
        niveau_id: &str,
        payload: &MurPayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::AddMur, id, |batiment| {
            let mut mur = Mur {
                id: new_id(),
                nom: None,
                longueur: 0.0,
                hauteur: 0.0,
                epaisseur: 0.0,
                type_mur: payload.type_mur,
                materiau: None,
                orientation: None,
                surface: None,
                porteur: None,
                ouvertures: Vec::new(),
                details: Default::default(),
            };
            apply_mur(&mut mur, payload);
            niveau_mut(batiment, niveau_id)?.murs.push(mur);
            Ok(())
        })
    }

    async fn update_mur(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        payload: &MurPayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::UpdateMur, id, |batiment| {
            apply_mur(mur_mut(batiment, niveau_id, mur_id)?, payload);
            Ok(())
        })
    }

    async fn delete_mur(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DeleteMur, id, |batiment| {
            let niveau = niveau_mut(batiment, niveau_id)?;
            remove_by(&mut niveau.murs, "mur", mur_id, |m| m.id.as_str())
        })
    }

    async fn add_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison: &CloisonPayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::AddCloison, id, |batiment| {
            niveau_mut(batiment, niveau_id)?
                .cloisons
                .push(cloison_from(new_id(), cloison));
            Ok(())
        })
    }

    async fn update_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison_id: &str,
        cloison: &CloisonPayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::UpdateCloison, id, |batiment| {
            let niveau = niveau_mut(batiment, niveau_id)?;
            let existing = find_by(&mut niveau.cloisons, "cloison", cloison_id, |c| c.id.as_str())?;
            *existing = cloison_from(cloison_id.to_string(), cloison);
            Ok(())
        })
    }

    async fn delete_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DeleteCloison, id, |batiment| {
            let niveau = niveau_mut(batiment, niveau_id)?;
            remove_by(&mut niveau.cloisons, "cloison", cloison_id, |c| c.id.as_str())
        })
    }

    async fn add_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture: &OuverturePayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::AddOuverture, id, |batiment| {
            mur_mut(batiment, niveau_id, mur_id)?
                .ouvertures
                .push(ouverture_from(new_id(), mur_id, ouverture));
            Ok(())
        })
    }

    async fn update_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture_id: &str,
        ouverture: &OuverturePayload,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::UpdateOuverture, id, |batiment| {
            let mur = mur_mut(batiment, niveau_id, mur_id)?;
            let existing = find_by(&mut mur.ouvertures, "ouverture", ouverture_id, |o| o.id.as_str())?;
            *existing = ouverture_from(ouverture_id.to_string(), mur_id, ouverture);
            Ok(())
        })
    }

    async fn delete_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.mutate(ApiOperation::DeleteOuverture, id, |batiment| {
            let mur = mur_mut(batiment, niveau_id, mur_id)?;
            remove_by(&mut mur.ouvertures, "ouverture", ouverture_id, |o| o.id.as_str())
        })
    }
}
