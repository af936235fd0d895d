//! 有序提交
//!
//! 顺序固定：创建建筑 → 地块 → 基础 → 楼层 0..N → 屋面 → 电气 / 供暖 / 通风 / 给排水
//! → 重新读取完整聚合。
//! - 创建失败时整个序列失败，不发出后续请求
//! - 创建之后的每一步相互独立：失败被记录，后续步骤照常执行
//! - 有任一步骤失败时结果为 `PartiallyCreated`；启用补偿策略时改为删除已创建的建筑

use crate::model::WizardData;
use crate::steps::WizardStep;
use api_contract::{BatimentUpsertRequest, DEFAULT_ERROR_MESSAGE, NiveauPayload};
use batiment_cache::BatimentRepository;
use batiment_client::{ApiError, ApiOperation};
use batiment_config::ClientConfig;
use domain::{
    Batiment, Fondations, GenerateurChauffage, ProductionEauChaude, SystemeChauffage,
    SystemeElectrique, SystemePlomberie, SystemeVentilation, TableauElectrique, Terrain, Toiture,
};
use std::fmt;
use tracing::{info, warn};

/// 未填写层高时使用的默认值（米）。
const HAUTEUR_SOUS_PLAFOND_DEFAUT: f64 = 2.5;

/// 部分失败时的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackPolicy {
    /// 保留部分配置的建筑并报告失败步骤。
    #[default]
    Keep,
    /// 发出一次补偿删除。
    DeleteOnFailure,
}

impl RollbackPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        if config.wizard_rollback {
            RollbackPolicy::DeleteOnFailure
        } else {
            RollbackPolicy::Keep
        }
    }
}

/// 创建之后的单个提交步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStep {
    Terrain,
    Fondations,
    Niveau(u32),
    Toiture,
    SystemeElectrique,
    SystemeChauffage,
    SystemeVentilation,
    SystemePlomberie,
    /// 最后一次读取完整聚合。
    Reload,
}

impl fmt::Display for SubmissionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStep::Terrain => f.write_str("terrain"),
            SubmissionStep::Fondations => f.write_str("fondations"),
            SubmissionStep::Niveau(numero) => write!(f, "niveau {numero}"),
            SubmissionStep::Toiture => f.write_str("toiture"),
            SubmissionStep::SystemeElectrique => f.write_str("systeme electrique"),
            SubmissionStep::SystemeChauffage => f.write_str("systeme chauffage"),
            SubmissionStep::SystemeVentilation => f.write_str("systeme ventilation"),
            SubmissionStep::SystemePlomberie => f.write_str("systeme plomberie"),
            SubmissionStep::Reload => f.write_str("reload"),
        }
    }
}

/// 由向导数据推导出的一次写调用。
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedCall {
    Terrain(Terrain),
    Fondations(Fondations),
    Niveau(NiveauPayload),
    Toiture(Toiture),
    SystemeElectrique(SystemeElectrique),
    SystemeChauffage(SystemeChauffage),
    SystemeVentilation(SystemeVentilation),
    SystemePlomberie(SystemePlomberie),
}

impl PlannedCall {
    pub fn step(&self) -> SubmissionStep {
        match self {
            PlannedCall::Terrain(_) => SubmissionStep::Terrain,
            PlannedCall::Fondations(_) => SubmissionStep::Fondations,
            PlannedCall::Niveau(payload) => SubmissionStep::Niveau(payload.numero.unsigned_abs()),
            PlannedCall::Toiture(_) => SubmissionStep::Toiture,
            PlannedCall::SystemeElectrique(_) => SubmissionStep::SystemeElectrique,
            PlannedCall::SystemeChauffage(_) => SubmissionStep::SystemeChauffage,
            PlannedCall::SystemeVentilation(_) => SubmissionStep::SystemeVentilation,
            PlannedCall::SystemePlomberie(_) => SubmissionStep::SystemePlomberie,
        }
    }

    fn operation(&self) -> ApiOperation {
        match self {
            PlannedCall::Terrain(_) => ApiOperation::SetTerrain,
            PlannedCall::Fondations(_) => ApiOperation::SetFondations,
            PlannedCall::Niveau(_) => ApiOperation::AddNiveau,
            PlannedCall::Toiture(_) => ApiOperation::SetToiture,
            PlannedCall::SystemeElectrique(_) => ApiOperation::SetSystemeElectrique,
            PlannedCall::SystemeChauffage(_) => ApiOperation::SetSystemeChauffage,
            PlannedCall::SystemeVentilation(_) => ApiOperation::SetSystemeVentilation,
            PlannedCall::SystemePlomberie(_) => ApiOperation::SetSystemePlomberie,
        }
    }

    async fn run(&self, repository: &BatimentRepository, id: &str) -> Result<Batiment, ApiError> {
        let api = repository.api();
        let call = match self {
            PlannedCall::Terrain(terrain) => api.set_terrain(id, terrain),
            PlannedCall::Fondations(fondations) => api.set_fondations(id, fondations),
            PlannedCall::Niveau(payload) => api.add_niveau(id, payload),
            PlannedCall::Toiture(toiture) => api.set_toiture(id, toiture),
            PlannedCall::SystemeElectrique(systeme) => api.set_systeme_electrique(id, systeme),
            PlannedCall::SystemeChauffage(systeme) => api.set_systeme_chauffage(id, systeme),
            PlannedCall::SystemeVentilation(systeme) => api.set_systeme_ventilation(id, systeme),
            PlannedCall::SystemePlomberie(systeme) => api.set_systeme_plomberie(id, systeme),
        };
        repository.mutate(self.operation(), Some(id), call).await
    }
}

/// 按固定顺序列出创建之后需要发出的写调用；未填写的部分被跳过。
pub fn plan(data: &WizardData) -> Vec<PlannedCall> {
    let mut calls = Vec::new();

    let terrain = &data.terrain;
    if let (Some(surface), Some(type_sol)) = (terrain.surface.filter(|s| *s > 0.0), terrain.type_sol)
    {
        calls.push(PlannedCall::Terrain(Terrain {
            surface,
            type_sol: Some(type_sol),
            altitude: terrain.altitude,
            ..Terrain::default()
        }));
    }

    let fondations = &data.fondations;
    if let (Some(type_fondation), Some(profondeur)) = (
        fondations.type_fondation,
        fondations.profondeur.filter(|p| *p > 0.0),
    ) {
        calls.push(PlannedCall::Fondations(Fondations::new(type_fondation, profondeur)));
    }

    let dimensions = &data.dimensions;
    let hauteur = dimensions
        .hauteur_sous_plafond
        .filter(|h| *h > 0.0)
        .unwrap_or(HAUTEUR_SOUS_PLAFOND_DEFAUT);
    for index in 0..dimensions.nombre_niveaux.unwrap_or(0) {
        let nom = if index == 0 {
            "RDC".to_string()
        } else {
            format!("Étage {index}")
        };
        calls.push(PlannedCall::Niveau(NiveauPayload {
            nom,
            numero: index as i32,
            altitude: f64::from(index) * hauteur,
            altitude_plancher: None,
            hauteur_sous_plafond: hauteur,
            surface: None,
        }));
    }

    let toiture = &data.toiture;
    if let (Some(type_toiture), Some(pente)) = (toiture.type_toiture, toiture.pente) {
        let mut value = Toiture::new(type_toiture, pente);
        value.forme = toiture.forme;
        value.surface_totale = toiture.surface_totale;
        calls.push(PlannedCall::Toiture(value));
    }

    let systemes = &data.systemes;
    let electrique = &systemes.electrique;
    let abonnement = electrique.puissance_abonnement.filter(|p| *p > 0.0);
    if abonnement.is_some() || electrique.type_tableau.is_some() {
        calls.push(PlannedCall::SystemeElectrique(SystemeElectrique {
            puissance_abonnement: abonnement.unwrap_or(0.0),
            tableau_electrique: electrique.type_tableau.map(|type_tableau| TableauElectrique {
                puissance: 0.0,
                nombre_circuits: 0,
                type_tableau,
            }),
        }));
    }
    if let Some(type_generateur) = systemes.chauffage.type_generateur {
        calls.push(PlannedCall::SystemeChauffage(SystemeChauffage {
            type_chauffage: None,
            generateur: Some(GenerateurChauffage {
                type_generateur,
                puissance: systemes.chauffage.puissance.unwrap_or(0.0),
                energie: systemes.chauffage.energie.unwrap_or_default(),
                rendement: None,
            }),
        }));
    }
    if let Some(type_ventilation) = systemes.ventilation.type_ventilation {
        calls.push(PlannedCall::SystemeVentilation(SystemeVentilation {
            type_ventilation,
        }));
    }
    if let Some(type_production) = systemes.plomberie.type_production_eau_chaude {
        calls.push(PlannedCall::SystemePlomberie(SystemePlomberie {
            production_eau_chaude: Some(ProductionEauChaude {
                type_production,
                capacite: systemes.plomberie.capacite.unwrap_or(0.0),
                puissance: None,
            }),
            ..SystemePlomberie::default()
        }));
    }

    calls
}

/// 单步结果。
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub step: SubmissionStep,
    pub error: Option<ApiError>,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 建筑创建成功之后的逐步报告。
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReport {
    pub batiment_id: String,
    pub steps: Vec<StepOutcome>,
    /// 最后一次读取到的聚合（补偿删除成功后为空）。
    pub batiment: Option<Batiment>,
    pub rollback_error: Option<ApiError>,
}

impl SubmissionReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Succeeded(Batiment),
    /// 建筑已存在但缺少部分配置。
    PartiallyCreated(SubmissionReport),
    /// 部分失败后已删除建筑。
    RolledBack(SubmissionReport),
    /// 创建本身失败，服务端没有留下任何数据。
    Failed(ApiError),
}

/// 执行完整的提交序列。
pub async fn submit(
    repository: &BatimentRepository,
    data: &WizardData,
    policy: RollbackPolicy,
) -> WizardOutcome {
    if let Err(errors) = WizardStep::General.validate(data) {
        return WizardOutcome::Failed(ApiError::bad_request(DEFAULT_ERROR_MESSAGE, errors.into()));
    }
    let general = &data.general;
    let (Some(nom), Some(type_batiment)) = (general.nom.as_deref(), general.type_batiment) else {
        return WizardOutcome::Failed(ApiError::bad_request(DEFAULT_ERROR_MESSAGE, Vec::new()));
    };
    let adresse = general
        .adresse
        .as_deref()
        .map(str::trim)
        .filter(|adresse| !adresse.is_empty())
        .map(str::to_string);
    let request = BatimentUpsertRequest::basic(nom.trim(), type_batiment, adresse);

    let created = match repository
        .mutate(
            ApiOperation::Create,
            None,
            repository.api().create(&request, false),
        )
        .await
    {
        Ok(batiment) => batiment,
        Err(err) => {
            warn!(target: "batiment.wizard", "building creation failed: {}", err);
            return WizardOutcome::Failed(err);
        }
    };
    let id = created.id.clone();
    info!(target: "batiment.wizard", batiment_id = %id, "building created");

    let mut steps = Vec::new();
    for call in plan(data) {
        let step = call.step();
        let error = call.run(repository, &id).await.err();
        if let Some(err) = &error {
            warn!(
                target: "batiment.wizard",
                batiment_id = %id,
                step = %step,
                "wizard step failed: {}",
                err
            );
        }
        steps.push(StepOutcome { step, error });
    }

    let batiment = match repository.detail(&id).await {
        Ok(batiment) => Some(batiment),
        Err(err) => {
            steps.push(StepOutcome {
                step: SubmissionStep::Reload,
                error: Some(err),
            });
            None
        }
    };
    let mut report = SubmissionReport {
        batiment_id: id,
        steps,
        batiment,
        rollback_error: None,
    };

    if report.is_complete()
        && let Some(batiment) = report.batiment.take()
    {
        info!(target: "batiment.wizard", batiment_id = %batiment.id, "wizard completed");
        return WizardOutcome::Succeeded(batiment);
    }

    batiment_telemetry::record_wizard_partial_failure();
    warn!(
        target: "batiment.wizard",
        batiment_id = %report.batiment_id,
        failed = report.failures().count(),
        "building partially created"
    );

    if policy == RollbackPolicy::DeleteOnFailure {
        let id = report.batiment_id.clone();
        match repository
            .mutate(ApiOperation::Delete, Some(&id), repository.api().delete(&id))
            .await
        {
            Ok(()) => {
                info!(target: "batiment.wizard", batiment_id = %id, "partial building deleted");
                report.batiment = None;
                return WizardOutcome::RolledBack(report);
            }
            Err(err) => {
                warn!(target: "batiment.wizard", batiment_id = %id, "rollback failed: {}", err);
                report.rollback_error = Some(err);
            }
        }
    }
    WizardOutcome::PartiallyCreated(report)
}
