//! 资源客户端接口 Trait 定义
//!
//! 每个 REST 动作对应一个方法：
//! - 建筑：init / list / list_all / get / create / update / delete / duplicate / validate
//! - 单例子资源：set_*（整体覆盖），仅地块与基础提供 delete_*
//! - 嵌套集合：楼层、房间、墙体、隔墙、开口的 add / update / delete
//!
//! 设计原则：
//! - 所有写操作返回完整 `Batiment`
//! - 所有接口返回 `ApiError`
//! - 使用 async_trait 支持动态分发

use crate::error::ApiError;
use api_contract::{
    BatimentFilters, BatimentUpsertRequest, CloisonPayload, MurPayload, NiveauPayload,
    OuverturePayload, Page, Pagination, PiecePayload,
};
use async_trait::async_trait;
use domain::{
    Batiment, Charpente, Fondations, SystemeChauffage, SystemeElectrique, SystemePlomberie,
    SystemeVentilation, Terrain, Toiture, TypeBatiment, ValidationReport,
};

/// 操作标识（日志与故障注入使用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    Init,
    List,
    ListAll,
    Get,
    Create,
    Update,
    Delete,
    Duplicate,
    Validate,
    SetTerrain,
    DeleteTerrain,
    SetFondations,
    DeleteFondations,
    SetCharpente,
    SetToiture,
    SetSystemeElectrique,
    SetSystemePlomberie,
    SetSystemeChauffage,
    SetSystemeVentilation,
    AddNiveau,
    UpdateNiveau,
    DeleteNiveau,
    DuplicateNiveau,
    AddPiece,
    UpdatePiece,
    DeletePiece,
    AddMur,
    UpdateMur,
    DeleteMur,
    AddCloison,
    UpdateCloison,
    DeleteCloison,
    AddOuverture,
    UpdateOuverture,
    DeleteOuverture,
}

impl ApiOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::List => "list",
            Self::ListAll => "list_all",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Duplicate => "duplicate",
            Self::Validate => "validate",
            Self::SetTerrain => "set_terrain",
            Self::DeleteTerrain => "delete_terrain",
            Self::SetFondations => "set_fondations",
            Self::DeleteFondations => "delete_fondations",
            Self::SetCharpente => "set_charpente",
            Self::SetToiture => "set_toiture",
            Self::SetSystemeElectrique => "set_systeme_electrique",
            Self::SetSystemePlomberie => "set_systeme_plomberie",
            Self::SetSystemeChauffage => "set_systeme_chauffage",
            Self::SetSystemeVentilation => "set_systeme_ventilation",
            Self::AddNiveau => "add_niveau",
            Self::UpdateNiveau => "update_niveau",
            Self::DeleteNiveau => "delete_niveau",
            Self::DuplicateNiveau => "duplicate_niveau",
            Self::AddPiece => "add_piece",
            Self::UpdatePiece => "update_piece",
            Self::DeletePiece => "delete_piece",
            Self::AddMur => "add_mur",
            Self::UpdateMur => "update_mur",
            Self::DeleteMur => "delete_mur",
            Self::AddCloison => "add_cloison",
            Self::UpdateCloison => "update_cloison",
            Self::DeleteCloison => "delete_cloison",
            Self::AddOuverture => "add_ouverture",
            Self::UpdateOuverture => "update_ouverture",
            Self::DeleteOuverture => "delete_ouverture",
        }
    }
}

/// 建筑资源接口
///
/// 调用方只依赖该 trait；生产环境为 HTTP 实现，测试使用内存实现。
#[async_trait]
pub trait BatimentApi: Send + Sync {
    /// 由名称与类型创建空建筑
    async fn init(&self, nom: &str, type_batiment: TypeBatiment) -> Result<Batiment, ApiError>;

    /// 分页列表
    async fn list(
        &self,
        filters: &BatimentFilters,
        pagination: &Pagination,
    ) -> Result<Page<Batiment>, ApiError>;

    /// 完整列表（不分页）
    async fn list_all(&self) -> Result<Vec<Batiment>, ApiError>;

    async fn get(&self, id: &str) -> Result<Batiment, ApiError>;

    async fn create(
        &self,
        request: &BatimentUpsertRequest,
        validate: bool,
    ) -> Result<Batiment, ApiError>;

    async fn update(
        &self,
        id: &str,
        request: &BatimentUpsertRequest,
        validate: bool,
    ) -> Result<Batiment, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    /// 服务端深拷贝，`nouveau_nom` 为空时由服务端决定名称
    async fn duplicate(&self, id: &str, nouveau_nom: Option<&str>) -> Result<Batiment, ApiError>;

    /// 服务端计算的校验报告
    async fn validate(&self, id: &str) -> Result<ValidationReport, ApiError>;

    async fn set_terrain(&self, id: &str, terrain: &Terrain) -> Result<Batiment, ApiError>;
    async fn delete_terrain(&self, id: &str) -> Result<Batiment, ApiError>;
    async fn set_fondations(&self, id: &str, fondations: &Fondations)
    -> Result<Batiment, ApiError>;
    async fn delete_fondations(&self, id: &str) -> Result<Batiment, ApiError>;
    async fn set_charpente(&self, id: &str, charpente: &Charpente) -> Result<Batiment, ApiError>;
    async fn set_toiture(&self, id: &str, toiture: &Toiture) -> Result<Batiment, ApiError>;
    async fn set_systeme_electrique(
        &self,
        id: &str,
        systeme: &SystemeElectrique,
    ) -> Result<Batiment, ApiError>;
    async fn set_systeme_plomberie(
        &self,
        id: &str,
        systeme: &SystemePlomberie,
    ) -> Result<Batiment, ApiError>;
    async fn set_systeme_chauffage(
        &self,
        id: &str,
        systeme: &SystemeChauffage,
    ) -> Result<Batiment, ApiError>;
    async fn set_systeme_ventilation(
        &self,
        id: &str,
        systeme: &SystemeVentilation,
    ) -> Result<Batiment, ApiError>;

    async fn add_niveau(&self, id: &str, niveau: &NiveauPayload) -> Result<Batiment, ApiError>;
    async fn update_niveau(
        &self,
        id: &str,
        niveau_id: &str,
        niveau: &NiveauPayload,
    ) -> Result<Batiment, ApiError>;
    async fn delete_niveau(&self, id: &str, niveau_id: &str) -> Result<Batiment, ApiError>;
    /// 楼层深拷贝（含房间、墙体、隔墙）
    async fn duplicate_niveau(&self, id: &str, niveau_id: &str) -> Result<Batiment, ApiError>;

    async fn add_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece: &PiecePayload,
    ) -> Result<Batiment, ApiError>;
    async fn update_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece_id: &str,
        piece: &PiecePayload,
    ) -> Result<Batiment, ApiError>;
    async fn delete_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece_id: &str,
    ) -> Result<Batiment, ApiError>;

    async fn add_mur(&self, id: &str, niveau_id: &str, mur: &MurPayload)
    -> Result<Batiment, ApiError>;
    async fn update_mur(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        mur: &MurPayload,
    ) -> Result<Batiment, ApiError>;
    async fn delete_mur(&self, id: &str, niveau_id: &str, mur_id: &str)
    -> Result<Batiment, ApiError>;

    async fn add_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison: &CloisonPayload,
    ) -> Result<Batiment, ApiError>;
    async fn update_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison_id: &str,
        cloison: &CloisonPayload,
    ) -> Result<Batiment, ApiError>;
    async fn delete_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison_id: &str,
    ) -> Result<Batiment, ApiError>;

    async fn add_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture: &OuverturePayload,
    ) -> Result<Batiment, ApiError>;
    async fn update_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture_id: &str,
        ouverture: &OuverturePayload,
    ) -> Result<Batiment, ApiError>;
    async fn delete_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture_id: &str,
    ) -> Result<Batiment, ApiError>;
}
