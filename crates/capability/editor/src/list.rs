//! 建筑列表页
//!
//! 过滤条件变化时回到第 0 页；创建、删除、复制会失效列表键族。

use crate::form::Notice;
use crate::rules::FieldErrors;
use api_contract::{BatimentFilters, Page, Pagination};
use batiment_cache::BatimentRepository;
use batiment_client::{ApiError, ApiOperation};
use domain::{Batiment, StatutBatiment, TypeBatiment};
use tracing::{info, warn};

/// 列表页默认分页大小。
pub const LIST_PAGE_SIZE: u32 = 10;

pub struct ListView {
    filters: BatimentFilters,
    pagination: Pagination,
    page: Option<Page<Batiment>>,
    error: Option<ApiError>,
    notice: Option<Notice>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            filters: BatimentFilters::default(),
            pagination: Pagination::new(0, LIST_PAGE_SIZE),
            page: None,
            error: None,
            notice: None,
        }
    }

    pub fn filters(&self) -> &BatimentFilters {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn page(&self) -> Option<&Page<Batiment>> {
        self.page.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 名称检索；空白视为不过滤。
    pub fn search(&mut self, text: &str) {
        let text = text.trim();
        self.filters.nom = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self.pagination.page = 0;
    }

    pub fn filter_type(&mut self, type_batiment: Option<TypeBatiment>) {
        self.filters.type_batiment = type_batiment;
        self.pagination.page = 0;
    }

    pub fn filter_statut(&mut self, statut: Option<StatutBatiment>) {
        self.filters.statut = statut;
        self.pagination.page = 0;
    }

    pub fn set_page(&mut self, page: u32, size: u32) {
        self.pagination.page = page;
        self.pagination.size = if size == 0 { LIST_PAGE_SIZE } else { size };
    }

    pub async fn load(&mut self, repository: &BatimentRepository) {
        match repository.list(&self.filters, &self.pagination).await {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
            }
            Err(err) => {
                warn!(target: "batiment.editor", "building list failed: {}", err);
                self.error = Some(err);
            }
        }
    }

    /// 快速创建；名称为空白时本地拒绝，不发出请求。
    pub async fn quick_create(
        &mut self,
        repository: &BatimentRepository,
        nom: &str,
        type_batiment: TypeBatiment,
    ) -> Result<Batiment, QuickCreateError> {
        let mut errors = FieldErrors::new();
        let Some(nom) = errors.required_text("nom", Some(nom)) else {
            return Err(QuickCreateError::Invalid(errors));
        };
        let result = repository
            .mutate(
                ApiOperation::Init,
                None,
                repository.api().init(&nom, type_batiment),
            )
            .await;
        match result {
            Ok(batiment) => {
                info!(
                    target: "batiment.editor",
                    batiment_id = %batiment.id,
                    "building created"
                );
                self.notice = Some(Notice::Success("Bâtiment créé".to_string()));
                Ok(batiment)
            }
            Err(err) => {
                self.notice = Some(Notice::Error(err.message.clone()));
                Err(QuickCreateError::Api(err))
            }
        }
    }

    pub async fn delete(
        &mut self,
        repository: &BatimentRepository,
        id: &str,
    ) -> Result<(), ApiError> {
        let result = repository
            .mutate(ApiOperation::Delete, Some(id), repository.api().delete(id))
            .await;
        self.notice = Some(match &result {
            Ok(()) => Notice::Success("Bâtiment supprimé".to_string()),
            Err(err) => Notice::Error(err.message.clone()),
        });
        result
    }

    /// 复制为 `"{nom} (copie)"`。
    pub async fn duplicate(
        &mut self,
        repository: &BatimentRepository,
        batiment: &Batiment,
    ) -> Result<Batiment, ApiError> {
        let nouveau_nom = format!("{} (copie)", batiment.nom);
        let result = repository
            .mutate(
                ApiOperation::Duplicate,
                Some(&batiment.id),
                repository.api().duplicate(&batiment.id, Some(&nouveau_nom)),
            )
            .await;
        self.notice = Some(match &result {
            Ok(_) => Notice::Success("Bâtiment dupliqué".to_string()),
            Err(err) => Notice::Error(err.message.clone()),
        });
        result
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuickCreateError {
    Invalid(FieldErrors),
    Api(ApiError),
}
