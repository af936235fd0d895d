//! 建筑仓储：缓存读取 + 变更后按声明失效。
//!
//! 变更响应不会写回缓存；下一次读取总是重新请求。

use crate::effects::invalidation_effects;
use crate::key::QueryKey;
use crate::store::QueryCache;
use api_contract::{BatimentFilters, Page, Pagination};
use batiment_client::{ApiError, ApiOperation, BatimentApi};
use domain::{Batiment, ValidationReport};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// 缓存中保存的值。
#[derive(Debug, Clone, PartialEq)]
pub enum CachedData {
    Page(Page<Batiment>),
    All(Vec<Batiment>),
    Batiment(Batiment),
    Validation(ValidationReport),
}

fn unexpected(key: &QueryKey) -> ApiError {
    warn!(target: "batiment.cache", key = %key, "cached value has unexpected shape");
    ApiError::internal(format!("unexpected cached value for {key}"))
}

/// 建筑仓储。
pub struct BatimentRepository {
    api: Arc<dyn BatimentApi>,
    cache: QueryCache<CachedData>,
}

impl BatimentRepository {
    pub fn new(api: Arc<dyn BatimentApi>) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn api(&self) -> &dyn BatimentApi {
        self.api.as_ref()
    }

    pub fn cache(&self) -> &QueryCache<CachedData> {
        &self.cache
    }

    pub async fn list(
        &self,
        filters: &BatimentFilters,
        pagination: &Pagination,
    ) -> Result<Page<Batiment>, ApiError> {
        let key = QueryKey::batiment_list(filters, pagination);
        let api = self.api.as_ref();
        let value = self
            .cache
            .fetch(key.clone(), move || async move {
                api.list(filters, pagination).await.map(CachedData::Page)
            })
            .await?;
        match value {
            CachedData::Page(page) => Ok(page),
            _ => Err(unexpected(&key)),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Batiment>, ApiError> {
        let key = QueryKey::batiments_no_pagination();
        let api = self.api.as_ref();
        let value = self
            .cache
            .fetch(key.clone(), move || async move {
                api.list_all().await.map(CachedData::All)
            })
            .await?;
        match value {
            CachedData::All(items) => Ok(items),
            _ => Err(unexpected(&key)),
        }
    }

    pub async fn detail(&self, id: &str) -> Result<Batiment, ApiError> {
        let key = QueryKey::batiment_detail(id);
        let api = self.api.as_ref();
        let value = self
            .cache
            .fetch(key.clone(), move || async move {
                api.get(id).await.map(CachedData::Batiment)
            })
            .await?;
        match value {
            CachedData::Batiment(batiment) => Ok(batiment),
            _ => Err(unexpected(&key)),
        }
    }

    pub async fn validation(&self, id: &str) -> Result<ValidationReport, ApiError> {
        let key = QueryKey::batiment_validation(id);
        let api = self.api.as_ref();
        let value = self
            .cache
            .fetch(key.clone(), move || async move {
                api.validate(id).await.map(CachedData::Validation)
            })
            .await?;
        match value {
            CachedData::Validation(report) => Ok(report),
            _ => Err(unexpected(&key)),
        }
    }

    /// 失效给定键前缀，返回删除的条目总数。
    pub fn apply_effects(&self, effects: &[QueryKey]) -> u64 {
        effects.iter().map(|key| self.cache.invalidate(key)).sum()
    }

    /// 执行一次变更；成功后失效该操作声明的键。失败时缓存不变。
    pub async fn mutate<T, Fut>(
        &self,
        operation: ApiOperation,
        batiment_id: Option<&str>,
        call: Fut,
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let value = call.await?;
        let effects = invalidation_effects(operation, batiment_id);
        let removed = self.apply_effects(&effects);
        debug!(
            target: "batiment.cache",
            operation = operation.as_str(),
            batiment_id = batiment_id.unwrap_or(""),
            effects = effects.len(),
            removed,
            "mutation applied"
        );
        Ok(value)
    }
}
