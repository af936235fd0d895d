//! 资源客户端内存实现
//!
//! 在进程内模拟外部服务端：分配 id 与时间戳、整体覆盖单例子资源、
//! 深拷贝复制、计算校验报告。仅用于本地测试和开发服务。

mod batiment;
mod copy;
mod rules;

pub use rules::evaluate;

use crate::error::ApiError;
use crate::traits::ApiOperation;
use domain::Batiment;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use tracing::debug;

struct Entry {
    seq: u64,
    batiment: Batiment,
}

/// 内存版建筑资源服务。
pub struct InMemoryBatimentApi {
    entries: RwLock<HashMap<String, Entry>>,
    seq: AtomicU64,
    failures: Mutex<HashMap<ApiOperation, ApiError>>,
    calls: Mutex<HashMap<ApiOperation, usize>>,
}

impl Default for InMemoryBatimentApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBatimentApi {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            seq: AtomicU64::new(0),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// 下一次 `operation` 调用返回给定错误（一次性）。
    pub fn fail_next(&self, operation: ApiOperation, err: ApiError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(operation, err);
        }
    }

    /// 某操作被调用的次数（含注入失败的调用）。
    pub fn calls(&self, operation: ApiOperation) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(&operation).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// 当前保存的建筑数量。
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 直接写入一条记录（测试预置数据）。
    pub fn insert(&self, batiment: Batiment) -> Result<(), ApiError> {
        let seq = self.next_seq();
        let mut entries = self.write()?;
        entries.insert(batiment.id.clone(), Entry { seq, batiment });
        Ok(())
    }

    fn enter(&self, operation: ApiOperation) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(operation).or_insert(0) += 1;
        }
        let injected = self
            .failures
            .lock()
            .map_err(|_| ApiError::internal("lock failed"))?
            .remove(&operation);
        match injected {
            Some(err) => {
                debug!(
                    target: "batiment.client",
                    operation = operation.as_str(),
                    "injected failure"
                );
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Entry>>, ApiError> {
        self.entries
            .read()
            .map_err(|_| ApiError::internal("lock failed"))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Entry>>, ApiError> {
        self.entries
            .write()
            .map_err(|_| ApiError::internal("lock failed"))
    }

    /// 对已有建筑执行变更并返回完整聚合。
    fn mutate<F>(&self, operation: ApiOperation, id: &str, apply: F) -> Result<Batiment, ApiError>
    where
        F: FnOnce(&mut Batiment) -> Result<(), ApiError>,
    {
        self.enter(operation)?;
        let mut entries = self.write()?;
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found(format!("batiment {id}")))?;
        let mut candidate = entry.batiment.clone();
        apply(&mut candidate)?;
        candidate.date_modification = Some(now());
        entry.batiment = candidate.clone();
        debug!(
            target: "batiment.client",
            operation = operation.as_str(),
            batiment_id = %id,
            "in-memory mutation applied"
        );
        Ok(candidate)
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
