//! 嵌套集合管理器
//!
//! 每个集合（楼层、房间、墙体、隔墙、开口）共用同一状态机：
//! - 弹窗：关闭 / 新增（空白草稿）/ 编辑（按当前数据预填）
//! - 删除前需确认：`request_delete` → `confirm_delete` 或 `cancel_delete`
//! - 成功后失效详情缓存；失败时保持当前弹窗并给出提示
//! - `begin_*` 与 `finish_*` 之间处于请求中（`is_busy`）

use crate::ApiFuture;
use crate::form::{Notice, SubmitOutcome};
use crate::rules::FieldErrors;
use batiment_cache::BatimentRepository;
use batiment_client::{ApiError, ApiOperation, BatimentApi};
use domain::Batiment;
use tracing::{info, warn};

/// 集合所在路径（至少包含建筑 id）。
pub trait CollectionScope: Clone + Send + Sync {
    fn batiment_id(&self) -> &str;
}

/// 嵌套集合的描述。
pub trait CollectionSpec {
    type Scope: CollectionScope;
    type Item: Clone;
    type Draft: Clone + Default;
    type Payload: Send + Sync;

    const LABEL: &'static str;
    const ADD: ApiOperation;
    const UPDATE: ApiOperation;
    const DELETE: ApiOperation;

    /// 作用域下的元素；作用域已不存在时为空。
    fn items<'b>(batiment: &'b Batiment, scope: &Self::Scope) -> Vec<&'b Self::Item>;
    fn item_id(item: &Self::Item) -> &str;
    fn draft_from(item: &Self::Item) -> Self::Draft;
    fn validate(draft: &Self::Draft) -> Result<Self::Payload, FieldErrors>;

    fn add<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a Self::Scope,
        payload: &'a Self::Payload,
    ) -> ApiFuture<'a, Batiment>;
    fn update<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a Self::Scope,
        item_id: &'a str,
        payload: &'a Self::Payload,
    ) -> ApiFuture<'a, Batiment>;
    fn remove<'a>(
        api: &'a dyn BatimentApi,
        scope: &'a Self::Scope,
        item_id: &'a str,
    ) -> ApiFuture<'a, Batiment>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ManagerModal<D> {
    Closed,
    Adding(D),
    Editing { item_id: String, draft: D },
}

/// 嵌套集合管理器。
pub struct CollectionManager<S: CollectionSpec> {
    scope: S::Scope,
    modal: ManagerModal<S::Draft>,
    pending_delete: Option<String>,
    errors: FieldErrors,
    notice: Option<Notice>,
    busy: bool,
}

impl<S: CollectionSpec> CollectionManager<S> {
    pub fn new(scope: S::Scope) -> Self {
        Self {
            scope,
            modal: ManagerModal::Closed,
            pending_delete: None,
            errors: FieldErrors::new(),
            notice: None,
            busy: false,
        }
    }

    pub fn scope(&self) -> &S::Scope {
        &self.scope
    }

    pub fn modal(&self) -> &ManagerModal<S::Draft> {
        &self.modal
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn items<'b>(&self, batiment: &'b Batiment) -> Vec<&'b S::Item> {
        S::items(batiment, &self.scope)
    }

    pub fn open_add(&mut self) {
        self.errors = FieldErrors::new();
        self.modal = ManagerModal::Adding(S::Draft::default());
    }

    /// 打开编辑弹窗；元素不存在时返回 `false`。
    pub fn open_edit(&mut self, batiment: &Batiment, item_id: &str) -> bool {
        let Some(item) = S::items(batiment, &self.scope)
            .into_iter()
            .find(|item| S::item_id(item) == item_id)
        else {
            return false;
        };
        self.errors = FieldErrors::new();
        self.modal = ManagerModal::Editing {
            item_id: item_id.to_string(),
            draft: S::draft_from(item),
        };
        true
    }

    pub fn draft_mut(&mut self) -> Option<&mut S::Draft> {
        match &mut self.modal {
            ManagerModal::Closed => None,
            ManagerModal::Adding(draft) => Some(draft),
            ManagerModal::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn cancel(&mut self) {
        self.modal = ManagerModal::Closed;
        self.errors = FieldErrors::new();
    }

    /// 本地校验通过后进入保存中状态，返回待发出的新增或修改请求。
    pub fn begin_submit(&mut self) -> Result<PendingItem<S>, SubmitOutcome> {
        let (item_id, draft) = match &self.modal {
            ManagerModal::Closed => return Err(SubmitOutcome::Idle),
            ManagerModal::Adding(draft) => (None, draft),
            ManagerModal::Editing { item_id, draft } => (Some(item_id.clone()), draft),
        };
        let payload = match S::validate(draft) {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitOutcome::Invalid(errors));
            }
        };
        self.errors = FieldErrors::new();
        self.busy = true;
        Ok(PendingItem {
            scope: self.scope.clone(),
            item_id,
            payload,
        })
    }

    /// 应用保存结果；成功时关闭弹窗，失败时保留弹窗。
    pub fn finish_submit(&mut self, result: Result<Batiment, ApiError>) -> SubmitOutcome {
        self.busy = false;
        match result {
            Ok(batiment) => {
                info!(
                    target: "batiment.editor",
                    batiment_id = %self.scope.batiment_id(),
                    collection = S::LABEL,
                    "collection item saved"
                );
                self.modal = ManagerModal::Closed;
                self.notice = Some(Notice::Success(format!("{} enregistré", S::LABEL)));
                SubmitOutcome::Saved(batiment)
            }
            Err(err) => {
                self.failed("save", &err);
                SubmitOutcome::Failed(err)
            }
        }
    }

    pub async fn submit(&mut self, repository: &BatimentRepository) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let result = pending.send(repository).await;
                self.finish_submit(result)
            }
            Err(outcome) => outcome,
        }
    }

    /// 标记待删除元素（等待确认）。
    pub fn request_delete(&mut self, item_id: &str) {
        self.pending_delete = Some(item_id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// 确认删除并进入请求中状态；没有待删除元素时返回 `None`。
    pub fn begin_delete(&mut self) -> Option<PendingRemoval<S>> {
        let item_id = self.pending_delete.take()?;
        self.busy = true;
        Some(PendingRemoval {
            scope: self.scope.clone(),
            item_id,
        })
    }

    pub fn finish_delete(
        &mut self,
        result: Result<Batiment, ApiError>,
    ) -> Result<Batiment, ApiError> {
        self.busy = false;
        match &result {
            Ok(_) => {
                self.notice = Some(Notice::Success(format!("{} supprimé", S::LABEL)));
            }
            Err(err) => self.failed("delete", err),
        }
        result
    }

    /// 确认删除；没有待删除元素时返回 `None`。
    pub async fn confirm_delete(
        &mut self,
        repository: &BatimentRepository,
    ) -> Option<Result<Batiment, ApiError>> {
        let pending = self.begin_delete()?;
        let result = pending.send(repository).await;
        Some(self.finish_delete(result))
    }

    pub(crate) fn failed(&mut self, action: &str, err: &ApiError) {
        warn!(
            target: "batiment.editor",
            batiment_id = %self.scope.batiment_id(),
            collection = S::LABEL,
            action,
            "collection request failed: {}",
            err
        );
        self.notice = Some(Notice::Error(err.message.clone()));
    }

    pub(crate) fn succeeded(&mut self, message: String) {
        self.notice = Some(Notice::Success(message));
    }
}

/// 已通过本地校验、等待发出的新增或修改请求。
pub struct PendingItem<S: CollectionSpec> {
    scope: S::Scope,
    item_id: Option<String>,
    payload: S::Payload,
}

impl<S: CollectionSpec> PendingItem<S> {
    /// 修改时为目标元素 id，新增时为 `None`。
    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub async fn send(&self, repository: &BatimentRepository) -> Result<Batiment, ApiError> {
        let api = repository.api();
        let batiment_id = Some(self.scope.batiment_id());
        match self.item_id.as_deref() {
            None => {
                repository
                    .mutate(S::ADD, batiment_id, S::add(api, &self.scope, &self.payload))
                    .await
            }
            Some(item_id) => {
                repository
                    .mutate(
                        S::UPDATE,
                        batiment_id,
                        S::update(api, &self.scope, item_id, &self.payload),
                    )
                    .await
            }
        }
    }
}

/// 已确认、等待发出的删除请求。
pub struct PendingRemoval<S: CollectionSpec> {
    scope: S::Scope,
    item_id: String,
}

impl<S: CollectionSpec> PendingRemoval<S> {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub async fn send(&self, repository: &BatimentRepository) -> Result<Batiment, ApiError> {
        repository
            .mutate(
                S::DELETE,
                Some(self.scope.batiment_id()),
                S::remove(repository.api(), &self.scope, &self.item_id),
            )
            .await
    }
}
