//! 单例子资源表单
//!
//! 状态机：查看 → 编辑（有数据时预填，否则空白）→ 查看（保存成功或取消）。
//! - 提交前先做本地校验；失败时停留在编辑态且不发出请求
//! - 保存成功后失效建筑详情缓存并回到查看态
//! - 网络或服务端失败时停留在编辑态并给出非阻塞提示，不自动重试
//! - `begin_submit` 与 `finish_submit` 之间表单处于保存中（`is_busy`）

use crate::ApiFuture;
use crate::rules::FieldErrors;
use batiment_cache::BatimentRepository;
use batiment_client::{ApiError, ApiOperation, BatimentApi};
use domain::Batiment;
use std::marker::PhantomData;
use tracing::{info, warn};

/// 单例子资源的描述：取值、草稿、本地校验与保存调用。
pub trait ElementSpec {
    type Value: Clone + Send + Sync;
    type Draft: Clone + Default;

    const LABEL: &'static str;
    const SAVE: ApiOperation;

    fn current(batiment: &Batiment) -> Option<&Self::Value>;
    fn draft_from(value: &Self::Value) -> Self::Draft;
    fn validate(draft: &Self::Draft) -> Result<Self::Value, FieldErrors>;
    fn save<'a>(
        api: &'a dyn BatimentApi,
        batiment_id: &'a str,
        value: &'a Self::Value,
    ) -> ApiFuture<'a, Batiment>;
}

/// 可删除的单例子资源（仅地块与基础）。
pub trait DeletableElement: ElementSpec {
    const DELETE: ApiOperation;

    fn delete<'a>(api: &'a dyn BatimentApi, batiment_id: &'a str) -> ApiFuture<'a, Batiment>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode<D> {
    View,
    Edit(D),
}

/// 非阻塞提示。
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 本地校验失败，未发出请求。
    Invalid(FieldErrors),
    Saved(Batiment),
    Failed(ApiError),
    /// 当前不在编辑态。
    Idle,
}

/// 单例子资源表单。
pub struct ElementForm<S: ElementSpec> {
    batiment_id: String,
    mode: FormMode<S::Draft>,
    errors: FieldErrors,
    notice: Option<Notice>,
    busy: bool,
}

impl<S: ElementSpec> ElementForm<S> {
    pub fn new(batiment_id: impl Into<String>) -> Self {
        Self {
            batiment_id: batiment_id.into(),
            mode: FormMode::View,
            errors: FieldErrors::new(),
            notice: None,
            busy: false,
        }
    }

    pub fn batiment_id(&self) -> &str {
        &self.batiment_id
    }

    pub fn mode(&self) -> &FormMode<S::Draft> {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// 查看态展示的数据；`None` 表示空状态。
    pub fn current<'b>(&self, batiment: &'b Batiment) -> Option<&'b S::Value> {
        S::current(batiment)
    }

    /// 进入编辑态：已有数据时逐字段预填，否则为空白草稿。
    pub fn begin_edit(&mut self, batiment: &Batiment) {
        let draft = S::current(batiment)
            .map(S::draft_from)
            .unwrap_or_default();
        self.errors = FieldErrors::new();
        self.mode = FormMode::Edit(draft);
    }

    pub fn draft(&self) -> Option<&S::Draft> {
        match &self.mode {
            FormMode::Edit(draft) => Some(draft),
            FormMode::View => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut S::Draft> {
        match &mut self.mode {
            FormMode::Edit(draft) => Some(draft),
            FormMode::View => None,
        }
    }

    /// 放弃编辑内容并回到查看态。
    pub fn cancel(&mut self) {
        self.mode = FormMode::View;
        self.errors = FieldErrors::new();
    }

    /// 本地校验通过后进入保存中状态，返回待发出的请求。
    ///
    /// 不在编辑态时返回 `Idle`，校验失败时返回 `Invalid`，两者都不发出请求。
    pub fn begin_submit(&mut self) -> Result<PendingSave<S>, SubmitOutcome> {
        let Some(draft) = self.draft() else {
            return Err(SubmitOutcome::Idle);
        };
        let value = match S::validate(draft) {
            Ok(value) => value,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitOutcome::Invalid(errors));
            }
        };
        self.errors = FieldErrors::new();
        self.busy = true;
        Ok(PendingSave {
            batiment_id: self.batiment_id.clone(),
            value,
        })
    }

    /// 应用保存结果并结束保存中状态。
    pub fn finish_submit(&mut self, result: Result<Batiment, ApiError>) -> SubmitOutcome {
        self.busy = false;
        match result {
            Ok(batiment) => {
                info!(
                    target: "batiment.editor",
                    batiment_id = %self.batiment_id,
                    element = S::LABEL,
                    "element saved"
                );
                self.mode = FormMode::View;
                self.notice = Some(Notice::Success(format!("{} enregistré", S::LABEL)));
                SubmitOutcome::Saved(batiment)
            }
            Err(err) => {
                warn!(
                    target: "batiment.editor",
                    batiment_id = %self.batiment_id,
                    element = S::LABEL,
                    "element save failed: {}",
                    err
                );
                self.notice = Some(Notice::Error(err.message.clone()));
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
}

/// 已通过本地校验、等待发出的保存请求。
pub struct PendingSave<S: ElementSpec> {
    batiment_id: String,
    value: S::Value,
}

impl<S: ElementSpec> PendingSave<S> {
    pub fn value(&self) -> &S::Value {
        &self.value
    }

    /// 发出保存请求；成功后失效该建筑的缓存。
    pub async fn send(&self, repository: &BatimentRepository) -> Result<Batiment, ApiError> {
        repository
            .mutate(
                S::SAVE,
                Some(&self.batiment_id),
                S::save(repository.api(), &self.batiment_id, &self.value),
            )
            .await
    }
}

/// 等待发出的删除请求。
pub struct PendingDelete<S: DeletableElement> {
    batiment_id: String,
    _spec: PhantomData<fn() -> S>,
}

impl<S: DeletableElement> PendingDelete<S> {
    pub async fn send(&self, repository: &BatimentRepository) -> Result<Batiment, ApiError> {
        repository
            .mutate(
                S::DELETE,
                Some(&self.batiment_id),
                S::delete(repository.api(), &self.batiment_id),
            )
            .await
    }
}

impl<S: DeletableElement> ElementForm<S> {
    pub fn begin_delete(&mut self) -> PendingDelete<S> {
        self.busy = true;
        PendingDelete {
            batiment_id: self.batiment_id.clone(),
            _spec: PhantomData,
        }
    }

    /// 应用删除结果；成功后回到查看态（空状态）。
    pub fn finish_delete(
        &mut self,
        result: Result<Batiment, ApiError>,
    ) -> Result<Batiment, ApiError> {
        self.busy = false;
        match &result {
            Ok(_) => {
                self.mode = FormMode::View;
                self.errors = FieldErrors::new();
                self.notice = Some(Notice::Success(format!("{} supprimé", S::LABEL)));
            }
            Err(err) => {
                warn!(
                    target: "batiment.editor",
                    batiment_id = %self.batiment_id,
                    element = S::LABEL,
                    "element delete failed: {}",
                    err
                );
                self.notice = Some(Notice::Error(err.message.clone()));
            }
        }
        result
    }

    pub async fn delete(&mut self, repository: &BatimentRepository) -> Result<Batiment, ApiError> {
        let pending = self.begin_delete();
        let result = pending.send(repository).await;
        self.finish_delete(result)
    }
}
