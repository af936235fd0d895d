//! 向导状态机
//!
//! 编辑 → 提交中 → 成功 / 部分创建 / 已回滚 / 失败。
//! 创建失败后保留全部数据，可直接再次提交。

use crate::model::WizardData;
use crate::steps::WizardStep;
use crate::submission::{RollbackPolicy, SubmissionReport, WizardOutcome, submit};
use batiment_cache::BatimentRepository;
use batiment_client::ApiError;
use batiment_config::ClientConfig;
use batiment_editor::FieldErrors;
use domain::Batiment;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    Editing,
    Submitting,
    Succeeded(Batiment),
    PartiallyCreated(SubmissionReport),
    RolledBack(SubmissionReport),
    Failed(ApiError),
}

impl WizardState {
    /// 是否已到达终态（需要"查看建筑"或"再建一个"）。
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WizardState::Succeeded(_)
                | WizardState::PartiallyCreated(_)
                | WizardState::RolledBack(_)
        )
    }
}

pub struct Wizard {
    step: WizardStep,
    data: WizardData,
    errors: FieldErrors,
    state: WizardState,
    policy: RollbackPolicy,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(RollbackPolicy::default())
    }
}

impl Wizard {
    pub fn new(policy: RollbackPolicy) -> Self {
        Self {
            step: WizardStep::General,
            data: WizardData::default(),
            errors: FieldErrors::new(),
            state: WizardState::Editing,
            policy,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(RollbackPolicy::from_config(config))
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn data(&self) -> &WizardData {
        &self.data
    }

    /// 终态下不可修改数据。
    pub fn data_mut(&mut self) -> Option<&mut WizardData> {
        if self.accepts_input() {
            Some(&mut self.data)
        } else {
            None
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    fn accepts_input(&self) -> bool {
        matches!(self.state, WizardState::Editing | WizardState::Failed(_))
    }

    /// 校验当前步骤后前进；失败时停留并保留错误。
    pub fn next(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(next) = self.step.next() else {
            return false;
        };
        match self.step.validate(&self.data) {
            Ok(()) => {
                self.errors = FieldErrors::new();
                self.step = next;
                true
            }
            Err(errors) => {
                debug!(
                    target: "batiment.wizard",
                    step = self.step.title(),
                    errors = errors.len(),
                    "step rejected"
                );
                self.errors = errors;
                false
            }
        }
    }

    /// 后退不校验，也不丢弃数据。
    pub fn prev(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match self.step.prev() {
            Some(prev) => {
                self.errors = FieldErrors::new();
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// 在最后一步开始提交，进入提交中状态并返回待执行的提交。
    ///
    /// 不在最后一步或不可编辑时返回 `None`；之前的步骤如有无效数据则跳回该步骤。
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.accepts_input() || !self.step.is_last() {
            return None;
        }
        for step in WizardStep::ALL {
            if let Err(errors) = step.validate(&self.data) {
                self.step = step;
                self.errors = errors;
                return None;
            }
        }
        self.errors = FieldErrors::new();
        self.state = WizardState::Submitting;
        Some(PendingSubmission {
            data: self.data.clone(),
            policy: self.policy,
        })
    }

    /// 应用提交结果；不在提交中状态时忽略。
    pub fn finish_submit(&mut self, outcome: WizardOutcome) -> &WizardState {
        if self.state != WizardState::Submitting {
            debug!(target: "batiment.wizard", "submission outcome ignored");
            return &self.state;
        }
        self.state = match outcome {
            WizardOutcome::Succeeded(batiment) => WizardState::Succeeded(batiment),
            WizardOutcome::PartiallyCreated(report) => WizardState::PartiallyCreated(report),
            WizardOutcome::RolledBack(report) => WizardState::RolledBack(report),
            WizardOutcome::Failed(err) => WizardState::Failed(err),
        };
        &self.state
    }

    pub async fn submit(&mut self, repository: &BatimentRepository) -> &WizardState {
        if let Some(pending) = self.begin_submit() {
            let outcome = pending.send(repository).await;
            self.finish_submit(outcome);
        }
        &self.state
    }

    /// "查看建筑"：返回需要打开的建筑 id（回滚后为空）。
    pub fn view_building(&self) -> Option<&str> {
        match &self.state {
            WizardState::Succeeded(batiment) => Some(&batiment.id),
            WizardState::PartiallyCreated(report) => Some(&report.batiment_id),
            _ => None,
        }
    }

    /// "再建一个"：清空全部数据并回到第一步。
    pub fn create_another(&mut self) {
        self.step = WizardStep::General;
        self.data = WizardData::default();
        self.errors = FieldErrors::new();
        self.state = WizardState::Editing;
    }
}

/// 已通过全部步骤校验、等待执行的提交（数据快照）。
pub struct PendingSubmission {
    data: WizardData,
    policy: RollbackPolicy,
}

impl PendingSubmission {
    pub fn data(&self) -> &WizardData {
        &self.data
    }

    pub async fn send(&self, repository: &BatimentRepository) -> WizardOutcome {
        submit(repository, &self.data, self.policy).await
    }
}
