//! 校验面板：打开时请求服务端校验报告，可随时重新请求。
//!
//! 这里不做任何规则计算，仅负责呈现。

use batiment_cache::{BatimentRepository, QueryKey};
use batiment_client::ApiError;
use domain::{Severity, ValidationReport};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Closed,
    Loading,
    Failed(ApiError),
    Ready(ValidationReport),
}

/// 扁平化后的一条问题。
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRow {
    pub severity: Severity,
    pub rule_name: String,
    pub message: String,
    pub field: Option<String>,
}

/// 一次报告请求的票据；关闭或重新请求后旧票据失效。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTicket(u64);

pub struct ValidationPanel {
    batiment_id: String,
    state: PanelState,
    ticket: u64,
}

impl ValidationPanel {
    pub fn new(batiment_id: impl Into<String>) -> Self {
        Self {
            batiment_id: batiment_id.into(),
            state: PanelState::Closed,
            ticket: 0,
        }
    }

    pub fn batiment_id(&self) -> &str {
        &self.batiment_id
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, PanelState::Closed)
    }

    pub async fn open(&mut self, repository: &BatimentRepository) {
        self.fetch(repository).await;
    }

    /// 丢弃已缓存的报告并重新请求。
    pub async fn refresh(&mut self, repository: &BatimentRepository) {
        repository
            .cache()
            .invalidate(&QueryKey::batiment_validation(&self.batiment_id));
        self.fetch(repository).await;
    }

    pub fn close(&mut self) {
        self.ticket += 1;
        self.state = PanelState::Closed;
    }

    /// 开始一次请求：进入加载态并使此前的票据失效。
    pub fn begin_fetch(&mut self) -> PanelTicket {
        self.ticket += 1;
        self.state = PanelState::Loading;
        PanelTicket(self.ticket)
    }

    /// 应用报告；票据过期（已关闭或已重新请求）时丢弃并返回 `false`。
    pub fn finish_fetch(
        &mut self,
        ticket: PanelTicket,
        result: Result<ValidationReport, ApiError>,
    ) -> bool {
        if ticket.0 != self.ticket {
            debug!(
                target: "batiment.editor",
                batiment_id = %self.batiment_id,
                "late validation report discarded"
            );
            return false;
        }
        self.state = match result {
            Ok(report) => PanelState::Ready(report),
            Err(err) => PanelState::Failed(err),
        };
        true
    }

    async fn fetch(&mut self, repository: &BatimentRepository) {
        let ticket = self.begin_fetch();
        let result = repository.validation(&self.batiment_id).await;
        self.finish_fetch(ticket, result);
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        match &self.state {
            PanelState::Ready(report) => Some(report),
            _ => None,
        }
    }

    /// 先错误后警告的扁平列表。
    pub fn issues(&self) -> Vec<IssueRow> {
        self.report()
            .map(|report| {
                report
                    .issues()
                    .map(|issue| IssueRow {
                        severity: issue.severity,
                        rule_name: issue.rule_name.clone(),
                        message: issue.message.clone(),
                        field: issue.field.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Option<String> {
        let report = self.report()?;
        if report.valid {
            return Some("Bâtiment valide".to_string());
        }
        Some(format!(
            "{} erreur(s) et {} avertissement(s)",
            report.errors.len(),
            report.warnings.len()
        ))
    }
}
