//! 服务端计算的校验报告（不持久化，每次请求重新计算）。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// 单条校验问题。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub rule_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    pub severity: Severity,
}

/// 校验报告。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_count: Option<u32>,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
    #[serde(default)]
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// 由问题列表构造报告；无 ERROR 级问题即视为有效。
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let (errors, rest): (Vec<_>, Vec<_>) = issues
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);
        let warnings: Vec<_> = rest
            .into_iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .collect();
        Self {
            valid: errors.is_empty(),
            error_count: Some(errors.len() as u32),
            warning_count: Some(warnings.len() as u32),
            errors,
            warnings,
        }
    }

    /// 先错误后警告的扁平问题列表。
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }
}
