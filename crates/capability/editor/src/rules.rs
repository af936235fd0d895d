//! 本地字段校验
//!
//! 校验在发出请求之前进行；失败时收集全部字段错误并原样展示。
//! 规则：
//! - 必填文本去除首尾空格后非空
//! - 数值区间为闭区间

use api_contract::FieldError;

/// 字段级错误集合。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 某字段的第一条错误。
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// 无错误时返回 `value`，否则返回全部错误。
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.is_empty() {
            return Err(self);
        }
        match value() {
            Some(value) => Ok(value),
            None => Err(self),
        }
    }

    /// 合并另一组错误，字段名加前缀（`prefix.field`）。
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for error in other.0 {
            self.push(&format!("{prefix}.{}", error.field), error.message);
        }
    }

    /// 必填文本，返回去除空格后的值。
    pub fn required_text(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Some(value.to_string()),
            None => {
                self.push(field, format!("{field} required"));
                None
            }
        }
    }

    /// 可选文本：空白视为未填写。
    pub fn optional_text(&mut self, value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn required<T: Copy>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, format!("{field} required"));
        }
        value
    }

    pub fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) {
        if value.is_some_and(|value| value.chars().count() > max) {
            self.push(field, format!("{field} must be at most {max} characters"));
        }
    }

    /// 可选数值的下限。
    pub fn min(&mut self, field: &str, value: Option<f64>, min: f64) -> Option<f64> {
        match value {
            Some(number) if number < min || number.is_nan() => {
                self.push(field, format!("{field} must be >= {min}"));
                None
            }
            other => other,
        }
    }

    /// 可选数值的闭区间。
    pub fn range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) -> Option<f64> {
        match value {
            Some(number) if !(min..=max).contains(&number) => {
                self.push(field, format!("{field} must be between {min} and {max}"));
                None
            }
            other => other,
        }
    }

    /// 必填数值的下限。
    pub fn required_min(&mut self, field: &str, value: Option<f64>, min: f64) -> Option<f64> {
        self.required(field, value)?;
        self.min(field, value, min)
    }

    /// 必填数值的闭区间。
    pub fn required_range(
        &mut self,
        field: &str,
        value: Option<f64>,
        min: f64,
        max: f64,
    ) -> Option<f64> {
        self.required(field, value)?;
        self.range(field, value, min, max)
    }
}

impl From<FieldErrors> for Vec<FieldError> {
    fn from(errors: FieldErrors) -> Self {
        errors.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            errors.required_text("nom", Some("  Maison ")),
            Some("Maison".to_string())
        );
        assert_eq!(errors.required_text("adresse", Some("   ")), None);
        assert_eq!(errors.get("adresse"), Some("adresse required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn range_is_inclusive() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.range("pente", Some(90.0), 0.0, 90.0), Some(90.0));
        assert_eq!(errors.range("pente", Some(0.0), 0.0, 90.0), Some(0.0));
        assert!(errors.is_empty());
        assert_eq!(errors.range("pente", Some(90.5), 0.0, 90.0), None);
        assert!(errors.get("pente").is_some());
    }

    #[test]
    fn required_min_reports_missing_once() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required_min("surface", None, 0.0), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.required_min("longueur", Some(-1.0), 0.0), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn finish_keeps_errors() {
        let mut errors = FieldErrors::new();
        errors.push("nom", "nom required");
        let result: Result<u32, FieldErrors> = errors.finish(|| Some(1));
        assert!(result.is_err());
        assert_eq!(FieldErrors::new().finish(|| Some(1)), Ok(1));
    }
}
