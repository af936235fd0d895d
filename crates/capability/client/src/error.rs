//! 统一的客户端错误结构
//!
//! - 传输错误：`status` 为空
//! - 服务端拒绝（4xx/5xx）：携带 HTTP 状态码，可选错误码与字段级错误

use api_contract::{DEFAULT_ERROR_MESSAGE, ErrorBody, FieldError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
    pub errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
            errors: Vec::new(),
        }
    }

    /// 网络/传输层错误。
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(message).with_code("TRANSPORT.ERROR")
    }

    /// 响应体无法解码。
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(message).with_code("RESPONSE.DECODE")
    }

    /// 由非 2xx 状态码与（可能缺失的）错误体构造。
    pub fn from_status(status: u16, body: Option<ErrorBody>) -> Self {
        let body = body.unwrap_or(ErrorBody {
            message: None,
            status: None,
            code: None,
            errors: None,
        });
        Self {
            message: body
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            status: Some(status),
            code: body.code,
            errors: body.errors.unwrap_or_default(),
        }
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::new(format!("{what} not found"))
            .with_status(404)
            .with_code("RESOURCE.NOT_FOUND")
    }

    pub fn bad_request(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            errors,
            ..Self::new(message).with_status(400).with_code("INVALID.REQUEST")
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message).with_status(500).with_code("INTERNAL.ERROR")
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// 转回线上错误体（本地开发服务使用）。
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            message: Some(self.message.clone()),
            status: self.status,
            code: self.code.clone(),
            errors: if self.errors.is_empty() {
                None
            } else {
                Some(self.errors.clone())
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::decode(err.to_string());
        }
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), None),
            None => Self::transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_falls_back_to_default() {
        let err = ApiError::from_status(503, None);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.status, Some(503));
        assert!(!err.is_transport());
    }

    #[test]
    fn body_fields_are_carried_over() {
        let body = ErrorBody {
            message: Some("nom requis".to_string()),
            status: Some(400),
            code: Some("VALIDATION".to_string()),
            errors: Some(vec![FieldError {
                field: "nom".to_string(),
                message: "requis".to_string(),
            }]),
        };
        let err = ApiError::from_status(400, Some(body));
        assert_eq!(err.to_string(), "nom requis");
        assert_eq!(err.code.as_deref(), Some("VALIDATION"));
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::transport("connection refused");
        assert!(err.is_transport());
        assert!(!err.is_unauthorized());
    }
}
