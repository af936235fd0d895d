//! HTTP 响应辅助函数
//!
//! 错误统一为 `{message, status, code?, errors?}`，HTTP 状态码取自 `ApiError`。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use batiment_client::ApiError;
use serde::Serialize;

/// 成功返回 200 + JSON，失败转换为统一错误响应。
pub fn json_result<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => api_error(err),
    }
}

/// 统一错误响应；没有状态码的错误按 500 处理。
pub fn api_error(err: ApiError) -> Response {
    let status = err
        .status
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut body = err.to_body();
    body.status = Some(status.as_u16());
    (status, Json(body)).into_response()
}

/// 认证错误响应
pub fn unauthorized_error() -> Response {
    api_error(
        ApiError::new("Authentification requise")
            .with_status(401)
            .with_code("AUTH.UNAUTHORIZED"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_comes_from_error() {
        let response = api_error(ApiError::not_found("Bâtiment b1"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = api_error(ApiError::transport("down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
