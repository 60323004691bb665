//! 统一错误处理模块
//!
//! 定义应用级错误类型，并实现 axum 的 IntoResponse trait 以便自动转换为 HTTP 响应。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;
use crate::services::RepoError;

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 服务端配置错误（所需客户端未初始化）
    #[error("配置错误: {0}")]
    Config(String),

    /// 请求参数错误
    #[error("请求错误: {0}")]
    BadRequest(String),

    /// 托管平台调用失败
    #[error("上游错误: {0}")]
    Upstream(String),

    /// LLM 调用错误
    #[error("LLM 错误: {0}")]
    Llm(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "success": false,
            "error": error_message
        }));

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::InvalidInput(msg) => AppError::BadRequest(msg),
            err @ RepoError::Unconfigured => AppError::Config(err.to_string()),
            err @ RepoError::UpstreamFailure { .. } => AppError::Upstream(err.to_string()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Llm(format!("Text conversion failed: {}", err))
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_status_mapping() {
        let cases = [
            (RepoError::Unconfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (RepoError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                RepoError::UpstreamFailure { message: "boom".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn test_upstream_message_is_embedded() {
        let err = AppError::from(RepoError::UpstreamFailure { message: "422 name taken".into() });
        match err {
            AppError::Upstream(msg) => {
                assert_eq!(msg, "Failed to create repository: 422 name taken")
            }
            other => panic!("unexpected: {}", other),
        }
    }
}
