//! GitHub API 请求/响应类型

use serde::{Deserialize, Serialize};

/// 创建仓库请求体（`POST /user/repos`）
#[derive(Debug, Serialize)]
pub(super) struct CreateRepoRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// 已创建的仓库（只取用到的字段）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRepo {
    pub full_name: String,
    pub html_url: String,
}

/// GitHub 错误响应体
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDetail {
    pub message: Option<String>,
}

/// GitHub 客户端错误
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// 配置错误
    #[error("{0}")]
    Config(String),

    /// 网络或解码错误
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// API 返回非 2xx
    #[error("{status} {message}")]
    Api { status: u16, message: String },
}
