//! GitHub 客户端实现

use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client, RequestBuilder, StatusCode,
};
use std::time::Duration;
use tracing::{debug, error};

use super::types::{CreateRepoRequest, CreatedRepo, ErrorBody, GithubError};

const API_VERSION: &str = "2022-11-28";

/// 为请求附加 GitHub 通用请求头
trait GithubHeaders {
    fn github_headers(self, token: &str) -> RequestBuilder;
}

impl GithubHeaders for RequestBuilder {
    fn github_headers(self, token: &str) -> RequestBuilder {
        self.bearer_auth(token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(USER_AGENT, concat!("tone-backend/", env!("CARGO_PKG_VERSION")))
    }
}

/// 以令牌所属账号身份调用 GitHub API
pub struct GithubClient {
    client: Client,
    token: String,
    api_base: String,
}

impl GithubClient {
    /// 创建新的 GitHub 客户端
    ///
    /// 不发起网络请求，令牌是否有效要到第一次调用时才知道
    pub fn new(
        token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GithubError> {
        let token = token.into();
        if token.is_empty() {
            return Err(GithubError::Config("GITHUB_TOKEN is not set".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// 在当前认证用户下创建仓库
    pub async fn create_repo(
        &self,
        name: &str,
        description: &str,
    ) -> Result<CreatedRepo, GithubError> {
        let url = format!("{}/user/repos", self.api_base);
        debug!("GitHub request: POST {}", url);

        let response = self
            .client
            .post(&url)
            .github_headers(&self.token)
            .json(&CreateRepoRequest { name, description })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("GitHub API error: status={}, body={}", status.as_u16(), body);
            return Err(GithubError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(response.json::<CreatedRepo>().await?)
    }
}

/// 从错误响应中提取可读信息
///
/// 优先使用 `message` 字段，并附上第一条 `errors[].message`
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            let detail = parsed.errors.into_iter().find_map(|e| e.message);
            return match detail {
                Some(detail) => format!("{} ({})", message, detail),
                None => message,
            };
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        body.to_string()
    }
}
