//! 仓库创建服务
//!
//! 封装托管平台客户端，把结果归为三类错误，由 HTTP 层映射状态码。

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::github::{CreatedRepo, GithubClient, GithubError};
use crate::models::{RepoCreationRequest, RepoCreationResult};

/// 源码托管平台
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// 在认证账号下创建仓库
    async fn create_repo(&self, name: &str, description: &str) -> Result<CreatedRepo, GithubError>;
}

#[async_trait]
impl RepoHost for GithubClient {
    async fn create_repo(&self, name: &str, description: &str) -> Result<CreatedRepo, GithubError> {
        GithubClient::create_repo(self, name, description).await
    }
}

/// 仓库创建错误
#[derive(Debug, Error)]
pub enum RepoError {
    /// 启动时未能构造托管客户端
    #[error("GitHub client is not initialized. Set GITHUB_TOKEN and restart the server.")]
    Unconfigured,

    /// 请求参数错误
    #[error("{0}")]
    InvalidInput(String),

    /// 托管平台调用失败
    #[error("Failed to create repository: {message}")]
    UpstreamFailure { message: String },
}

/// 仓库创建服务
#[derive(Clone)]
pub struct RepoService {
    host: Option<Arc<dyn RepoHost>>,
}

impl RepoService {
    pub fn new(host: Option<Arc<dyn RepoHost>>) -> Self {
        Self { host }
    }

    /// 托管客户端是否可用
    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }

    /// 获取托管客户端，未配置时返回 [`RepoError::Unconfigured`]
    pub fn ensure_configured(&self) -> Result<&Arc<dyn RepoHost>, RepoError> {
        self.host.as_ref().ok_or(RepoError::Unconfigured)
    }

    /// 创建仓库
    ///
    /// 失败不重试；托管端可能已部分完成，此处不做回滚
    pub async fn create(&self, req: &RepoCreationRequest) -> Result<RepoCreationResult, RepoError> {
        let host = self.ensure_configured()?;
        let name = req
            .required_name()
            .ok_or_else(|| RepoError::InvalidInput("Repository name is required.".to_string()))?;

        match host.create_repo(name, req.description()).await {
            Ok(repo) => {
                info!("Repository created: {}", repo.full_name);
                Ok(RepoCreationResult {
                    message: format!("Repository '{}' created successfully.", name),
                    repo_url: repo.html_url,
                })
            }
            Err(e) => {
                error!("Repository creation failed for '{}': {}", name, e);
                Err(RepoError::UpstreamFailure {
                    message: e.to_string(),
                })
            }
        }
    }
}
