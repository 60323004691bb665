//! 应用状态管理
//!
//! 启动时构造一次外部客户端，之后只读地在请求处理器之间共享。

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{AppConfig, ConverterKind};
use crate::github::GithubClient;
use crate::llm::LlmClient;
use crate::services::{
    LlmTransformer, PlaceholderTransformer, RepoHost, RepoService, TextTransformer,
};

/// 应用共享状态
///
/// 使用 Arc 包裹以便在多个处理器之间安全共享
pub struct AppState {
    /// 文本转换实现
    pub transformer: Arc<dyn TextTransformer>,
    /// 仓库创建服务
    pub repo_service: RepoService,
    /// Groq 客户端是否初始化成功
    pub llm_available: bool,
}

impl AppState {
    /// 用现成的组件创建应用状态
    pub fn new(
        transformer: Arc<dyn TextTransformer>,
        repo_host: Option<Arc<dyn RepoHost>>,
        llm_available: bool,
    ) -> Self {
        Self {
            transformer,
            repo_service: RepoService::new(repo_host),
            llm_available,
        }
    }

    /// 根据配置构造外部客户端
    ///
    /// 任一客户端构造失败只记录日志，对应功能不可用，进程照常启动
    pub fn from_config(config: &AppConfig) -> Self {
        let llm_client = init_llm_client(config);
        let repo_host = init_github_client(config);
        let transformer = select_transformer(config, llm_client.clone());

        Self::new(transformer, repo_host, llm_client.is_some())
    }
}

fn init_llm_client(config: &AppConfig) -> Option<Arc<LlmClient>> {
    match LlmClient::new(config.groq_api_key.as_str(), config.groq_base_url.as_str()) {
        Ok(client) => {
            info!("Groq client initialized (model={})", config.groq_model);
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("Failed to initialize Groq client: {}", e);
            None
        }
    }
}

fn init_github_client(config: &AppConfig) -> Option<Arc<dyn RepoHost>> {
    if config.github_token.is_empty() {
        warn!("GITHUB_TOKEN is not set. GitHub client not initialized.");
        return None;
    }

    let timeout = Duration::from_secs(config.http_timeout_secs);
    match GithubClient::new(
        config.github_token.as_str(),
        config.github_api_base.as_str(),
        timeout,
    ) {
        Ok(client) => {
            info!("GitHub client initialized (api_base={})", config.github_api_base);
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("Failed to initialize GitHub client: {}", e);
            None
        }
    }
}

fn select_transformer(
    config: &AppConfig,
    llm_client: Option<Arc<LlmClient>>,
) -> Arc<dyn TextTransformer> {
    match (config.converter, llm_client) {
        (ConverterKind::Llm, Some(client)) => Arc::new(LlmTransformer::new(
            client,
            config.groq_model.as_str(),
            config.temperature,
            config.max_tokens,
        )),
        (ConverterKind::Llm, None) => {
            warn!("Converter 'llm' requested but Groq client is unavailable, using placeholder");
            Arc::new(PlaceholderTransformer)
        }
        (ConverterKind::Placeholder, _) => Arc::new(PlaceholderTransformer),
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state(config: &AppConfig) -> Arc<AppState> {
    Arc::new(AppState::from_config(config))
}
