//! Groq LLM 客户端

use futures::{Stream, StreamExt};
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;
use tracing::info;

use super::openai::stream_chat_completions;
use super::types::{ChatChunk, ChatMessage, ChatOptions, LlmError, StreamCollectResult};

/// LLM 客户端
///
/// 构造后只读，可通过 Arc 在请求之间共享
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::ConfigError("GROQ_API_KEY is not set".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(LlmError::HttpError)?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }

    /// 流式聊天
    pub fn stream_chat(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        options: ChatOptions,
    ) -> Pin<Box<dyn Stream<Item = Result<ChatChunk, LlmError>> + Send>> {
        info!("LLM request: model={}, messages={}", model, messages.len());
        stream_chat_completions(
            &self.client,
            &self.api_key,
            &self.base_url,
            messages,
            model,
            &options,
        )
    }

    /// 流式请求并收集完整响应
    pub async fn stream_and_collect(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        options: ChatOptions,
    ) -> Result<StreamCollectResult, LlmError> {
        let mut stream = self.stream_chat(messages, model, options);
        let mut result = StreamCollectResult::default();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            result.chunk_count += 1;

            if let Some(content) = chunk.content {
                result.content.push_str(&content);
            }
            if chunk.finish_reason.is_some() {
                result.finish_reason = chunk.finish_reason;
            }
        }

        Ok(result)
    }
}
