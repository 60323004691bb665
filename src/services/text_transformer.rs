//! 文本转换能力
//!
//! 处理器只依赖 [`TextTransformer`]，默认实现为固定占位句式；
//! 配置 `converter = "llm"` 时改用 Groq 模型。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::llm::{ChatOptions, LlmClient, LlmError};
use crate::services::PromptService;

/// 按目标对象转换文本
#[async_trait]
pub trait TextTransformer: Send + Sync {
    /// 实现名称，用于健康检查与日志
    fn name(&self) -> &'static str;

    async fn transform(&self, text: &str, target: &str) -> Result<String, LlmError>;
}

/// 占位实现：把输入嵌入固定句式，不发起任何外部调用
pub struct PlaceholderTransformer;

#[async_trait]
impl TextTransformer for PlaceholderTransformer {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn transform(&self, text: &str, target: &str) -> Result<String, LlmError> {
        Ok(format!(
            "'{}' rewritten in a tone suited for '{}'. (This is a placeholder response.)",
            text, target
        ))
    }
}

/// 基于 Groq 模型的实现
pub struct LlmTransformer {
    client: Arc<LlmClient>,
    prompts: PromptService,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl LlmTransformer {
    pub fn new(
        client: Arc<LlmClient>,
        model: impl Into<String>,
        temperature: f64,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            prompts: PromptService::new(),
            model: model.into(),
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl TextTransformer for LlmTransformer {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn transform(&self, text: &str, target: &str) -> Result<String, LlmError> {
        let messages = self.prompts.build_conversion_messages(text, target);
        let options = ChatOptions {
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        };

        let result = self
            .client
            .stream_and_collect(messages, &self.model, options)
            .await?;

        info!(
            "Conversion completed: chunks={}, finish_reason={:?}",
            result.chunk_count, result.finish_reason
        );
        Ok(result.content.trim().to_string())
    }
}
