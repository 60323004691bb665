//! LLM 模块
//!
//! 提供 Groq（OpenAI 兼容 Chat Completions 格式）的流式客户端。

mod client;
mod format;
mod openai;
mod types;

pub use client::LlmClient;
pub use types::*;
