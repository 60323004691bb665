//! OpenAI 兼容 Chat Completions 流式实现（Groq 使用同一协议）

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tracing::{debug, error};

use super::format::build_chat_endpoint;
use super::types::{ChatChunk, ChatMessage, ChatOptions, LlmError};

/// 请求载荷
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// SSE 响应块
#[derive(Deserialize, Debug)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StreamDelta {
    content: Option<String>,
}

/// 单行 SSE 的解析结果
#[derive(Debug)]
enum SseLine {
    Chunk(ChatChunk),
    Done,
    Skip,
}

/// 解析一行 SSE 数据
///
/// 无法解析的数据行记录 debug 日志后跳过，不中断流
fn parse_sse_line(line: &str) -> SseLine {
    let Some(data) = line.strip_prefix("data:").map(str::trim) else {
        return SseLine::Skip;
    };

    if data == "[DONE]" {
        return SseLine::Done;
    }

    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => match chunk.choices.into_iter().next() {
            Some(choice) => SseLine::Chunk(ChatChunk {
                content: choice.delta.content,
                finish_reason: choice.finish_reason,
            }),
            None => SseLine::Skip,
        },
        Err(e) => {
            debug!("Failed to parse completion chunk: {}, data: {}", e, data);
            SseLine::Skip
        }
    }
}

/// 按行切分字节流
///
/// 只在遇到 `\n` 后才解码整行，跨 chunk 的多字节字符不会被截断
#[derive(Default)]
struct LineBuffer {
    bytes: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    fn next_line(&mut self) -> Option<String> {
        let newline_pos = self.bytes.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.bytes.drain(..=newline_pos).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }
}

/// 发送请求并检查状态码
async fn send_request(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    payload: &ChatCompletionRequest,
) -> Result<Response, LlmError> {
    let response = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_text = response.text().await.unwrap_or_default();
        error!(
            "Chat completion error: status={}, body={}",
            status_code,
            error_text.chars().take(500).collect::<String>()
        );
        return Err(LlmError::ApiError {
            status: status_code,
            message: error_text,
        });
    }

    Ok(response)
}

/// 流式调用 Chat Completions API
pub fn stream_chat_completions(
    client: &Client,
    api_key: &str,
    base_url: &str,
    messages: Vec<ChatMessage>,
    model: &str,
    options: &ChatOptions,
) -> Pin<Box<dyn Stream<Item = Result<ChatChunk, LlmError>> + Send>> {
    let endpoint = build_chat_endpoint(base_url);
    let api_key = api_key.to_string();
    let model = model.to_string();
    let options = options.clone();
    let client = client.clone();

    Box::pin(try_stream! {
        let payload = ChatCompletionRequest {
            model: model.clone(),
            messages,
            stream: true,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        debug!("Chat completion request: endpoint={}, model={}", endpoint, model);

        let response = send_request(&client, &endpoint, &api_key, &payload).await?;

        let mut buffer = LineBuffer::default();
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let bytes = chunk_result?;
            buffer.push(&bytes);

            while let Some(line) = buffer.next_line() {
                match parse_sse_line(&line) {
                    SseLine::Chunk(chunk) => {
                        yield chunk;
                    }
                    SseLine::Done => return,
                    SseLine::Skip => {}
                }
            }
        }
    })
}
