//! REST API 请求/响应模型
//!
//! 请求字段全部为 Option，缺失与空串由处理器统一按 400 处理。
//! 字段类型不是字符串时只把该字段视为缺失，不影响其他字段。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 文本转换请求
#[derive(Debug, Default, Deserialize)]
pub struct ConversionRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target: Option<String>,
}

impl ConversionRequest {
    /// 取出非空的 (text, target)
    pub fn into_required(self) -> Option<(String, String)> {
        Some((non_empty(self.text)?, non_empty(self.target)?))
    }
}

/// 文本转换响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub original_text: String,
    pub converted_text: String,
    pub target: String,
}

/// 仓库创建请求
#[derive(Debug, Default, Deserialize)]
pub struct RepoCreationRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl RepoCreationRequest {
    /// 非空的仓库名
    pub fn required_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// 描述，缺省为空串
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// 仓库创建结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoCreationResult {
    pub message: String,
    pub repo_url: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// 只接受 JSON 字符串，其他类型按缺失处理
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}
