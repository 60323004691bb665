//! 应用配置管理
//!
//! 启动时加载一次：默认值 <- config.json <- 环境变量。加载结果由调用方持有，不做全局单例。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// 获取配置文件路径
///
/// 优先使用 `APP_CONFIG` 指定的路径，否则为可执行文件同级目录下的 config.json
fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("APP_CONFIG") {
        return PathBuf::from(path);
    }

    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 文本转换实现的选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// 固定占位句式，不调用外部服务
    #[default]
    Placeholder,
    /// 调用 Groq 模型进行转换
    Llm,
}

impl FromStr for ConverterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "placeholder" => Ok(ConverterKind::Placeholder),
            "llm" => Ok(ConverterKind::Llm),
            other => Err(format!("unknown converter: {}", other)),
        }
    }
}

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 前端静态文件目录
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,

    /// Groq API 密钥
    #[serde(default)]
    pub groq_api_key: String,

    /// Groq API 基础 URL（OpenAI 兼容）
    #[serde(default = "default_groq_base_url")]
    pub groq_base_url: String,

    /// 模型名称
    #[serde(default = "default_groq_model")]
    pub groq_model: String,

    /// 温度参数 (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// 最大 token 数
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 文本转换实现
    #[serde(default)]
    pub converter: ConverterKind,

    /// GitHub 个人访问令牌
    #[serde(default)]
    pub github_token: String,

    /// GitHub REST API 基础 URL
    #[serde(default = "default_github_api_base")]
    pub github_api_base: String,

    /// GitHub 请求超时（秒）
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai".to_string()
}

fn default_groq_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            frontend_dir: default_frontend_dir(),
            groq_api_key: String::new(),
            groq_base_url: default_groq_base_url(),
            groq_model: default_groq_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            converter: ConverterKind::default(),
            github_token: String::new(),
            github_api_base: default_github_api_base(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

/// 从文件加载配置
///
/// 文件不存在、无法读取或格式错误时返回 None
fn load_config_from_file(path: &Path) -> Option<AppConfig> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return None;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

impl AppConfig {
    /// 加载配置（文件 + 进程环境变量）
    pub fn load() -> Self {
        let mut config = load_config_from_file(&get_config_path()).unwrap_or_default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// 用环境变量覆盖配置项
    ///
    /// `lookup` 按变量名返回取值，便于测试时注入
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.frontend_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup("GROQ_API_KEY") {
            self.groq_api_key = key;
        }
        if let Some(url) = lookup("GROQ_BASE_URL") {
            self.groq_base_url = url;
        }
        if let Some(model) = lookup("GROQ_MODEL") {
            self.groq_model = model;
        }
        if let Some(converter) = lookup("CONVERTER") {
            match converter.parse::<ConverterKind>() {
                Ok(kind) => self.converter = kind,
                Err(e) => warn!("Ignoring CONVERTER: {}", e),
            }
        }
        if let Some(token) = lookup("GITHUB_TOKEN") {
            self.github_token = token;
        }
        if let Some(base) = lookup("GITHUB_API_BASE") {
            self.github_api_base = base;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.frontend_dir, PathBuf::from("frontend"));
        assert_eq!(config.groq_base_url, "https://api.groq.com/openai");
        assert_eq!(config.github_api_base, "https://api.github.com");
        assert_eq!(config.converter, ConverterKind::Placeholder);
        assert!(config.groq_api_key.is_empty());
        assert!(config.github_token.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup_from(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("GITHUB_TOKEN", "ghp_test"),
            ("PORT", "8080"),
            ("CONVERTER", "LLM"),
            ("FRONTEND_DIR", "/srv/www"),
        ]));

        assert_eq!(config.groq_api_key, "gsk_test");
        assert_eq!(config.github_token, "ghp_test");
        assert_eq!(config.port, 8080);
        assert_eq!(config.converter, ConverterKind::Llm);
        assert_eq!(config.frontend_dir, PathBuf::from("/srv/www"));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup_from(&[("PORT", "not-a-port"), ("CONVERTER", "gpt")]));

        assert_eq!(config.port, 5000);
        assert_eq!(config.converter, ConverterKind::Placeholder);
    }

    #[test]
    fn test_load_partial_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"port": 9000, "converter": "llm"}"#).unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.converter, ConverterKind::Llm);
        assert_eq!(config.groq_model, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_malformed_config_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ port: ").unwrap();

        assert!(load_config_from_file(&path).is_none());
        assert!(load_config_from_file(&dir.path().join("missing.json")).is_none());
    }
}
