//! 服务层模块

mod prompt_service;
pub mod repo_service;
mod text_transformer;

pub use prompt_service::PromptService;
pub use repo_service::{RepoError, RepoHost, RepoService};
pub use text_transformer::{LlmTransformer, PlaceholderTransformer, TextTransformer};
