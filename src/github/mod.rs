//! GitHub REST API 客户端

mod client;
mod types;

pub use client::GithubClient;
pub use types::{CreatedRepo, GithubError};
