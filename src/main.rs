//! Tone Converter - Rust Backend
//!
//! 使用 axum 框架构建的后端服务，提供文本语气转换、GitHub 仓库创建和前端静态文件服务。

use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod github;
mod llm;
mod models;
mod services;
mod state;

use api::build_app;
use config::AppConfig;
use state::create_shared_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 先读取 .env，RUST_LOG 也可以写在里面
    let dotenv = dotenvy::dotenv();

    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tone_backend=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    info!("Starting Tone Converter backend...");

    let config = AppConfig::load();
    let state = create_shared_state(&config);

    if !config.frontend_dir.join("index.html").exists() {
        warn!(
            "Frontend index.html not found under {}",
            config.frontend_dir.display()
        );
    }

    let app = build_app(state, &config.frontend_dir);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!("Server listening on: {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
