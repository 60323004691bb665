//! API 路由模块

mod convert;
mod health;
mod repo;
mod static_files;

pub use convert::convert_routes;
pub use health::health_routes;
pub use repo::repo_routes;
pub use static_files::frontend_service;

use axum::Router;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::state::AppState;

/// 创建所有 API 路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(convert_routes())
        .merge(repo_routes())
        .with_state(state)
}

/// 构建完整应用：API 路由，其余路径交给前端静态文件
pub fn build_app(state: Arc<AppState>, frontend_dir: &Path) -> Router {
    // 允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_api_routes(state)
        .fallback_service(frontend_service(frontend_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// 宽松解析 JSON 请求体
///
/// 非 JSON 或空请求体视为所有字段缺失；单个字段类型不符由模型按该字段缺失处理
fn parse_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            debug!("Unparseable request body: {}", e);
            T::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::{Body, Bytes},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    pub async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Bytes) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes)
    }

    pub async fn send_json(
        app: Router,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
