//! 仓库创建端点

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router};
use std::sync::Arc;

use super::parse_json_body;
use crate::error::AppResult;
use crate::models::{RepoCreationRequest, RepoCreationResult};
use crate::state::AppState;

/// 在 GitHub 上创建仓库
async fn create_repo(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<RepoCreationResult>)> {
    // 先检查客户端，未配置时不看请求体
    state.repo_service.ensure_configured()?;

    let req: RepoCreationRequest = parse_json_body(&body);
    let result = state.repo_service.create(&req).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// 创建仓库路由
pub fn repo_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/create-repo", post(create_repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_app, test_support::send_json};
    use crate::github::GithubClient;
    use crate::services::repo_service::tests::FakeHost;
    use crate::services::{PlaceholderTransformer, RepoHost};
    use std::path::Path;
    use std::time::Duration;

    fn app_with(host: Option<Arc<dyn RepoHost>>) -> Router {
        let state = Arc::new(AppState::new(Arc::new(PlaceholderTransformer), host, false));
        build_app(state, Path::new("does-not-exist"))
    }

    #[tokio::test]
    async fn test_unconfigured_ignores_body() {
        for body in [r#"{"name":"demo"}"#, r#"{}"#, "garbage"] {
            let (status, json) = send_json(app_with(None), "POST", "/api/create-repo", body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {}", body);
            assert!(json["error"].as_str().unwrap().contains("GITHUB_TOKEN"));
        }
    }

    #[tokio::test]
    async fn test_missing_name() {
        let host = FakeHost::succeeding("https://github.com/octocat/demo");
        for body in [r#"{"description":"x"}"#, r#"{"name":""}"#, "garbage"] {
            let (status, json) =
                send_json(app_with(Some(host.clone())), "POST", "/api/create-repo", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert!(json["error"].is_string());
        }
        assert!(host.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_created() {
        let host = FakeHost::succeeding("https://github.com/octocat/demo");
        let (status, json) = send_json(
            app_with(Some(host.clone())),
            "POST",
            "/api/create-repo",
            r#"{"name":"demo","description":"tone converter"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["repo_url"], "https://github.com/octocat/demo");
        assert!(json["message"].as_str().unwrap().contains("demo"));
        assert_eq!(
            *host.calls.lock(),
            vec![("demo".to_string(), "tone converter".to_string())]
        );
    }

    #[tokio::test]
    async fn test_non_string_description_is_treated_as_empty() {
        let host = FakeHost::succeeding("https://github.com/octocat/demo");
        let (status, json) = send_json(
            app_with(Some(host.clone())),
            "POST",
            "/api/create-repo",
            r#"{"name":"demo","description":123}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["repo_url"], "https://github.com/octocat/demo");
        assert_eq!(*host.calls.lock(), vec![("demo".to_string(), String::new())]);
    }

    #[tokio::test]
    async fn test_unreachable_github_is_upstream_failure() {
        // 绑定后立即释放，得到一个无人监听的端口
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = GithubClient::new(
            "ghp_test",
            format!("http://127.0.0.1:{}", port),
            Duration::from_secs(5),
        )
        .unwrap();
        let host: Arc<dyn RepoHost> = Arc::new(client);

        let (status, json) = send_json(
            app_with(Some(host)),
            "POST",
            "/api/create-repo",
            r#"{"name":"demo"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);
        let error = json["error"].as_str().unwrap();
        assert!(error.starts_with("Failed to create repository:"), "error: {}", error);
        assert!(error.len() > "Failed to create repository:".len());
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let host = FakeHost::failing(422, "name already exists on this account");
        let (status, json) =
            send_json(app_with(Some(host)), "POST", "/api/create-repo", r#"{"name":"demo"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("name already exists on this account"));
    }
}
