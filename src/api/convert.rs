//! 文本转换端点

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use std::sync::Arc;
use tracing::info;

use super::parse_json_body;
use crate::error::{AppError, AppResult};
use crate::models::{ConversionRequest, ConversionResponse};
use crate::state::AppState;

/// 按目标对象转换文本
async fn convert_text(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<ConversionResponse>> {
    let req: ConversionRequest = parse_json_body(&body);
    let (text, target) = req
        .into_required()
        .ok_or_else(|| AppError::BadRequest("Both text and target are required.".to_string()))?;

    let converted_text = state.transformer.transform(&text, &target).await?;
    info!(
        "Text converted: converter={}, chars={}",
        state.transformer.name(),
        text.chars().count()
    );

    Ok(Json(ConversionResponse {
        original_text: text,
        converted_text,
        target,
    }))
}

/// 创建文本转换路由
pub fn convert_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/convert", post(convert_text))
}
