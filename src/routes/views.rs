use crate::{db, error::AppError, routes::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

/// `GET /posts/{slug}/views` → `{ "count": n }`
pub async fn get_views(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let count = db::get_view_count(&state.pool, &slug).await?;
    Ok(Json(json!({ "count": count })))
}

/// `POST /posts/{slug}/views`: 조회수 1 증가 → `{ "count": n }`
pub async fn increment_views(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let count = db::increment_view_count(&state.pool, &slug).await?;
    Ok(Json(json!({ "count": count })))
}
