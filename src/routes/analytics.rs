//! # 방문 통계 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/analytics/page-view`: 페이지뷰 기록 (`{path, pageType, sessionId}`)
//! - `POST /api/v1/analytics/heartbeat`: 활성 세션 갱신 (`{sessionId, currentPath}`)
//! - `GET  /api/v1/analytics/stats`: 사이트 통계
//!
//! 두 POST 엔드포인트는 `client::tracker::HttpAnalytics`가 호출합니다.

use crate::{db, error::AppError, models::*, routes::AppState};
use axum::{extract::State, http::StatusCode, Json};

/// 페이지뷰 기록: 성공 시 204 No Content
pub async fn record_page_view(
    State(state): State<AppState>,
    Json(req): Json<RecordPageViewRequest>,
) -> Result<StatusCode, AppError> {
    require_session(&req.session_id)?;
    db::record_page_view(&state.pool, &req.path, req.page_type, &req.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 하트비트 기록: 성공 시 204 No Content
pub async fn record_heartbeat(
    State(state): State<AppState>,
    Json(req): Json<HeartbeatRequest>,
) -> Result<StatusCode, AppError> {
    require_session(&req.session_id)?;
    db::record_heartbeat(&state.pool, &req.session_id, &req.current_path).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn site_stats(State(state): State<AppState>) -> Result<Json<SiteStats>, AppError> {
    let stats = db::site_stats(&state.pool, db::now_millis()).await?;
    Ok(Json(stats))
}
