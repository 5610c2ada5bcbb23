//! # RSS 피드 핸들러
//!
//! `GET /rss.xml` (API 경로가 아닌 사이트 루트)
//!
//! 응답 헤더:
//! - `Content-Type: application/xml`
//! - `Cache-Control: max-age=3600` (1시간)

use crate::{db, error::AppError, routes::AppState, services::rss};
use axum::{
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};

pub async fn rss_feed(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = db::list_published_posts(&state.pool).await?;
    let xml = rss::render_feed(&state.site, &posts, chrono::Utc::now());

    // (헤더 배열, 본문) 튜플도 IntoResponse를 구현합니다.
    Ok((
        [
            (CONTENT_TYPE, "application/xml"),
            (CACHE_CONTROL, "max-age=3600"),
        ],
        xml,
    ))
}
