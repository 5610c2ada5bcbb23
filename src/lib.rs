//! # markdown-blog
//!
//! 마크다운 블로그의 콘텐츠 서버와 브라우저 측 구성요소를 담은 라이브러리입니다.
//!
//! 모듈 구조:
//! - `config`: 환경변수 설정
//! - `db`: SQLite 쿼리 (게시글, 댓글, 리액션, 공유, 구독, 통계)
//! - `error`: `AppError`와 HTTP 에러 응답
//! - `middleware`: 동기화 토큰 추출기
//! - `models`: 테이블 행/요청/응답 구조체
//! - `routes`: Axum 핸들러
//! - `services`: 마크다운 로더, 관련 글, RSS, 날짜 유틸리티
//! - `client`: 세션 ID, 테마 저장소, 페이지 트래커
//!
//! `main.rs`는 `app()`으로 만든 라우터를 띄우기만 합니다.
//! 통합 테스트(`tests/`)도 같은 `app()`을 사용합니다.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    routing::{delete, get, post},
    Router,
};
use routes::*;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// `/api/v1` 아래에 들어갈 API 라우터
///
/// 경로 파라미터는 axum 0.8 문법인 `{slug}`, `{id}`를 사용합니다.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // 게시글
        .route("/posts", get(list_posts))
        .route("/posts/sync", post(sync_posts))
        .route("/posts/{slug}", get(get_post))
        .route("/posts/{slug}/related", get(related_posts))
        .route("/preview/posts", get(list_preview_posts))
        .route("/preview/posts/{slug}", get(get_preview_post))
        // 조회수
        .route("/posts/{slug}/views", get(get_views).post(increment_views))
        // 댓글 / 하이라이트
        .route("/posts/{slug}/comments", get(list_comments).post(create_comment))
        .route("/comments/{id}", delete(delete_comment))
        .route(
            "/posts/{slug}/highlights",
            get(list_highlights).post(create_highlight),
        )
        .route("/highlights/{id}", delete(delete_highlight))
        // 리액션 / 공유
        .route("/posts/{slug}/reactions", get(get_reactions).post(toggle_reaction))
        .route("/posts/{slug}/reactions/mine", get(get_my_reactions))
        .route("/posts/{slug}/shares", get(get_shares).post(increment_share))
        // 뉴스레터
        .route("/newsletter/subscribe", post(subscribe))
        .route("/newsletter/count", get(subscriber_count))
        // 방문 통계
        .route("/analytics/page-view", post(record_page_view))
        .route("/analytics/heartbeat", post(record_heartbeat))
        .route("/analytics/stats", get(site_stats))
        // 헬스체크
        .route("/health", get(health_check))
}

/// 전체 애플리케이션 라우터를 만듭니다.
///
/// # 매개변수
/// - `state`: 모든 핸들러가 공유하는 상태
/// - `frontend_dist`: 빌드된 프론트엔드 디렉토리. 존재하면 API 외 경로를 정적 파일로 서빙하고,
///   찾을 수 없는 경로는 `index.html`로 돌려보냅니다 (SPA 라우팅).
pub fn app(state: AppState, frontend_dist: Option<&Path>) -> Router {
    // 개발 편의를 위해 모든 출처/메서드/헤더를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .nest("/api/v1", api_router())
        .route("/rss.xml", get(rss_feed));

    let router = match frontend_dist.filter(|dir| dir.exists()) {
        Some(dir) => {
            tracing::info!("Serving frontend static files from {}", dir.display());
            let serve_dir =
                ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            router.fallback_service(serve_dir)
        }
        None => {
            tracing::warn!("Frontend dist directory not found, serving API only");
            router
        }
    };

    router
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
