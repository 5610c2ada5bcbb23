//! # markdown-blog 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. SQLite 데이터베이스 연결 풀 생성
//! 5. 데이터베이스 마이그레이션 실행
//! 6. 마크다운 게시글 동기화 (디렉토리가 있을 때만)
//! 7. 라우터 구성 후 HTTP 서버 시작
//!
//! 라우터와 핸들러는 모두 라이브러리 크레이트(`markdown_blog`)에 있습니다.

use anyhow::Result;
use markdown_blog::{config::Config, db, routes::AppState, services::markdown};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok(): .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // EnvFilter: RUST_LOG 환경변수로 로그 레벨을 제어합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "markdown_blog=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting markdown-blog server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    let pool = db::connect(&config.database_url).await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    db::MIGRATOR.run(&pool).await?;

    // ── 6단계: 마크다운 게시글 동기화 ──
    // 실패해도 서버는 뜹니다. 기존 테이블 내용으로 계속 서빙합니다.
    let posts_path = Path::new(&config.posts_path);
    if posts_path.is_dir() {
        match markdown::load_posts(posts_path).await {
            Ok(posts) => match db::sync_posts(&pool, &posts).await {
                Ok(result) => tracing::info!(
                    "Synced posts from {}: {} created, {} updated, {} deleted",
                    config.posts_path,
                    result.created,
                    result.updated,
                    result.deleted
                ),
                Err(e) => tracing::error!("Post sync failed: {}", e),
            },
            Err(e) => tracing::error!("Failed to load markdown posts: {}", e),
        }
    } else {
        tracing::warn!("Posts directory {} not found, skipping sync", config.posts_path);
    }

    // ── 7단계: 라우터 구성 및 서버 시작 ──
    let state = AppState {
        pool,
        site: config.site.clone(),
        sync_token: config.sync_token.clone(),
    };
    let app = markdown_blog::app(state, Some(Path::new(&config.frontend_dist)));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
