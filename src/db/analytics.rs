//! # 방문 통계 데이터베이스 쿼리 모듈
//!
//! - `page_views`: 페이지뷰 이벤트 로그 (append-only)
//! - `active_sessions`: 세션별 마지막 하트비트 (세션당 한 행, upsert)

use crate::db::{new_id, now_millis};
use crate::error::AppError;
use crate::models::{PageStat, PageType, SiteStats};
use sqlx::SqlitePool;

/// 이 시간(밀리초) 안에 하트비트가 있었던 세션을 "활성"으로 봅니다. (2분)
pub const ACTIVE_WINDOW_MS: i64 = 2 * 60 * 1000;
/// 통계에 포함할 인기 페이지 수
pub const TOP_PAGES_LIMIT: i64 = 10;

/// 페이지뷰 이벤트 한 건을 기록합니다.
pub async fn record_page_view(
    pool: &SqlitePool,
    path: &str,
    page_type: PageType,
    session_id: &str,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO page_views (id, path, page_type, session_id, timestamp) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(new_id())
    .bind(path)
    .bind(page_type.as_str())
    .bind(session_id)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// 세션의 현재 경로와 마지막 활동 시각을 갱신합니다.
///
/// 활성 구간을 벗어난 다른 세션의 행은 이때 함께 지웁니다.
pub async fn record_heartbeat(
    pool: &SqlitePool,
    session_id: &str,
    current_path: &str,
) -> Result<(), AppError> {
    let now = now_millis();
    prune_stale_sessions(pool, now).await?;

    sqlx::query(
        r#"
        INSERT INTO active_sessions (session_id, current_path, last_seen) VALUES (?, ?, ?)
        ON CONFLICT (session_id) DO UPDATE SET
            current_path = excluded.current_path,
            last_seen = excluded.last_seen
        "#,
    )
    .bind(session_id)
    .bind(current_path)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// 마지막 하트비트가 `now_ms - ACTIVE_WINDOW_MS`보다 오래된 세션을 삭제하고 삭제된 행 수를 반환합니다.
async fn prune_stale_sessions(pool: &SqlitePool, now_ms: i64) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM active_sessions WHERE last_seen < ?")
        .bind(now_ms - ACTIVE_WINDOW_MS)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// 사이트 전체 통계를 계산합니다.
///
/// `now_ms`를 인자로 받아, 활성 방문자 계산 기준 시각을 테스트에서 고정할 수 있습니다.
pub async fn site_stats(pool: &SqlitePool, now_ms: i64) -> Result<SiteStats, AppError> {
    let (total_page_views, unique_visitors): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COUNT(DISTINCT session_id) FROM page_views")
            .fetch_one(pool)
            .await?;

    let (active_visitors,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM active_sessions WHERE last_seen >= ?")
            .bind(now_ms - ACTIVE_WINDOW_MS)
            .fetch_one(pool)
            .await?;

    let top_pages = sqlx::query_as::<_, PageStat>(
        r#"
        SELECT path, COUNT(*) AS views
        FROM page_views
        GROUP BY path
        ORDER BY views DESC, path ASC
        LIMIT ?
        "#,
    )
    .bind(TOP_PAGES_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(SiteStats {
        total_page_views,
        unique_visitors,
        active_visitors,
        top_pages,
    })
}
