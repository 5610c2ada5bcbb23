//! # 리액션 데이터베이스 쿼리 모듈
//!
//! ## 토글(toggle) 방식
//! ```text
//! (session, slug, emoji) 행이 있음 → DELETE → false ("removed")
//! (session, slug, emoji) 행이 없음 → INSERT → true  ("added")
//! ```
//! 같은 요청을 반복하면 추가/제거가 번갈아 일어납니다. 카운터가 아닙니다.

use crate::db::{new_id, now_millis};
use crate::error::AppError;
use crate::models::{Emoji, ReactionCount};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// 게시글의 이모지별 리액션 수를 조회합니다.
///
/// 허용된 다섯 이모지를 항상 같은 순서로, 0인 것도 포함해 반환합니다.
pub async fn reaction_counts(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Vec<ReactionCount>, AppError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT emoji, COUNT(*) FROM reactions WHERE slug = ? GROUP BY emoji",
    )
    .bind(slug)
    .fetch_all(pool)
    .await?;

    let counts: HashMap<String, i64> = rows.into_iter().collect();

    Ok(Emoji::ALL
        .iter()
        .map(|emoji| ReactionCount {
            emoji: emoji.as_str().to_string(),
            count: counts.get(emoji.as_str()).copied().unwrap_or(0),
        })
        .collect())
}

/// 특정 세션이 게시글에 남긴 이모지 목록을 조회합니다.
pub async fn user_reactions(
    pool: &SqlitePool,
    slug: &str,
    session_id: &str,
) -> Result<Vec<String>, AppError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT emoji FROM reactions WHERE session_id = ? AND slug = ? ORDER BY timestamp ASC",
    )
    .bind(session_id)
    .bind(slug)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(emoji,)| emoji).collect())
}

/// 리액션을 토글합니다.
///
/// # 반환값
/// - `Ok(true)`: 새로 추가됨
/// - `Ok(false)`: 기존 리액션이 제거됨
pub async fn toggle_reaction(
    pool: &SqlitePool,
    slug: &str,
    emoji: Emoji,
    session_id: &str,
) -> Result<bool, AppError> {
    // 먼저 삭제를 시도하고, 지워진 행이 있으면 "제거"로 끝냅니다.
    let removed = sqlx::query(
        "DELETE FROM reactions WHERE session_id = ? AND slug = ? AND emoji = ?",
    )
    .bind(session_id)
    .bind(slug)
    .bind(emoji.as_str())
    .execute(pool)
    .await?;

    if removed.rows_affected() > 0 {
        return Ok(false);
    }

    insert_reaction(pool, slug, emoji, session_id).await
}

/// 리액션 한 행을 추가합니다.
///
/// UNIQUE (session_id, slug, emoji) 제약 때문에 동시에 들어온 같은 요청은
/// 한쪽만 들어가고, 무시된 쪽은 `Ok(false)`를 받습니다.
async fn insert_reaction(
    pool: &SqlitePool,
    slug: &str,
    emoji: Emoji,
    session_id: &str,
) -> Result<bool, AppError> {
    let inserted = sqlx::query(
        r#"
        INSERT OR IGNORE INTO reactions (id, slug, emoji, session_id, timestamp)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(new_id())
    .bind(slug)
    .bind(emoji.as_str())
    .bind(session_id)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(inserted.rows_affected() > 0)
}
