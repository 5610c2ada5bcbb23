//! # 댓글 데이터베이스 쿼리 모듈
//!
//! 소유권(session_id) 검사는 라우트 핸들러가 `get_comment`로 먼저 확인한 뒤
//! `delete_comment`를 호출하는 방식으로 처리합니다.

use crate::db::{new_id, now_millis};
use crate::error::AppError;
use crate::models::{Comment, NewComment};
use sqlx::SqlitePool;

/// 게시글의 댓글을 작성 시각 오름차순으로 조회합니다.
pub async fn list_comments(pool: &SqlitePool, slug: &str) -> Result<Vec<Comment>, AppError> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, slug, author, content, session_id, timestamp
        FROM comments
        WHERE slug = ?
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(slug)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// ID로 댓글 하나를 조회합니다.
pub async fn get_comment(pool: &SqlitePool, id: &str) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        "SELECT id, slug, author, content, session_id, timestamp FROM comments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// 검증된 댓글을 저장하고 새 ID를 반환합니다.
pub async fn create_comment(
    pool: &SqlitePool,
    slug: &str,
    comment: &NewComment,
) -> Result<String, AppError> {
    let id = new_id();

    sqlx::query(
        r#"
        INSERT INTO comments (id, slug, author, content, session_id, timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(slug)
    .bind(&comment.author)
    .bind(&comment.content)
    .bind(&comment.session_id)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(id)
}

/// 댓글을 삭제합니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제 성공
/// - `Ok(false)`: 해당 ID의 댓글이 없음
pub async fn delete_comment(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
