use crate::db::{new_id, now_millis};
use crate::error::AppError;
use crate::models::{Highlight, NewHighlight};
use sqlx::SqlitePool;

/// 게시글의 하이라이트를 작성 시각 오름차순으로 조회합니다.
pub async fn list_highlights(pool: &SqlitePool, slug: &str) -> Result<Vec<Highlight>, AppError> {
    let highlights = sqlx::query_as::<_, Highlight>(
        r#"
        SELECT id, slug, text, comment, author, start_offset, end_offset, session_id, timestamp
        FROM highlights
        WHERE slug = ?
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(slug)
    .fetch_all(pool)
    .await?;

    Ok(highlights)
}

pub async fn get_highlight(pool: &SqlitePool, id: &str) -> Result<Option<Highlight>, AppError> {
    let highlight = sqlx::query_as::<_, Highlight>(
        r#"
        SELECT id, slug, text, comment, author, start_offset, end_offset, session_id, timestamp
        FROM highlights
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(highlight)
}

pub async fn create_highlight(
    pool: &SqlitePool,
    slug: &str,
    highlight: &NewHighlight,
) -> Result<String, AppError> {
    let id = new_id();

    sqlx::query(
        r#"
        INSERT INTO highlights
            (id, slug, text, comment, author, start_offset, end_offset, session_id, timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(slug)
    .bind(&highlight.text)
    .bind(&highlight.comment)
    .bind(&highlight.author)
    .bind(highlight.start_offset)
    .bind(highlight.end_offset)
    .bind(&highlight.session_id)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn delete_highlight(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM highlights WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
