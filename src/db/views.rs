use crate::error::AppError;
use sqlx::SqlitePool;

/// 게시글 조회수를 1 증가시키고 증가된 값을 반환합니다.
///
/// 행이 없으면 count = 1로 새로 만듭니다. 중복 방문은 구분하지 않습니다.
pub async fn increment_view_count(pool: &SqlitePool, slug: &str) -> Result<i64, AppError> {
    // ON CONFLICT ... DO UPDATE: SQLite의 upsert 문법. 한 문장이므로 원자적으로 처리됩니다.
    let (count,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO view_counts (slug, count) VALUES (?, 1)
        ON CONFLICT (slug) DO UPDATE SET count = count + 1
        RETURNING count
        "#,
    )
    .bind(slug)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// 게시글 조회수를 조회합니다. 기록이 없으면 0입니다.
pub async fn get_view_count(pool: &SqlitePool, slug: &str) -> Result<i64, AppError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT count FROM view_counts WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(count,)| count).unwrap_or(0))
}
