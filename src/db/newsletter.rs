use crate::db::now_millis;
use crate::error::AppError;
use sqlx::SqlitePool;

/// 구독자를 추가합니다. `email`은 이미 정규화된 값이어야 합니다.
///
/// # 반환값
/// - `Ok(true)`: 새 구독자
/// - `Ok(false)`: 이미 구독 중 (아무것도 바뀌지 않음)
pub async fn insert_subscriber(pool: &SqlitePool, email: &str) -> Result<bool, AppError> {
    // email이 PRIMARY KEY이므로 중복이면 OR IGNORE로 조용히 무시됩니다.
    let result = sqlx::query(
        "INSERT OR IGNORE INTO subscribers (email, subscribed_at, confirmed) VALUES (?, ?, 1)",
    )
    .bind(email)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 확인된(confirmed) 구독자 수
pub async fn count_confirmed_subscribers(pool: &SqlitePool) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subscribers WHERE confirmed = 1")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
