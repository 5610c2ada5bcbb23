//! # 공유 수 데이터베이스 쿼리 모듈
//!
//! `share_counts` 테이블에는 (slug, platform)마다 한 행이 있고,
//! platform = "total" 행은 플랫폼별 증가가 있을 때마다 함께 증가합니다.

use crate::error::AppError;
use crate::models::{ShareCounts, SharePlatform, TOTAL_PLATFORM};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// (slug, platform) 카운터를 1 증가시킵니다. 행이 없으면 1로 생성합니다.
async fn bump(
    tx: &mut Transaction<'_, Sqlite>,
    slug: &str,
    platform: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO share_counts (slug, platform, count) VALUES (?, ?, 1)
        ON CONFLICT (slug, platform) DO UPDATE SET count = count + 1
        "#,
    )
    .bind(slug)
    .bind(platform)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// 플랫폼 카운터와 total 카운터를 한 트랜잭션에서 함께 증가시키고
/// 갱신된 공유 수를 반환합니다.
pub async fn increment_share(
    pool: &SqlitePool,
    slug: &str,
    platform: SharePlatform,
) -> Result<ShareCounts, AppError> {
    let mut tx = pool.begin().await?;
    bump(&mut tx, slug, platform.as_str()).await?;
    bump(&mut tx, slug, TOTAL_PLATFORM).await?;
    tx.commit().await?;

    get_share_counts(pool, slug).await
}

/// 게시글의 공유 수를 조회합니다. 없는 플랫폼은 0입니다.
pub async fn get_share_counts(pool: &SqlitePool, slug: &str) -> Result<ShareCounts, AppError> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT platform, count FROM share_counts WHERE slug = ?")
            .bind(slug)
            .fetch_all(pool)
            .await?;

    let mut counts = ShareCounts::default();
    for (platform, count) in rows {
        match platform.as_str() {
            TOTAL_PLATFORM => counts.total = count,
            "copy" => counts.copy = count,
            "twitter" => counts.twitter = count,
            other => tracing::warn!("Unknown share platform row: {}", other),
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_missing_counts_are_zero() {
        let pool = test_pool().await;
        assert_eq!(
            get_share_counts(&pool, "post").await.unwrap(),
            ShareCounts::default()
        );
    }

    #[tokio::test]
    async fn test_total_is_sum_of_platform_increments() {
        let pool = test_pool().await;
        for _ in 0..3 {
            increment_share(&pool, "post", SharePlatform::Copy).await.unwrap();
        }
        for _ in 0..2 {
            increment_share(&pool, "post", SharePlatform::Twitter).await.unwrap();
        }
        increment_share(&pool, "other", SharePlatform::Twitter).await.unwrap();

        let counts = get_share_counts(&pool, "post").await.unwrap();
        assert_eq!(
            counts,
            ShareCounts {
                total: 5,
                copy: 3,
                twitter: 2
            }
        );
    }

    #[tokio::test]
    async fn test_increment_returns_updated_counts() {
        let pool = test_pool().await;
        let counts = increment_share(&pool, "post", SharePlatform::Twitter).await.unwrap();
        assert_eq!((counts.total, counts.copy, counts.twitter), (1, 0, 1));
    }
}
