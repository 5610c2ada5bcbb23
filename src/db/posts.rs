//! # 게시글 데이터베이스 쿼리 모듈
//!
//! `posts` 테이블에 대한 조회와 동기화(sync) 쿼리 함수들이 정의되어 있습니다.
//!
//! ## 동기화 방식
//! 외부 마크다운 파일 목록 전체를 받아 테이블 전체와 맞춥니다 (full-replace):
//! ```text
//! 들어온 목록 L, 기존 행 E (slug 기준)
//! L ∩ E → UPDATE   (updated)
//! L − E → INSERT   (created)
//! E − L → DELETE   (deleted)
//! ```
//! 트랜잭션 없이 행 단위로 쓰므로, 중간에 실패하면 일부만 반영된 상태로 남습니다.

use crate::db::{new_id, now_millis};
use crate::error::AppError;
use crate::models::*;
use crate::services::dates;
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::collections::HashSet;

// 목록 조회에 쓰는 컬럼 (content 제외)
const SUMMARY_COLUMNS: &str =
    "id, slug, title, description, date, published, tags, read_time, image, created_at";

/// 공개된 게시글 목록을 게시일 내림차순으로 조회합니다 (본문 제외).
pub async fn list_published_posts(pool: &SqlitePool) -> Result<Vec<PostSummary>, AppError> {
    let sql = format!(
        "SELECT {SUMMARY_COLUMNS} FROM posts WHERE published = 1 ORDER BY date DESC"
    );
    let mut posts = sqlx::query_as::<_, PostSummary>(&sql)
        .fetch_all(pool)
        .await?;

    // date는 문자열이라 형식이 섞이면 SQL 정렬이 틀릴 수 있으므로 파싱해서 다시 정렬합니다.
    dates::sort_newest_first(&mut posts);
    Ok(posts)
}

/// 초안(published = false)을 포함한 모든 게시글을 조회합니다 (미리보기용).
pub async fn list_all_posts(pool: &SqlitePool) -> Result<Vec<PostSummary>, AppError> {
    let sql = format!("SELECT {SUMMARY_COLUMNS} FROM posts ORDER BY date DESC");
    let mut posts = sqlx::query_as::<_, PostSummary>(&sql)
        .fetch_all(pool)
        .await?;

    dates::sort_newest_first(&mut posts);
    Ok(posts)
}

/// slug로 게시글 하나를 조회합니다. 공개 여부와 관계없이 반환합니다.
///
/// 공개 여부 판단은 라우트 핸들러가 합니다:
/// - 일반 조회: `published == false`면 404
/// - 미리보기: 그대로 반환
pub async fn get_post_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Post>, AppError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, slug, title, description, content, date, published, tags,
               read_time, image, last_synced_at, created_at
        FROM posts
        WHERE slug = ?
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// 외부 게시글 목록 전체로 `posts` 테이블을 맞춥니다.
///
/// # 반환값
/// - `SyncResult { created, updated, deleted }`
///
/// # 에러
/// - slug가 비어 있거나 목록 안에서 중복되면 `BadRequest` (아무것도 쓰지 않음)
pub async fn sync_posts(pool: &SqlitePool, posts: &[SyncPost]) -> Result<SyncResult, AppError> {
    // ── 입력 검증 ──
    let mut incoming: HashSet<&str> = HashSet::with_capacity(posts.len());
    for post in posts {
        let slug = post.slug.as_str();
        if slug.trim().is_empty() {
            return Err(AppError::bad_request("Post slug cannot be empty"));
        }
        // HashSet::insert는 이미 있던 값이면 false를 반환합니다.
        if !incoming.insert(slug) {
            return Err(AppError::bad_request(format!("Duplicate post slug: {slug}")));
        }
    }

    let now = now_millis();
    let existing: HashSet<String> = sqlx::query_as::<_, (String,)>("SELECT slug FROM posts")
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(slug,)| slug)
        .collect();

    let mut result = SyncResult::default();

    // ── upsert ──
    for post in posts {
        let tags = Json(post.normalized_tags());

        if existing.contains(&post.slug) {
            sqlx::query(
                r#"
                UPDATE posts
                SET title = ?, description = ?, content = ?, date = ?, published = ?,
                    tags = ?, read_time = ?, image = ?, last_synced_at = ?
                WHERE slug = ?
                "#,
            )
            .bind(&post.title)
            .bind(&post.description)
            .bind(&post.content)
            .bind(&post.date)
            .bind(post.published)
            .bind(&tags)
            .bind(&post.read_time)
            .bind(&post.image)
            .bind(now)
            .bind(&post.slug)
            .execute(pool)
            .await?;
            result.updated += 1;
        } else {
            sqlx::query(
                r#"
                INSERT INTO posts (id, slug, title, description, content, date, published,
                                   tags, read_time, image, last_synced_at, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(new_id())
            .bind(&post.slug)
            .bind(&post.title)
            .bind(&post.description)
            .bind(&post.content)
            .bind(&post.date)
            .bind(post.published)
            .bind(&tags)
            .bind(&post.read_time)
            .bind(&post.image)
            .bind(now)
            .bind(now)
            .execute(pool)
            .await?;
            result.created += 1;
        }
    }

    // ── 목록에서 사라진 게시글 삭제 ──
    for slug in existing.iter().filter(|slug| !incoming.contains(slug.as_str())) {
        sqlx::query("DELETE FROM posts WHERE slug = ?")
            .bind(slug)
            .execute(pool)
            .await?;
        result.deleted += 1;
    }

    tracing::info!(
        created = result.created,
        updated = result.updated,
        deleted = result.deleted,
        "Synced posts"
    );
    Ok(result)
}
