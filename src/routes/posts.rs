//! # 게시글(Post) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/posts?q= | `list_posts` | 공개 글 목록 (최신순, 본문 제외) |
//! | GET | /api/v1/posts/{slug} | `get_post` | 공개 글 하나 (비공개면 404) |
//! | GET | /api/v1/posts/{slug}/related?limit= | `related_posts` | 태그가 겹치는 글 |
//! | GET | /api/v1/preview/posts | `list_preview_posts` | 초안 포함 전체 목록 |
//! | GET | /api/v1/preview/posts/{slug} | `get_preview_post` | 공개 여부와 관계없이 조회 |
//! | POST | /api/v1/posts/sync | `sync_posts` | 마크다운 목록과 테이블 맞추기 |
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 앱 전역 상태 (DB 풀, 사이트 설정 등)
//! - `Path(slug)`: URL 경로 파라미터 (`{slug}` 부분)
//! - `Query(query)`: 쿼리 문자열을 구조체로 파싱
//! - `Json(body)`: 요청 본문을 JSON으로 파싱

use crate::{
    config::SiteConfig,
    db,
    error::AppError,
    middleware::SyncToken,
    models::*,
    services::related,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// RSS 채널과 게시글 링크에 쓰는 사이트 정보
    pub site: SiteConfig,
    /// 설정되어 있으면 동기화 요청에 Bearer 토큰이 필요합니다.
    pub sync_token: Option<String>,
}

/// `GET /posts?q=검색어`: 공개된 게시글 목록
///
/// `q`가 있으면 제목/설명/태그에 대소문자 구분 없이 포함된 글만 남깁니다.
/// 공백뿐인 `q`는 필터 없음으로 취급합니다.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Vec<PostSummary>>, AppError> {
    let posts = db::list_published_posts(&state.pool).await?;

    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let posts = match needle {
        Some(needle) => posts.into_iter().filter(|p| p.matches(&needle)).collect(),
        None => posts,
    };
    Ok(Json(posts))
}

/// `GET /posts/{slug}`: 공개된 게시글 하나 (본문 포함)
///
/// 초안(published = false)은 존재하더라도 404로 숨깁니다.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = db::get_post_by_slug(&state.pool, &slug)
        .await?
        .filter(|post| post.published)
        .ok_or(AppError::NotFound)?;
    Ok(Json(post))
}

/// `GET /posts/{slug}/related?limit=3`: 관련 글 목록
///
/// 알 수 없는 slug나 태그 없는 글은 빈 목록을 돌려줍니다 (404 아님).
pub async fn related_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RelatedQuery>,
) -> Result<Json<Vec<PostSummary>>, AppError> {
    let limit = related::clamp_limit(query.limit);

    let Some(current) = db::get_post_by_slug(&state.pool, &slug).await? else {
        return Ok(Json(Vec::new()));
    };

    let candidates = db::list_published_posts(&state.pool).await?;
    Ok(Json(related::rank_related(
        &current.slug,
        &current.tags,
        candidates,
        limit,
    )))
}

/// `GET /preview/posts`: 초안 포함 전체 목록
pub async fn list_preview_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostSummary>>, AppError> {
    Ok(Json(db::list_all_posts(&state.pool).await?))
}

/// `GET /preview/posts/{slug}`
pub async fn get_preview_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = db::get_post_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(post))
}

/// `POST /posts/sync`: 게시글 전체 동기화
///
/// 요청 본문의 목록이 곧 최종 상태입니다. 목록에 없는 글은 삭제됩니다.
///
/// # Extractor
/// - `_token: SyncToken`: 토큰 검사를 통과해야 본문 파싱으로 넘어갑니다.
pub async fn sync_posts(
    State(state): State<AppState>,
    _token: SyncToken,
    Json(req): Json<SyncPostsRequest>,
) -> Result<Json<SyncResult>, AppError> {
    let result = db::sync_posts(&state.pool, &req.posts).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{sample_post, test_pool};

    async fn seeded_state() -> AppState {
        let pool = test_pool().await;
        let posts = vec![
            sample_post("rust-intro", "2025-01-10", true, &["rust", "beginner"]),
            sample_post("axum-web", "2025-01-20", true, &["rust", "web"]),
            sample_post("draft", "2025-01-25", false, &["rust", "web"]),
            sample_post("python", "2025-01-05", true, &["python"]),
        ];
        db::sync_posts(&pool, &posts).await.unwrap();
        AppState {
            pool,
            site: SiteConfig::default(),
            sync_token: None,
        }
    }

    fn slugs(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_posts_filters_by_query() {
        let state = seeded_state().await;

        let Json(all) = list_posts(State(state.clone()), Query(PostListQuery::default()))
            .await
            .unwrap();
        assert_eq!(slugs(&all), vec!["axum-web", "rust-intro", "python"]);

        let query = PostListQuery { q: Some("  WEB ".to_string()) };
        let Json(found) = list_posts(State(state), Query(query)).await.unwrap();
        assert_eq!(slugs(&found), vec!["axum-web"]);
    }

    #[tokio::test]
    async fn test_draft_is_hidden_but_previewable() {
        let state = seeded_state().await;

        let hidden = get_post(State(state.clone()), Path("draft".to_string())).await;
        assert!(matches!(hidden, Err(AppError::NotFound)));

        let Json(post) = get_preview_post(State(state.clone()), Path("draft".to_string()))
            .await
            .unwrap();
        assert!(!post.published);

        let Json(all) = list_preview_posts(State(state)).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_related_posts_exclude_self_drafts_and_strangers() {
        let state = seeded_state().await;
        let Json(related) = related_posts(
            State(state.clone()),
            Path("axum-web".to_string()),
            Query(RelatedQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(slugs(&related), vec!["rust-intro"]);

        let Json(unknown) = related_posts(
            State(state),
            Path("missing".to_string()),
            Query(RelatedQuery { limit: Some(5) }),
        )
        .await
        .unwrap();
        assert!(unknown.is_empty());
    }
}
