//! # 댓글 / 하이라이트 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/posts/{slug}/comments?sessionId= | `list_comments` | 댓글 목록 |
//! | POST | /api/v1/posts/{slug}/comments | `create_comment` | 댓글 작성 → `{id}` |
//! | DELETE | /api/v1/comments/{id} | `delete_comment` | 본인 댓글 삭제 → `{deleted}` |
//! | GET | /api/v1/posts/{slug}/highlights?sessionId= | `list_highlights` | 하이라이트 목록 |
//! | POST | /api/v1/posts/{slug}/highlights | `create_highlight` | 하이라이트 작성 → `{id}` |
//! | DELETE | /api/v1/highlights/{id} | `delete_highlight` | 본인 하이라이트 삭제 → `{deleted}` |
//!
//! ## 삭제 규칙
//! ```text
//! 대상 없음            → 200 { "deleted": false } (sessionId가 비어 있어도)
//! 다른 세션의 대상     → 403 Forbidden (대상은 그대로)
//! 본인 세션의 대상     → 200 { "deleted": true }
//! ```

use crate::{db, error::AppError, models::*, routes::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

/// `GET /posts/{slug}/comments`: 댓글 목록 (작성 순)
///
/// `?sessionId=`를 넘기면 각 댓글에 `isOwn`이 표시됩니다.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<CommentView>>, AppError> {
    let viewer = query.session_id.as_deref();
    let comments = db::list_comments(&state.pool, &slug)
        .await?
        .into_iter()
        .map(|comment| comment.into_view(viewer))
        .collect();
    Ok(Json(comments))
}

/// `POST /posts/{slug}/comments`: 댓글 작성
pub async fn create_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<Value>, AppError> {
    let new = req.validate()?;
    let id = db::create_comment(&state.pool, &slug, &new).await?;
    tracing::debug!("Comment {} added to {}", id, slug);
    Ok(Json(json!({ "id": id })))
}

/// `DELETE /comments/{id}`: 본인 댓글 삭제
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DeleteOwnedRequest>,
) -> Result<Json<Value>, AppError> {
    let Some(comment) = db::get_comment(&state.pool, &id).await? else {
        return Ok(Json(json!({ "deleted": false })));
    };
    if comment.session_id != req.session_id {
        return Err(AppError::Forbidden("Cannot delete other's comments".to_string()));
    }

    let deleted = db::delete_comment(&state.pool, &id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}

/// `GET /posts/{slug}/highlights`: 하이라이트 목록 (작성 순)
pub async fn list_highlights(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<HighlightView>>, AppError> {
    let viewer = query.session_id.as_deref();
    let highlights = db::list_highlights(&state.pool, &slug)
        .await?
        .into_iter()
        .map(|highlight| highlight.into_view(viewer))
        .collect();
    Ok(Json(highlights))
}

/// `POST /posts/{slug}/highlights`: 하이라이트 작성
pub async fn create_highlight(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<CreateHighlightRequest>,
) -> Result<Json<Value>, AppError> {
    let new = req.validate()?;
    let id = db::create_highlight(&state.pool, &slug, &new).await?;
    Ok(Json(json!({ "id": id })))
}

/// `DELETE /highlights/{id}`: 본인 하이라이트 삭제
pub async fn delete_highlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DeleteOwnedRequest>,
) -> Result<Json<Value>, AppError> {
    let Some(highlight) = db::get_highlight(&state.pool, &id).await? else {
        return Ok(Json(json!({ "deleted": false })));
    };
    if highlight.session_id != req.session_id {
        return Err(AppError::Forbidden(
            "Cannot delete other's highlights".to_string(),
        ));
    }

    let deleted = db::delete_highlight(&state.pool, &id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::db::test_pool;

    async fn state() -> AppState {
        AppState {
            pool: test_pool().await,
            site: SiteConfig::default(),
            sync_token: None,
        }
    }

    async fn add_comment(state: &AppState, session: &str) -> String {
        let req = CreateCommentRequest {
            author: "Ana".to_string(),
            content: "Nice post".to_string(),
            session_id: session.to_string(),
        };
        let Json(body) = create_comment(State(state.clone()), Path("post".to_string()), Json(req))
            .await
            .unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    fn owner(session: &str) -> Json<DeleteOwnedRequest> {
        Json(DeleteOwnedRequest {
            session_id: session.to_string(),
        })
    }

    #[tokio::test]
    async fn test_cross_session_delete_is_forbidden() {
        let state = state().await;
        let id = add_comment(&state, "alice").await;

        let result = delete_comment(State(state.clone()), Path(id.clone()), owner("bob")).await;
        match result {
            Err(AppError::Forbidden(message)) => {
                assert_eq!(message, "Cannot delete other's comments")
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
        assert!(db::get_comment(&state.pool, &id).await.unwrap().is_some());

        let Json(body) = delete_comment(State(state.clone()), Path(id.clone()), owner("alice"))
            .await
            .unwrap();
        assert_eq!(body, json!({ "deleted": true }));
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_an_error() {
        let state = state().await;
        let Json(body) = delete_comment(State(state), Path("missing".to_string()), owner("alice"))
            .await
            .unwrap();
        assert_eq!(body, json!({ "deleted": false }));
    }

    #[tokio::test]
    async fn test_delete_missing_with_blank_session() {
        let state = state().await;
        let Json(body) = delete_comment(State(state.clone()), Path("missing".to_string()), owner(""))
            .await
            .unwrap();
        assert_eq!(body, json!({ "deleted": false }));

        let Json(body) = delete_highlight(State(state), Path("missing".to_string()), owner(""))
            .await
            .unwrap();
        assert_eq!(body, json!({ "deleted": false }));
    }

    #[tokio::test]
    async fn test_blank_session_cannot_delete_existing_comment() {
        let state = state().await;
        let id = add_comment(&state, "alice").await;

        let result = delete_comment(State(state.clone()), Path(id.clone()), owner("")).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(db::get_comment(&state.pool, &id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_marks_own_comments() {
        let state = state().await;
        add_comment(&state, "alice").await;
        add_comment(&state, "bob").await;

        let query = SessionQuery {
            session_id: Some("alice".to_string()),
        };
        let Json(views) = list_comments(State(state), Path("post".to_string()), Query(query))
            .await
            .unwrap();
        let own: Vec<bool> = views.iter().map(|v| v.is_own).collect();
        assert_eq!(own, vec![true, false]);
    }

    #[tokio::test]
    async fn test_highlight_delete_rules() {
        let state = state().await;
        let req = CreateHighlightRequest {
            text: "quoted".to_string(),
            comment: "note".to_string(),
            author: String::new(),
            start_offset: 0,
            end_offset: 6,
            session_id: "alice".to_string(),
        };
        let Json(body) =
            create_highlight(State(state.clone()), Path("post".to_string()), Json(req))
                .await
                .unwrap();
        let id = body["id"].as_str().unwrap().to_string();

        let forbidden = delete_highlight(State(state.clone()), Path(id.clone()), owner("bob")).await;
        assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

        let Json(views) = list_highlights(
            State(state.clone()),
            Path("post".to_string()),
            Query(SessionQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(views[0].author, "Anonymous");
        assert!(!views[0].is_own);

        let Json(body) = delete_highlight(State(state), Path(id), owner("alice")).await.unwrap();
        assert_eq!(body, json!({ "deleted": true }));
    }
}
