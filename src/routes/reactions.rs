//! # 리액션 / 공유 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/posts/{slug}/reactions | `get_reactions` | 이모지별 수 (다섯 개 모두) |
//! | GET | /api/v1/posts/{slug}/reactions/mine?sessionId= | `get_my_reactions` | 내가 누른 이모지 |
//! | POST | /api/v1/posts/{slug}/reactions | `toggle_reaction` | 토글 → `{added}` |
//! | GET | /api/v1/posts/{slug}/shares | `get_shares` | 공유 수 |
//! | POST | /api/v1/posts/{slug}/shares | `increment_share` | 공유 수 증가 |

use crate::{db, error::AppError, models::*, routes::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

pub async fn get_reactions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<ReactionCount>>, AppError> {
    Ok(Json(db::reaction_counts(&state.pool, &slug).await?))
}

pub async fn get_my_reactions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<UserReactionsQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    require_session(&query.session_id)?;
    Ok(Json(
        db::user_reactions(&state.pool, &slug, &query.session_id).await?,
    ))
}

/// `POST /posts/{slug}/reactions`: `{ "emoji": "🔥", "sessionId": "..." }`
///
/// 같은 요청을 두 번 보내면 추가 → 제거 순으로 동작합니다.
pub async fn toggle_reaction(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<ToggleReactionRequest>,
) -> Result<Json<Value>, AppError> {
    // .parse::<Emoji>(): FromStr 구현으로 허용 목록을 검사합니다 ("Invalid emoji").
    let emoji: Emoji = req.emoji.parse()?;
    require_session(&req.session_id)?;

    let added = db::toggle_reaction(&state.pool, &slug, emoji, &req.session_id).await?;
    Ok(Json(json!({ "added": added })))
}

pub async fn get_shares(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ShareCounts>, AppError> {
    Ok(Json(db::get_share_counts(&state.pool, &slug).await?))
}

/// `POST /posts/{slug}/shares`: `{ "platform": "copy" | "twitter" }`
pub async fn increment_share(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<IncrementShareRequest>,
) -> Result<Json<ShareCounts>, AppError> {
    let platform: SharePlatform = req.platform.parse()?;
    Ok(Json(db::increment_share(&state.pool, &slug, platform).await?))
}
