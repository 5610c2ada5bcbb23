//! # 동기화 토큰(Sync Token) 추출기
//!
//! `POST /api/v1/posts/sync`는 게시글 테이블 전체를 덮어쓰므로,
//! `SYNC_TOKEN`이 설정되어 있으면 `Authorization: Bearer <token>` 헤더를 요구합니다.
//! 설정되어 있지 않으면 (로컬 개발 등) 검사 없이 통과합니다.
//!
//! 핸들러의 매개변수에 `_token: SyncToken`을 넣기만 하면 검사가 적용됩니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::routes::AppState;

/// 토큰 검사를 통과했음을 나타내는 표시 타입
#[derive(Debug, Clone, Copy)]
pub struct SyncToken;

impl FromRequestParts<AppState> for SyncToken {
    type Rejection = SyncTokenError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.sync_token.as_deref() else {
            return Ok(SyncToken);
        };

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(SyncTokenError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(SyncTokenError::InvalidToken)?;

        // 원문 대신 고정 길이의 SHA-256 다이제스트끼리 비교합니다.
        if hash_token(token) != hash_token(expected) {
            tracing::warn!("Rejected post sync with an invalid token");
            return Err(SyncTokenError::InvalidToken);
        }

        Ok(SyncToken)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SyncTokenError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for SyncTokenError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            SyncTokenError::MissingToken => ("missing_token", "Sync token is required"),
            SyncTokenError::InvalidToken => ("invalid_token", "Invalid sync token"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// 토큰의 SHA-256 다이제스트 (16진수 문자열)
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
