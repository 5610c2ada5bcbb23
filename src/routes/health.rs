//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 헬스체크가 호출합니다.
//! DB에 `SELECT 1`을 보내 연결 풀까지 살아 있는지 확인합니다.

use crate::{error::AppError, routes::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health`: DB 연결이 실패하면 500을 반환합니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_health_reports_ok() {
        let state = AppState {
            pool: test_pool().await,
            site: SiteConfig::default(),
            sync_token: None,
        };
        let Json(body) = health_check(State(state)).await.unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
