//! # 뉴스레터 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/newsletter/subscribe` → `{ "success": bool, "message": "..." }`
//! - `GET  /api/v1/newsletter/count`     → `{ "count": n }`
//!
//! 잘못된 이메일은 400, 이미 구독 중이면 200 + `success: false`입니다.

use crate::{db, error::AppError, models::*, routes::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, AppError> {
    let email = normalize_email(&req.email)?;

    let response = if db::insert_subscriber(&state.pool, &email).await? {
        tracing::info!("New newsletter subscriber");
        SubscribeResponse {
            success: true,
            message: "Successfully subscribed!".to_string(),
        }
    } else {
        SubscribeResponse {
            success: false,
            message: "Already subscribed".to_string(),
        }
    };
    Ok(Json(response))
}

pub async fn subscriber_count(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let count = db::count_confirmed_subscribers(&state.pool).await?;
    Ok(Json(json!({ "count": count })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::db::test_pool;

    fn email(value: &str) -> Json<SubscribeRequest> {
        Json(SubscribeRequest {
            email: value.to_string(),
        })
    }

    #[tokio::test]
    async fn test_second_subscribe_with_other_casing_is_duplicate() {
        let state = AppState {
            pool: test_pool().await,
            site: SiteConfig::default(),
            sync_token: None,
        };

        let Json(first) = subscribe(State(state.clone()), email("A@B.com")).await.unwrap();
        assert!(first.success);
        assert_eq!(first.message, "Successfully subscribed!");

        let Json(second) = subscribe(State(state.clone()), email("a@b.com ")).await.unwrap();
        assert_eq!(
            second,
            SubscribeResponse {
                success: false,
                message: "Already subscribed".to_string(),
            }
        );

        let invalid = subscribe(State(state.clone()), email("not-an-email")).await;
        assert!(matches!(invalid, Err(AppError::BadRequest(_))));

        let Json(count) = subscriber_count(State(state)).await.unwrap();
        assert_eq!(count, json!({ "count": 1 }));
    }
}
