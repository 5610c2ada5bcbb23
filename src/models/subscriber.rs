//! # 뉴스레터 구독 모델 정의

use crate::error::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// `POST /api/v1/newsletter/subscribe` 요청 본문
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// 구독 결과: 이미 구독 중이면 success가 false입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

/// 이메일 형식 검사용 정규식: `아무것@아무것.아무것` (공백, @ 제외)
///
/// OnceLock: 최초 호출 시 한 번만 컴파일하고 이후에는 재사용합니다.
fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// 이메일을 정규화하고 형식을 검증합니다.
///
/// 먼저 앞뒤 공백을 제거한 뒤 검사하므로 `"a@b.com "`도 유효합니다.
/// 결과는 소문자로 변환되어 `"A@B.com"`과 `"a@b.com "`은 같은 키가 됩니다.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim();
    if !email_regex().is_match(email) {
        return Err(AppError::bad_request("Invalid email address"));
    }
    Ok(email.to_lowercase())
}
