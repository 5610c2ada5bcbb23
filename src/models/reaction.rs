//! # 리액션 모델 정의
//!
//! 리액션은 고정된 다섯 가지 이모지 중 하나만 허용합니다.
//! 같은 (세션, 게시글, 이모지) 조합은 최대 한 행만 존재하며,
//! 토글(toggle) 방식으로 추가/제거됩니다.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 허용된 리액션 이모지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emoji {
    ThumbsUp,
    Fire,
    Bulb,
    Heart,
    Party,
}

impl Emoji {
    /// 응답에 표시되는 순서 그대로의 전체 목록
    pub const ALL: [Emoji; 5] = [
        Emoji::ThumbsUp,
        Emoji::Fire,
        Emoji::Bulb,
        Emoji::Heart,
        Emoji::Party,
    ];

    /// DB와 JSON에 저장되는 문자열 표현
    pub fn as_str(self) -> &'static str {
        match self {
            Emoji::ThumbsUp => "👍",
            Emoji::Fire => "🔥",
            Emoji::Bulb => "💡",
            // U+2764 + U+FE0F (variation selector)
            Emoji::Heart => "❤️",
            Emoji::Party => "🎉",
        }
    }
}

impl FromStr for Emoji {
    type Err = AppError;

    /// 허용 목록에 없는 이모지는 "Invalid emoji"로 거부합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emoji::ALL
            .into_iter()
            .find(|emoji| emoji.as_str() == s)
            .ok_or_else(|| AppError::bad_request("Invalid emoji"))
    }
}

/// 이모지별 리액션 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub emoji: String,
    pub count: i64,
}

/// `POST /api/v1/posts/:slug/reactions` 요청 본문
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionRequest {
    pub emoji: String,
    pub session_id: String,
}

/// `GET /api/v1/posts/:slug/reactions/mine?sessionId=...`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReactionsQuery {
    pub session_id: String,
}
