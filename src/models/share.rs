use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 합계 행에 쓰이는 platform 값. 클라이언트가 직접 증가시킬 수는 없습니다.
pub const TOTAL_PLATFORM: &str = "total";

/// 공유 플랫폼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Copy,
    Twitter,
}

impl SharePlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            SharePlatform::Copy => "copy",
            SharePlatform::Twitter => "twitter",
        }
    }
}

impl FromStr for SharePlatform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(SharePlatform::Copy),
            "twitter" => Ok(SharePlatform::Twitter),
            _ => Err(AppError::bad_request("Invalid share platform")),
        }
    }
}

/// 게시글의 공유 수: 없는 행은 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareCounts {
    pub total: i64,
    pub copy: i64,
    pub twitter: i64,
}

/// `POST /api/v1/posts/:slug/shares` 요청 본문
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IncrementShareRequest {
    pub platform: String,
}
