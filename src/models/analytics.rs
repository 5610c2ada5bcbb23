//! # 방문 통계(Analytics) 모델 정의
//!
//! 클라이언트 트래커(`crate::client::tracker`)와 서버 핸들러가
//! 같은 요청 구조체를 공유합니다. 트래커는 Serialize로 보내고,
//! 서버는 Deserialize로 받습니다.

use serde::{Deserialize, Serialize};

/// 페이지 종류: 경로로부터 결정됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    Stats,
    Page,
}

impl PageType {
    /// `/` 또는 빈 경로 → Home, `/stats` → Stats, 그 외 → Page
    pub fn from_path(path: &str) -> Self {
        match path {
            "" | "/" => PageType::Home,
            "/stats" => PageType::Stats,
            _ => PageType::Page,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageType::Home => "home",
            PageType::Stats => "stats",
            PageType::Page => "page",
        }
    }
}

/// `POST /api/v1/analytics/page-view` 요청 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPageViewRequest {
    pub path: String,
    pub page_type: PageType,
    pub session_id: String,
}

/// `POST /api/v1/analytics/heartbeat` 요청 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    pub session_id: String,
    pub current_path: String,
}

/// 경로별 페이지뷰 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PageStat {
    pub path: String,
    pub views: i64,
}

/// `GET /api/v1/analytics/stats` 응답
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_page_views: i64,
    pub unique_visitors: i64,
    /// 최근 하트비트가 활성 구간 안에 있는 세션 수
    pub active_visitors: i64,
    pub top_pages: Vec<PageStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_type_from_path() {
        assert_eq!(PageType::from_path("/"), PageType::Home);
        assert_eq!(PageType::from_path(""), PageType::Home);
        assert_eq!(PageType::from_path("/stats"), PageType::Stats);
        assert_eq!(PageType::from_path("/stats/extra"), PageType::Page);
        assert_eq!(PageType::from_path("/hello-world"), PageType::Page);
    }

    #[test]
    fn test_page_view_wire_format() {
        let event = RecordPageViewRequest {
            path: "/".to_string(),
            page_type: PageType::Home,
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "path": "/", "pageType": "home", "sessionId": "abc" })
        );
    }
}
