//! # 게시글(Post) 모델 정의
//!
//! 게시글은 외부 마크다운 파일이 원본(source of truth)이며,
//! 동기화(sync)를 통해 `posts` 테이블로 복사됩니다.
//!
//! ## 구조체 역할
//! - `Post`: 본문(content)을 포함한 전체 게시글 (단건 조회 응답)
//! - `PostSummary`: 본문을 뺀 목록용 게시글 (목록/관련 글/RSS)
//! - `SyncPost`: 동기화 요청 한 건 (마크다운 로더의 출력이기도 함)
//! - `SyncResult`: 동기화 결과 집계

use serde::{Deserialize, Serialize};

/// 전체 게시글: `posts` 테이블 한 행에 대응합니다.
///
/// `#[sqlx(json)]`: TEXT 컬럼에 저장된 JSON 배열(`'["rust","web"]'`)을
/// `Vec<String>`으로 자동 변환합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub date: String,
    pub published: bool,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub read_time: Option<String>,
    pub image: Option<String>,
    /// 마지막 동기화 시각 (Unix epoch 밀리초)
    pub last_synced_at: i64,
    /// 최초 생성 시각 (Unix epoch 밀리초)
    pub created_at: i64,
}

/// 목록용 게시글: 본문(content)이 빠져 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub published: bool,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub created_at: i64,
}

impl PostSummary {
    /// 제목/설명/태그 중 하나라도 검색어를 포함하는지 확인합니다 (대소문자 무시).
    ///
    /// `needle`은 호출하는 쪽에서 이미 소문자로 변환해 넘깁니다.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// 동기화 요청 한 건: 외부 마크다운 파일 하나에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPost {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub date: String,
    /// 요청에 없으면 공개(true)로 처리
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub read_time: Option<String>,
    pub image: Option<String>,
}

fn default_published() -> bool {
    true
}

impl SyncPost {
    /// 태그를 집합처럼 정리합니다: 앞뒤 공백 제거, 빈 값 제거, 중복 제거(첫 등장 순서 유지).
    pub fn normalized_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }
}

/// `POST /api/v1/posts/sync` 요청 본문
#[derive(Debug, Deserialize)]
pub struct SyncPostsRequest {
    pub posts: Vec<SyncPost>,
}

/// 동기화 결과: 생성/수정/삭제된 게시글 수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
}

/// `GET /api/v1/posts?q=검색어`
#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub q: Option<String>,
}

/// `GET /api/v1/posts/:slug/related?limit=3`
#[derive(Debug, Default, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<i64>,
}
