//! # 댓글 / 하이라이트 모델 정의
//!
//! 댓글과 하이라이트는 모두 익명 브라우저 세션(`session_id`)이 소유합니다.
//! 저장된 session_id는 응답에 절대 포함하지 않고, 대신 요청자의 세션과
//! 비교한 결과만 `is_own`으로 알려줍니다.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// 작성자 이름 최대 길이 (문자 수)
pub const MAX_AUTHOR_CHARS: usize = 50;
/// 댓글/메모 본문 최대 길이 (문자 수)
pub const MAX_CONTENT_CHARS: usize = 2000;
/// 하이라이트 작성자가 비어 있을 때 쓰는 이름
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// 댓글 엔티티: `comments` 테이블 한 행에 대응합니다.
///
/// Serialize가 없는 이유: session_id가 포함되어 있으므로 그대로 응답하면 안 됩니다.
/// 응답에는 `CommentView`를 사용합니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub slug: String,
    pub author: String,
    pub content: String,
    pub session_id: String,
    pub timestamp: i64,
}

/// 댓글 응답: 목록 조회 시 한 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: i64,
    /// 요청자의 세션이 이 댓글의 소유자인지 여부
    pub is_own: bool,
}

impl Comment {
    /// 요청자 세션(없을 수도 있음)을 기준으로 응답용 형태로 변환합니다.
    pub fn into_view(self, viewer: Option<&str>) -> CommentView {
        let is_own = viewer == Some(self.session_id.as_str());
        CommentView {
            id: self.id,
            author: self.author,
            content: self.content,
            timestamp: self.timestamp,
            is_own,
        }
    }
}

/// `POST /api/v1/posts/:slug/comments` 요청 본문
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub author: String,
    pub content: String,
    pub session_id: String,
}

/// 검증을 통과한 댓글 입력 (trim 완료)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub content: String,
    pub session_id: String,
}

impl CreateCommentRequest {
    /// 입력을 trim하고 길이를 검증합니다.
    ///
    /// - 작성자/본문이 비어 있으면 "Author and content are required"
    /// - 작성자 50자 초과 → "Author name too long"
    /// - 본문 2000자 초과 → "Comment too long"
    pub fn validate(&self) -> Result<NewComment, AppError> {
        let author = self.author.trim();
        let content = self.content.trim();

        if author.is_empty() || content.is_empty() {
            return Err(AppError::bad_request("Author and content are required"));
        }
        // .chars().count(): 바이트가 아닌 문자 단위 길이 (한글 1자 = 1)
        if author.chars().count() > MAX_AUTHOR_CHARS {
            return Err(AppError::bad_request("Author name too long"));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(AppError::bad_request("Comment too long"));
        }
        require_session(&self.session_id)?;

        Ok(NewComment {
            author: author.to_string(),
            content: content.to_string(),
            session_id: self.session_id.clone(),
        })
    }
}

/// 하이라이트 엔티티: `highlights` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Highlight {
    pub id: String,
    pub slug: String,
    pub text: String,
    pub comment: String,
    pub author: String,
    pub start_offset: i64,
    pub end_offset: i64,
    pub session_id: String,
    pub timestamp: i64,
}

/// 하이라이트 응답: 목록 조회 시 한 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightView {
    pub id: String,
    pub text: String,
    pub comment: String,
    pub author: String,
    pub start_offset: i64,
    pub end_offset: i64,
    pub timestamp: i64,
    pub is_own: bool,
}

impl Highlight {
    pub fn into_view(self, viewer: Option<&str>) -> HighlightView {
        let is_own = viewer == Some(self.session_id.as_str());
        HighlightView {
            id: self.id,
            text: self.text,
            comment: self.comment,
            author: self.author,
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            timestamp: self.timestamp,
            is_own,
        }
    }
}

/// `POST /api/v1/posts/:slug/highlights` 요청 본문
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHighlightRequest {
    pub text: String,
    pub comment: String,
    /// 비어 있거나 생략되면 "Anonymous"
    #[serde(default)]
    pub author: String,
    pub start_offset: i64,
    pub end_offset: i64,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHighlight {
    pub text: String,
    pub comment: String,
    pub author: String,
    pub start_offset: i64,
    pub end_offset: i64,
    pub session_id: String,
}

impl CreateHighlightRequest {
    pub fn validate(&self) -> Result<NewHighlight, AppError> {
        let text = self.text.trim();
        let comment = self.comment.trim();
        let author = match self.author.trim() {
            "" => ANONYMOUS_AUTHOR,
            name => name,
        };

        if text.is_empty() || comment.is_empty() {
            return Err(AppError::bad_request("Text and comment are required"));
        }
        if author.chars().count() > MAX_AUTHOR_CHARS {
            return Err(AppError::bad_request("Author name too long"));
        }
        if comment.chars().count() > MAX_CONTENT_CHARS {
            return Err(AppError::bad_request("Comment too long"));
        }
        if self.start_offset < 0 || self.end_offset < self.start_offset {
            return Err(AppError::bad_request("Invalid highlight offsets"));
        }
        require_session(&self.session_id)?;

        Ok(NewHighlight {
            text: text.to_string(),
            comment: comment.to_string(),
            author: author.to_string(),
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            session_id: self.session_id.clone(),
        })
    }
}

/// 댓글/하이라이트 삭제 요청 본문: 소유자 확인용 세션 ID
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOwnedRequest {
    pub session_id: String,
}

/// 목록 조회 시 선택적으로 받는 세션 ID (`?sessionId=...`)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

/// 세션 ID가 비어 있으면 거부합니다.
pub fn require_session(session_id: &str) -> Result<(), AppError> {
    if session_id.trim().is_empty() {
        return Err(AppError::bad_request("sessionId is required"));
    }
    Ok(())
}
