//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `analytics`: 페이지뷰/하트비트 이벤트와 통계
//! - `comment`: 댓글과 하이라이트 (세션 소유)
//! - `post`: 게시글, 목록용 요약, 동기화 요청/결과
//! - `reaction`: 허용된 이모지와 리액션 집계
//! - `share`: 공유 플랫폼과 공유 수
//! - `subscriber`: 뉴스레터 구독자
//!
//! 모든 API 요청/응답 구조체는 JSON 필드 이름을 camelCase로 사용합니다
//! (`sessionId`, `readTime`, `startOffset` 등).

pub mod analytics;
pub mod comment;
pub mod post;
pub mod reaction;
pub mod share;
pub mod subscriber;

// 이렇게 하면 사용하는 쪽에서 `models::Post`처럼 짧게 쓸 수 있습니다.
pub use analytics::*;
pub use comment::*;
pub use post::*;
pub use reaction::*;
pub use share::*;
pub use subscriber::*;
