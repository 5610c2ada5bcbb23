//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `analytics`: 페이지뷰/하트비트 기록, 사이트 통계
//! - `comments`: 댓글과 하이라이트 (세션 소유권 검사 포함)
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `newsletter`: 뉴스레터 구독
//! - `posts`: 게시글 조회, 관련 글, 미리보기, 동기화 (+ `AppState`)
//! - `reactions`: 리액션 토글과 공유 수
//! - `rss`: RSS 피드
//! - `views`: 조회수

pub mod analytics;
pub mod comments;
pub mod health;
pub mod newsletter;
pub mod posts;
pub mod reactions;
pub mod rss;
pub mod views;

// 각 모듈의 핸들러 함수들을 재공개하여
// lib.rs에서 `routes::list_posts`처럼 바로 접근 가능하게 합니다.
pub use analytics::*;
pub use comments::*;
pub use health::*;
pub use newsletter::*;
pub use posts::*;
pub use reactions::*;
pub use rss::*;
pub use views::*;
