//! # 요청 추출기 / 미들웨어
//!
//! - `sync_token`: 게시글 동기화 엔드포인트의 Bearer 토큰 검사

pub mod sync_token;

pub use sync_token::SyncToken;
