//! # 브라우저 측 구성요소
//!
//! 서버가 아닌 읽는 사람 쪽에서 돌아가는 상태 관리 코드입니다.
//! - `storage`: localStorage 역할을 하는 키-값 저장소 (메모리/파일)
//! - `session`: 익명 세션 ID 발급/보관
//! - `theme`: 테마 선택 저장
//! - `tracker`: 페이지뷰 + 하트비트 트래커
//! - `http`: 트래커 이벤트를 서버 API로 보내는 `HttpAnalytics`

pub mod http;
pub mod session;
pub mod storage;
pub mod theme;
pub mod tracker;

pub use http::HttpAnalytics;
pub use session::SessionIdStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, UnavailableStorage};
pub use theme::{Theme, ThemeStore};
pub use tracker::{AnalyticsSink, HeartbeatState, PageTracker};

use thiserror::Error;

/// 분석 이벤트 전송 실패
///
/// 트래커는 이 에러를 debug 로그로만 남기고 버립니다.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 연결 실패, 타임아웃 등 요청 자체가 실패한 경우
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 서버가 2xx가 아닌 상태 코드로 응답한 경우
    #[error("Server responded with status {0}")]
    Status(u16),
}
