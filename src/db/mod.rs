//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `analytics`: 페이지뷰/활성 세션 기록과 통계 쿼리
//! - `comments`: 댓글 CRUD
//! - `highlights`: 하이라이트 CRUD
//! - `newsletter`: 구독자 삽입/집계
//! - `posts`: 게시글 조회와 동기화(upsert/delete)
//! - `reactions`: 리액션 토글과 집계
//! - `shares`: 공유 수 증가/조회
//! - `views`: 조회수 증가/조회

pub mod analytics;
pub mod comments;
pub mod highlights;
pub mod newsletter;
pub mod posts;
pub mod reactions;
pub mod shares;
pub mod views;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::list_published_posts`처럼 바로 접근할 수 있게 합니다.
pub use analytics::*;
pub use comments::*;
pub use highlights::*;
pub use newsletter::*;
pub use posts::*;
pub use reactions::*;
pub use shares::*;
pub use views::*;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// 컴파일 타임에 `./migrations` 폴더의 SQL 파일들을 포함시킨 마이그레이터
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite 연결 풀을 생성합니다.
///
/// 데이터베이스 파일이 없으면 새로 만듭니다 (`create_if_missing`).
/// 최대 5개의 동시 연결을 유지합니다.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// 현재 시각을 Unix epoch 밀리초로 반환합니다.
/// 모든 timestamp 컬럼은 이 단위를 사용합니다.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 새 행 ID (UUIDv7: 시간순 정렬 가능)
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// 테스트용 인메모리 DB 풀: 마이그레이션이 적용된 상태로 반환합니다.
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 1개로 제한하고,
/// 유휴 연결이 닫혀 데이터가 사라지지 않도록 timeout을 끕니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    MIGRATOR.run(&pool).await.expect("run migrations");
    pool
}

/// 테스트용 동기화 입력 한 건
#[cfg(test)]
pub fn sample_post(
    slug: &str,
    date: &str,
    published: bool,
    tags: &[&str],
) -> crate::models::SyncPost {
    crate::models::SyncPost {
        slug: slug.to_string(),
        title: format!("Title {slug}"),
        description: format!("About {slug}"),
        content: format!("# {slug}\n\nBody"),
        date: date.to_string(),
        published,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        read_time: Some("1 min read".to_string()),
        image: None,
    }
}
