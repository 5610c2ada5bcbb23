//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `POSTS_PATH`: 동기화할 마크다운 게시글 디렉토리
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리
//! - `SITE_URL`, `SITE_NAME`, `SITE_DESCRIPTION`: RSS 채널 정보
//! - `SYNC_TOKEN`: 설정하면 `POST /posts/sync`에 Bearer 토큰이 필요합니다

use std::env;

pub const DEFAULT_SITE_URL: &str = "https://markdown-site.fly.dev";
pub const DEFAULT_SITE_NAME: &str = "Markdown Site";
pub const DEFAULT_SITE_DESCRIPTION: &str = "A markdown-powered blog";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/blog.db")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 마크다운 게시글 디렉토리 (기본값: "content/posts")
    pub posts_path: String,
    /// 프론트엔드 빌드 결과물 디렉토리 (기본값: "frontend/dist")
    pub frontend_dist: String,
    /// RSS 피드에 쓰이는 사이트 정보
    pub site: SiteConfig,
    /// 동기화 엔드포인트 보호용 토큰. None이면 인증 없이 허용합니다.
    pub sync_token: Option<String>,
}

/// RSS 채널과 게시글 링크를 만들 때 쓰는 사이트 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// 사이트 루트 URL (끝의 `/`는 제거되어 저장됩니다)
    pub url: String,
    pub name: String,
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
            name: DEFAULT_SITE_NAME.to_string(),
            description: DEFAULT_SITE_DESCRIPTION.to_string(),
        }
    }
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 `VarError::NotPresent`를 반환합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다.
    ///
    /// `from_env()`는 이 함수에 `env::var`를 넘겨 호출합니다.
    /// 테스트에서는 HashMap 기반 조회 함수를 넘겨 프로세스 환경을 건드리지 않습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 빈 문자열은 "설정 안 함"과 같게 취급합니다.
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            // ok_or: Option → Result 변환. 없으면 즉시 에러를 반환합니다.
            database_url: get("DATABASE_URL").ok_or(env::VarError::NotPresent)?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            // 파싱 실패 시 기본값 3000 사용
            port: get("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
            posts_path: get("POSTS_PATH").unwrap_or_else(|| "content/posts".to_string()),
            frontend_dist: get("FRONTEND_DIST").unwrap_or_else(|| "frontend/dist".to_string()),
            site: SiteConfig {
                url: get("SITE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
                name: get("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
                description: get("SITE_DESCRIPTION")
                    .unwrap_or_else(|| DEFAULT_SITE_DESCRIPTION.to_string()),
            },
            sync_token: get("SYNC_TOKEN"),
        })
    }
}
