//! # 비즈니스 로직 서비스
//!
//! DB에 직접 의존하지 않는 순수 로직을 모아둔 모듈입니다.
//! - `dates`: 게시일 파싱, 최신순 정렬, RSS 날짜 형식
//! - `markdown`: 마크다운 디렉토리 → 동기화 입력 변환
//! - `related`: 태그 교집합 기반 관련 글 순위
//! - `rss`: RSS 2.0 문서 생성

pub mod dates;
pub mod markdown;
pub mod related;
pub mod rss;
