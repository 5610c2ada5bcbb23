//! # 게시일 파싱/정렬 유틸리티
//!
//! 게시글의 `date`는 마크다운 front matter에서 온 문자열이라 형식이 섞일 수 있습니다.
//! 다음 형식을 차례로 시도합니다:
//! - RFC 3339: `2025-01-15T09:30:00Z`, `2025-01-15T09:30:00+09:00`
//! - 날짜만: `2025-01-15` (UTC 자정으로 간주)
//! - 시간대 없는 날짜+시간: `2025-01-15T09:30:00`, `2025-01-15 09:30:00` (UTC로 간주)

use crate::models::PostSummary;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Reverse;

/// RSS `pubDate`/`lastBuildDate` 형식 (예: `Wed, 15 Jan 2025 00:00:00 GMT`)
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// 게시일 문자열을 UTC 시각으로 파싱합니다. 알 수 없는 형식이면 None.
pub fn parse_post_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// 최신 글이 앞에 오도록 정렬합니다.
///
/// 안정 정렬(stable sort)이므로 같은 날짜끼리는 기존 순서를 유지하고,
/// 파싱할 수 없는 날짜는 맨 뒤로 보냅니다.
pub fn sort_newest_first(posts: &mut [PostSummary]) {
    // Option의 순서: None < Some. Reverse로 뒤집으면 Some(최신) → ... → None 순서가 됩니다.
    posts.sort_by_key(|post| Reverse(parse_post_date(&post.date)));
}

/// RSS에서 쓰는 RFC 822 형식 문자열로 변환합니다.
pub fn to_rfc822(dt: &DateTime<Utc>) -> String {
    dt.format(RFC822_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str, date: &str) -> PostSummary {
        PostSummary {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            date: date.to_string(),
            published: true,
            tags: vec![],
            read_time: None,
            image: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_parse_formats() {
        let expected = "2025-01-15T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(parse_post_date("2025-01-15"), Some(expected));
        assert_eq!(parse_post_date("2025-01-15T00:00:00Z"), Some(expected));
        assert_eq!(parse_post_date("2025-01-15T09:00:00+09:00"), Some(expected));
        assert_eq!(parse_post_date("2025-01-15 00:00:00"), Some(expected));
        assert_eq!(parse_post_date("someday"), None);
    }

    #[test]
    fn test_rfc822() {
        let dt = parse_post_date("2025-01-15").unwrap();
        assert_eq!(to_rfc822(&dt), "Wed, 15 Jan 2025 00:00:00 GMT");
    }

    #[test]
    fn test_sort_mixed_formats() {
        let mut posts = vec![
            summary("old", "2024-12-31"),
            summary("broken", "not a date"),
            summary("new", "2025-02-01T10:00:00Z"),
            summary("mid-a", "2025-01-10"),
            summary("mid-b", "2025-01-10"),
        ];
        sort_newest_first(&mut posts);

        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid-a", "mid-b", "old", "broken"]);
    }
}
