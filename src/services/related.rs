//! # 관련 글 추천
//!
//! 현재 글과 태그가 겹치는 개수(교집합 크기)를 점수로 삼아 정렬합니다.
//!
//! ```text
//! 현재 글 tags = {rust, web}
//! A tags = {rust, web, axum}  → 점수 2
//! B tags = {rust}             → 점수 1
//! C tags = {python}           → 점수 0 (제외)
//! ```

use crate::models::PostSummary;
use std::collections::HashSet;

/// 기본 추천 개수
pub const DEFAULT_RELATED_LIMIT: usize = 3;
/// 한 번에 요청할 수 있는 최대 추천 개수
pub const MAX_RELATED_LIMIT: usize = 20;

/// `?limit=` 값을 1..=20 범위로 맞춥니다. 없으면 3.
pub fn clamp_limit(limit: Option<i64>) -> usize {
    match limit {
        None => DEFAULT_RELATED_LIMIT,
        Some(n) => n.clamp(1, MAX_RELATED_LIMIT as i64) as usize,
    }
}

/// 관련 글 목록을 계산합니다.
///
/// # 매개변수
/// - `current_slug`: 기준 글 (결과에서 항상 제외)
/// - `current_tags`: 기준 글의 태그. 비어 있으면 결과도 비어 있습니다.
/// - `candidates`: 후보 글 목록 (게시일 내림차순). 비공개 글은 제외됩니다.
/// - `limit`: 최대 반환 개수
///
/// 같은 점수끼리는 후보 목록의 순서(최신 글 먼저)를 유지합니다.
pub fn rank_related(
    current_slug: &str,
    current_tags: &[String],
    candidates: Vec<PostSummary>,
    limit: usize,
) -> Vec<PostSummary> {
    let wanted: HashSet<&str> = current_tags.iter().map(String::as_str).collect();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, PostSummary)> = candidates
        .into_iter()
        .filter(|post| post.published && post.slug != current_slug)
        .filter_map(|post| {
            // 후보 쪽 태그도 집합으로 만들어 중복 태그가 점수를 부풀리지 않게 합니다.
            let tags: HashSet<&str> = post.tags.iter().map(String::as_str).collect();
            let score = tags.intersection(&wanted).count();
            (score > 0).then_some((score, post))
        })
        .collect();

    // sort_by는 안정 정렬입니다.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, post)| post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, published: bool, tags: &[&str]) -> PostSummary {
        PostSummary {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            date: "2025-01-01".to_string(),
            published,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            read_time: None,
            image: None,
            created_at: 0,
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| t.to_string()).collect()
    }

    fn slugs(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_ranks_by_overlap_and_excludes() {
        let candidates = vec![
            post("current", true, &["rust", "web"]),
            post("one", true, &["rust"]),
            post("draft", false, &["rust", "web"]),
            post("none", true, &["python"]),
            post("two", true, &["web", "rust", "axum"]),
        ];
        let related = rank_related("current", &tags(&["rust", "web"]), candidates, 10);
        assert_eq!(slugs(&related), vec!["two", "one"]);
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let candidates = vec![
            post("newer", true, &["rust"]),
            post("older", true, &["rust"]),
            post("oldest", true, &["rust"]),
        ];
        let related = rank_related("x", &tags(&["rust"]), candidates, 2);
        assert_eq!(slugs(&related), vec!["newer", "older"]);
    }

    #[test]
    fn test_no_tags_means_no_related() {
        let candidates = vec![post("a", true, &["rust"])];
        assert!(rank_related("x", &[], candidates, 3).is_empty());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 3);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(7)), 7);
        assert_eq!(clamp_limit(Some(500)), 20);
    }
}
