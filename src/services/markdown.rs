//! # 마크다운 게시글 로더
//!
//! 디렉토리의 `.md` 파일들을 읽어 동기화 입력(`SyncPost`) 목록으로 변환합니다.
//!
//! 파일 형식:
//! ```text
//! ---
//! title: Hello World
//! description: 첫 글
//! date: 2025-01-15
//! tags: [rust, web]
//! published: true
//! ---
//!
//! 본문 마크다운...
//! ```
//!
//! 이 모듈의 함수들:
//! - `load_posts()`: 디렉토리 전체를 읽어 `Vec<SyncPost>` 반환
//! - `parse_post()`: 파일 하나의 내용을 `SyncPost`로 변환
//! - `split_front_matter()`: `---` 블록과 본문 분리
//! - `count_words()`: 텍스트의 단어 수 계산
//! - `estimate_read_time()`: 단어 수로 "N min read" 계산

use crate::error::AppError;
use crate::models::SyncPost;
use serde::Deserialize;
// Path: 파일 경로를 나타내는 불변 참조 타입 (&str과 비슷한 역할)
// PathBuf: 소유된 파일 경로 타입 (String과 비슷한 역할)
use std::path::{Path, PathBuf};
// tokio::fs: 비동기 파일 시스템 모듈
// 일반 std::fs는 동기(블로킹)이므로, 비동기 서버에서는 tokio::fs를 사용합니다.
use tokio::fs;

/// 분당 읽는 단어 수 (읽기 시간 계산 기준)
const WORDS_PER_MINUTE: usize = 200;

/// front matter YAML 블록의 필드들
///
/// `#[serde(rename_all = "camelCase")]`: YAML의 `readTime` 키를 `read_time` 필드로 받습니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
    title: String,
    #[serde(default)]
    description: String,
    date: String,
    #[serde(default = "default_published")]
    published: bool,
    #[serde(default)]
    tags: Vec<String>,
    read_time: Option<String>,
    image: Option<String>,
    slug: Option<String>,
}

fn default_published() -> bool {
    true
}

/// 디렉토리의 모든 `.md` 파일을 읽어 게시글 목록을 만듭니다.
///
/// 파일 이름순으로 정렬해 반환하므로 실행할 때마다 순서가 같습니다.
/// 하위 디렉토리는 읽지 않습니다.
///
/// # 에러
/// - `AppError::Io`: 디렉토리/파일을 읽을 수 없는 경우
/// - `AppError::BadRequest`: front matter가 없거나 잘못된 파일 (파일 이름 포함)
pub async fn load_posts(dir: &Path) -> Result<Vec<SyncPost>, AppError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    // next_entry(): 다음 항목이 없으면 Ok(None)
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        if is_markdown && entry.file_type().await?.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut posts = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = fs::read_to_string(&path).await?;
        // file_stem(): "hello-world.md" → "hello-world"
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let post = parse_post(&stem, &raw)
            .map_err(|e| AppError::bad_request(format!("{}: {}", path.display(), e)))?;
        posts.push(post);
    }

    tracing::debug!("Loaded {} markdown posts from {}", posts.len(), dir.display());
    Ok(posts)
}

/// 파일 하나의 내용을 동기화 입력으로 변환합니다.
///
/// # 매개변수
/// - `file_stem`: 확장자를 뺀 파일 이름. front matter에 slug가 없으면 이것을 slugify해서 씁니다.
/// - `raw`: 파일 전체 내용
///
/// 에러 메시지는 파일 이름 없이 반환하고, `load_posts()`가 앞에 파일 경로를 붙입니다.
pub fn parse_post(file_stem: &str, raw: &str) -> Result<SyncPost, String> {
    let (yaml, body) = split_front_matter(raw).ok_or("missing front matter")?;
    let meta: FrontMatter =
        serde_yaml::from_str(yaml).map_err(|e| format!("invalid front matter: {e}"))?;

    let slug = match meta.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        // slug::slugify(): "Hello World!" → "hello-world"
        _ => slug::slugify(file_stem),
    };
    if slug.is_empty() {
        return Err("cannot derive a slug".to_string());
    }

    let content = body.trim().to_string();
    let read_time = meta
        .read_time
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| estimate_read_time(&content));

    Ok(SyncPost {
        slug,
        title: meta.title,
        description: meta.description,
        content,
        date: meta.date,
        published: meta.published,
        tags: meta.tags,
        read_time: Some(read_time),
        image: meta.image,
    })
}

/// 파일 내용을 (front matter YAML, 본문)으로 나눕니다.
///
/// 첫 줄이 `---`이고, 그 뒤에 또 `---`만 있는 줄이 나와야 합니다.
/// 조건에 맞지 않으면 None.
pub fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    // UTF-8 BOM이 붙은 파일도 허용합니다.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let rest = raw
        .strip_prefix("---\r\n")
        .or_else(|| raw.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// 텍스트의 단어 수를 계산합니다.
///
/// 공백(스페이스, 탭, 줄바꿈)으로 분리하여 단어를 셉니다.
pub fn count_words(text: &str) -> usize {
    // .split_whitespace(): 공백으로 문자열을 분리하여 이터레이터를 반환
    text.split_whitespace().count()
}

/// 읽기 시간을 "N min read" 형식으로 계산합니다. (분당 200단어, 올림, 최소 1분)
pub fn estimate_read_time(text: &str) -> String {
    let minutes = count_words(text).div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
