//! # RSS 2.0 피드 생성
//!
//! 공개된 게시글 목록으로 RSS 문서를 만듭니다.
//! 제목/설명은 CDATA로 감싸고, URL처럼 태그 사이에 그대로 들어가는 값은 XML 이스케이프합니다.

use crate::config::SiteConfig;
use crate::models::PostSummary;
use crate::services::dates;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// CDATA 섹션으로 감쌉니다.
///
/// 본문에 `]]>`가 있으면 CDATA가 거기서 끝나버리므로,
/// `]]` + `>` 로 쪼개 두 개의 CDATA 섹션으로 나눕니다.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// XML 특수문자(& < > " ')를 엔티티로 바꿉니다.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// RSS 문서 전체를 문자열로 만듭니다.
///
/// `built_at`은 `lastBuildDate`에 들어갈 시각입니다 (핸들러에서는 현재 시각).
/// 게시일을 파싱할 수 없는 글은 `pubDate` 없이 출력합니다.
pub fn render_feed(site: &SiteConfig, posts: &[PostSummary], built_at: DateTime<Utc>) -> String {
    let site_url = escape_xml(&site.url);
    let mut xml = String::new();

    // String에 대한 write!는 실패하지 않으므로 결과를 무시합니다.
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        xml,
        r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#
    );
    let _ = writeln!(xml, "  <channel>");
    let _ = writeln!(xml, "    <title>{}</title>", escape_xml(&site.name));
    let _ = writeln!(xml, "    <link>{site_url}</link>");
    let _ = writeln!(
        xml,
        "    <description>{}</description>",
        escape_xml(&site.description)
    );
    let _ = writeln!(xml, "    <language>en-us</language>");
    let _ = writeln!(
        xml,
        "    <lastBuildDate>{}</lastBuildDate>",
        dates::to_rfc822(&built_at)
    );
    let _ = writeln!(
        xml,
        r#"    <atom:link href="{site_url}/rss.xml" rel="self" type="application/rss+xml"/>"#
    );

    for post in posts {
        let link = format!("{}/{}", site_url, escape_xml(&post.slug));
        let _ = writeln!(xml, "    <item>");
        let _ = writeln!(xml, "      <title>{}</title>", cdata(&post.title));
        let _ = writeln!(xml, "      <link>{link}</link>");
        let _ = writeln!(xml, r#"      <guid isPermaLink="true">{link}</guid>"#);
        let _ = writeln!(
            xml,
            "      <description>{}</description>",
            cdata(&post.description)
        );
        if let Some(published) = dates::parse_post_date(&post.date) {
            let _ = writeln!(
                xml,
                "      <pubDate>{}</pubDate>",
                dates::to_rfc822(&published)
            );
        }
        let _ = writeln!(xml, "    </item>");
    }

    let _ = writeln!(xml, "  </channel>");
    xml.push_str("</rss>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, date: &str) -> PostSummary {
        PostSummary {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            description: format!("About {slug}"),
            date: date.to_string(),
            published: true,
            tags: vec![],
            read_time: None,
            image: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_cdata_splits_terminator() {
        assert_eq!(cdata("plain"), "<![CDATA[plain]]>");
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&apos;");
    }

    #[test]
    fn test_feed_items() {
        let site = SiteConfig::default();
        let built_at = dates::parse_post_date("2025-03-01").unwrap();
        let posts = vec![
            post("hello", "Hello <World>", "2025-01-15"),
            post("undated", "No date", "soon"),
        ];
        let xml = render_feed(&site, &posts, built_at);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<language>en-us</language>"));
        assert!(xml.contains("<lastBuildDate>Sat, 01 Mar 2025 00:00:00 GMT</lastBuildDate>"));
        assert!(xml.contains(&format!(r#"<atom:link href="{}/rss.xml""#, site.url)));
        assert!(xml.contains("<title><![CDATA[Hello <World>]]></title>"));
        assert!(xml.contains(&format!("<link>{}/hello</link>", site.url)));
        assert!(xml.contains("<pubDate>Wed, 15 Jan 2025 00:00:00 GMT</pubDate>"));
        assert_eq!(xml.matches("<item>").count(), 2);
        assert_eq!(xml.matches("<pubDate>").count(), 1);
        assert!(xml.ends_with("</rss>"));
    }
}
