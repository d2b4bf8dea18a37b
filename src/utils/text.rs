use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

/// 검색 결과 제목의 강조 태그(<b>) 제거 및 HTML 엔티티 변환
pub fn strip_markup(raw: &str) -> String {
    let stripped = tag_pattern().replace_all(raw, "");
    stripped
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// 최대 `max_chars` 글자로 자르기 (바이트 기준 아님)
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
