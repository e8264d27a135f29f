use once_cell::sync::Lazy;
use regex::Regex;

/// Longest fragment, in characters, that [`sanitize_fragment`] produces.
pub const MAX_FRAGMENT_LEN: usize = 50;
pub const FALLBACK_FRAGMENT: &str = "Unknown";

static FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_]+").unwrap());

/// Turns a vendor or bank label into a filesystem-safe filename fragment.
///
/// Characters that are invalid in filenames are dropped, whitespace and
/// underscore runs become a single hyphen and the result is capped at
/// [`MAX_FRAGMENT_LEN`] characters, cutting at the last hyphen when one is
/// available. Never returns an empty string.
pub fn sanitize_fragment(label: &str) -> String {
    let stripped = FORBIDDEN.replace_all(label.trim(), "");
    let joined = SEPARATORS.replace_all(&stripped, "-");
    let trimmed = trim_edges(&joined);

    let bounded = if trimmed.chars().count() > MAX_FRAGMENT_LEN {
        truncate_at_boundary(trimmed)
    } else {
        trimmed.to_string()
    };

    let cleaned = trim_edges(&bounded);
    if cleaned.is_empty() {
        FALLBACK_FRAGMENT.to_string()
    } else {
        cleaned.to_string()
    }
}

fn trim_edges(value: &str) -> &str {
    value.trim_matches(|c: char| matches!(c, '.' | ' '))
}

fn truncate_at_boundary(value: &str) -> String {
    let head: String = value.chars().take(MAX_FRAGMENT_LEN).collect();
    match head.rfind('-') {
        Some(idx) if idx > 0 => head[..idx].to_string(),
        _ => head,
    }
}
