//! URL helpers for the submission pipeline.

use std::collections::HashSet;

use url::Url;

/// Extracts URLs from free text.
///
/// The input is split on newlines, commas and semicolons; each segment is
/// trimmed and kept only when it starts with `http://` or `https://`
/// (case-sensitive). Duplicates are dropped, preserving first-seen order.
/// Empty input yields an empty list.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for segment in text.split(['\n', ',', ';']) {
        let candidate = segment.trim();
        if !candidate.starts_with("http://") && !candidate.starts_with("https://") {
            continue;
        }
        if seen.insert(candidate.to_string()) {
            urls.push(candidate.to_string());
        }
    }

    urls
}

/// Returns true when `candidate` is a structurally valid absolute URL with an
/// http or https scheme.
///
/// Stricter than the prefix filter in [`extract_urls`], which intentionally
/// admits malformed-but-prefixed segments into the pipeline.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    if !candidate.starts_with("http://") && !candidate.starts_with("https://") {
        return false;
    }
    Url::parse(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_urls_dedupes_preserving_first_seen_order() {
        let urls = extract_urls("https://a.com\nhttps://a.com,https://b.com");
        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_extract_urls_splits_on_all_separators_and_trims() {
        let urls = extract_urls("  https://a.com ;https://b.com,\n https://c.com\n");
        assert_eq!(urls, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn test_extract_urls_rejects_other_schemes() {
        assert!(extract_urls("ftp://x.com\nwww.y.com").is_empty());
    }

    #[test]
    fn test_extract_urls_prefix_match_is_case_sensitive() {
        assert!(extract_urls("HTTPS://a.com").is_empty());
    }

    #[test]
    fn test_extract_urls_empty_input() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("   \n  ").is_empty());
    }

    #[test]
    fn test_extract_urls_keeps_malformed_but_prefixed_segments() {
        // The extraction filter is prefix-only; structural validation is a
        // separate concern handled by is_valid_url.
        let urls = extract_urls("https://");
        assert_eq!(urls, vec!["https://"]);
    }

    #[test]
    fn test_is_valid_url_accepts_well_formed() {
        assert!(is_valid_url("https://example.com/path?q=1"));
        assert!(is_valid_url("http://example.com"));
    }

    #[test]
    fn test_is_valid_url_rejects_missing_scheme() {
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("www.example.com/path"));
    }

    #[test]
    fn test_is_valid_url_rejects_empty_and_malformed() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("http://exa mple.com"));
    }
}
