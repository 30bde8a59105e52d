//! Page URL → grouping key.

/// Strip the protocol-and-host prefix from a tracked page URL.
///
/// Returns `None` only when `raw` is `None`. Otherwise the result is the text
/// after the prefix matched by the pattern `^(?:\/\/|[^/]+)*\/`, taken with
/// ordinary leftmost-greedy backtracking semantics, or the whole input when
/// that pattern does not match:
///
/// * `https://example.com/blog/post` → `blog/post`
/// * `/home` → `home`
/// * `https://example.com/` → `` (empty key)
/// * `https://example.com` → `/example.com`
/// * `home` → `home`
///
/// Exactly one pass is made. Query strings, fragments and trailing slashes are
/// kept, so `blog/` and `blog` are different keys.
pub fn normalize_path(raw: Option<&str>) -> Option<&str> {
    raw.map(strip_origin)
}

/// Scanner equivalent of the pattern above.
///
/// Runs of non-slash bytes are always consumed whole, and a `//` pair is
/// consumed as a unit. The first single `/` ends the prefix. If the input ends
/// before a single `/` is found, backtracking settles on the first slash of the
/// last `//` pair; with no pair at all there is no match.
fn strip_origin(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let mut fallback = None;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'/' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'/') {
            fallback = Some(i + 1);
            i += 2;
            continue;
        }
        return &raw[i + 1..];
    }

    // '/' is ASCII, so every candidate offset is a char boundary.
    match fallback {
        Some(start) => &raw[start..],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_stays_none() {
        assert_eq!(normalize_path(None), None);
    }

    #[test]
    fn strips_scheme_and_host() {
        assert_eq!(normalize_path(Some("https://a.com/x/y")), Some("x/y"));
        assert_eq!(
            normalize_path(Some("https://example.com/blog/post")),
            Some("blog/post")
        );
        assert_eq!(normalize_path(Some("http://localhost:3000/")), Some(""));
    }

    #[test]
    fn relative_and_protocol_relative_urls() {
        assert_eq!(normalize_path(Some("/home")), Some("home"));
        assert_eq!(normalize_path(Some("//cdn.example.com/app.js")), Some("app.js"));
    }

    #[test]
    fn no_canonicalization() {
        assert_eq!(
            normalize_path(Some("https://a.com/blog/?utm=x#top")),
            Some("blog/?utm=x#top")
        );
        assert_ne!(
            normalize_path(Some("https://a.com/blog/")),
            normalize_path(Some("https://a.com/blog"))
        );
    }

    #[test]
    fn inputs_without_a_single_slash() {
        assert_eq!(normalize_path(Some("home")), Some("home"));
        assert_eq!(normalize_path(Some("")), Some(""));
        // Backtracks to the first slash of the scheme separator.
        assert_eq!(normalize_path(Some("https://a.com")), Some("/a.com"));
    }

    #[test]
    fn repeated_double_slashes_are_consumed() {
        assert_eq!(normalize_path(Some("https://a.com//x/y")), Some("y"));
        assert_eq!(normalize_path(Some("///x")), Some("x"));
    }

    #[test]
    fn keeps_multibyte_paths_intact() {
        assert_eq!(
            normalize_path(Some("https://ünï.example/café/menü")),
            Some("café/menü")
        );
    }
}
