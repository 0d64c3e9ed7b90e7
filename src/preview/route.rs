//! Preview route parsing
//!
//! A preview route is `/users/{username}` or `/concepts/{slug}` with
//! exactly one path segment after the prefix. Anything else is not a
//! preview route and keeps its original semantics at the upstream app.

/// A request the rewriter knows how to preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewRoute {
    /// `/users/{username}` profile page
    User { username: String },
    /// `/concepts/{slug}` concept page
    Concept { slug: String },
}

/// Parse a request path, including any query string, into a preview route.
///
/// The segment may not be empty and may not contain `/` or `?`; a URL
/// carrying a query string is therefore not a preview route.
pub fn match_preview_route(path: &str) -> Option<PreviewRoute> {
    if let Some(username) = segment_after(path, "/users/") {
        return Some(PreviewRoute::User {
            username: username.to_string(),
        });
    }

    if let Some(slug) = segment_after(path, "/concepts/") {
        return Some(PreviewRoute::Concept {
            slug: slug.to_string(),
        });
    }

    None
}

fn segment_after<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains('/') || rest.contains('?') {
        return None;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_route() {
        assert_eq!(
            match_preview_route("/users/alice"),
            Some(PreviewRoute::User {
                username: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_concept_route() {
        assert_eq!(
            match_preview_route("/concepts/network-protocols"),
            Some(PreviewRoute::Concept {
                slug: "network-protocols".to_string()
            })
        );
    }

    #[test]
    fn test_unrelated_path_does_not_match() {
        assert_eq!(match_preview_route("/about"), None);
        assert_eq!(match_preview_route("/"), None);
        assert_eq!(match_preview_route("/user/alice"), None);
    }

    #[test]
    fn test_empty_segment_does_not_match() {
        assert_eq!(match_preview_route("/users/"), None);
        assert_eq!(match_preview_route("/concepts/"), None);
    }

    #[test]
    fn test_extra_segments_do_not_match() {
        assert_eq!(match_preview_route("/users/alice/posts"), None);
        assert_eq!(match_preview_route("/concepts/a/b"), None);
    }

    #[test]
    fn test_segment_with_query_char_does_not_match() {
        assert_eq!(match_preview_route("/users/alice?tab=posts"), None);
    }
}
