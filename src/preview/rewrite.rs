//! Meta-tag substitution
//!
//! Applies an ordered list of rules to the HTML shell as a fold over
//! immutable text. Each rule rewrites the `content` attribute of the
//! `<meta>` tags carrying its attribute/value pair and leaves the rest of
//! the document untouched. Attributes may appear in either order and may
//! use single or double quotes.

use std::ops::Range;

use super::meta::PageMeta;

/// One substitution rule: set the `content` of `<meta {attr}="{value}">`
#[derive(Debug, Clone)]
pub struct MetaRule {
    attr: &'static str,
    value: &'static str,
    content: String,
}

impl MetaRule {
    /// Rule targeting a `name="..."` meta tag
    pub fn name(value: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: "name",
            value,
            content: content.into(),
        }
    }

    /// Rule targeting a `property="..."` meta tag
    pub fn property(value: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: "property",
            value,
            content: content.into(),
        }
    }
}

/// The full set of tags rewritten for every preview, in application order
pub fn preview_rules(meta: &PageMeta) -> Vec<MetaRule> {
    vec![
        MetaRule::name("description", meta.description.as_str()),
        MetaRule::property("og:title", meta.title.as_str()),
        MetaRule::property("og:description", meta.description.as_str()),
        MetaRule::property("og:image", meta.image_url.as_str()),
        MetaRule::name("twitter:title", meta.title.as_str()),
        MetaRule::name("twitter:description", meta.description.as_str()),
        MetaRule::name("twitter:image", meta.image_url.as_str()),
    ]
}

/// Apply every rule in order.
///
/// Each step is a pure function from text to text; later rules operate on
/// the output of earlier ones. Rules target disjoint tags, so applying the
/// same rule twice yields the same document.
pub fn apply_rules(html: &str, rules: &[MetaRule]) -> String {
    rules.iter().fold(html.to_string(), |acc, rule| {
        replace_meta_content(&acc, rule.attr, rule.value, &rule.content)
    })
}

/// Rewrite the `content` attribute of every `<meta>` tag whose `attr`
/// attribute equals `value`. Tags without a `content` attribute and all
/// non-matching text are passed through unchanged.
fn replace_meta_content(html: &str, attr: &str, value: &str, content: &str) -> String {
    let mut out = String::with_capacity(html.len() + content.len());
    let mut rest = html;

    while let Some(start) = find_meta_start(rest) {
        let Some(end_offset) = rest[start..].find('>') else {
            break;
        };
        let end = start + end_offset + 1;

        out.push_str(&rest[..start]);
        let tag = &rest[start..end];
        if has_attr(tag, attr, value) {
            out.push_str(&set_content(tag, content));
        } else {
            out.push_str(tag);
        }
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

/// Position of the next `<meta` tag open, skipping lookalikes such as
/// `<metadata>`
fn find_meta_start(s: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = s[from..].find("<meta") {
        let idx = from + pos;
        match s[idx + 5..].chars().next() {
            Some(c) if c.is_ascii_whitespace() => return Some(idx),
            _ => from = idx + 5,
        }
    }
    None
}

fn has_attr(tag: &str, attr: &str, value: &str) -> bool {
    scan_attrs(tag)
        .into_iter()
        .any(|(name, val)| &tag[name] == attr && &tag[val] == value)
}

/// Replace the quoted value of the tag's `content` attribute, escaping the
/// replacement for attribute context
fn set_content(tag: &str, content: &str) -> String {
    for (name, value) in scan_attrs(tag) {
        if &tag[name] == "content" {
            return format!(
                "{}{}{}",
                &tag[..value.start],
                escape_attribute(content),
                &tag[value.end..]
            );
        }
    }
    tag.to_string()
}

/// Scan the `name="value"` attributes of one tag, yielding byte ranges for
/// each attribute name and value. Quoted values may contain anything except
/// their own quote character; bare attributes (no `=`) are skipped.
fn scan_attrs(tag: &str) -> Vec<(Range<usize>, Range<usize>)> {
    let bytes = tag.as_bytes();
    let mut attrs = Vec::new();
    let mut i = "<meta".len();

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' || bytes[i] == b'/' {
            break;
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'>'
        {
            i += 1;
        }
        let name = name_start..i;

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let quote = bytes[i];
        if quote == b'"' || quote == b'\'' {
            i += 1;
            let value_start = i;
            while i < bytes.len() && bytes[i] != quote {
                i += 1;
            }
            attrs.push((name, value_start..i));
            i += 1;
        } else {
            let value_start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            attrs.push((name, value_start..i));
        }
    }

    attrs
}

/// Escape text for use inside an HTML attribute value
pub fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_matching_tag() {
        let html = r#"<meta property="og:title" content="">"#;
        let out = replace_meta_content(html, "property", "og:title", "Hello");
        assert_eq!(out, r#"<meta property="og:title" content="Hello">"#);
    }

    #[test]
    fn test_replaces_existing_content() {
        let html = r#"<meta name="description" content="old text">"#;
        let out = replace_meta_content(html, "name", "description", "new text");
        assert_eq!(out, r#"<meta name="description" content="new text">"#);
    }

    #[test]
    fn test_attributes_in_either_order() {
        let html = r#"<meta content="" property="og:image">"#;
        let out = replace_meta_content(html, "property", "og:image", "https://x/y.png");
        assert_eq!(out, r#"<meta content="https://x/y.png" property="og:image">"#);
    }

    #[test]
    fn test_single_quoted_attributes() {
        let html = r#"<meta name='twitter:title' content='old'>"#;
        let out = replace_meta_content(html, "name", "twitter:title", "fresh");
        assert_eq!(out, r#"<meta name='twitter:title' content='fresh'>"#);
    }

    #[test]
    fn test_non_matching_tags_untouched() {
        let html = concat!(
            r#"<meta charset="utf-8">"#,
            r#"<meta property="og:type" content="website">"#,
            r#"<meta property="og:title" content="">"#,
        );
        let out = replace_meta_content(html, "property", "og:title", "T");
        assert!(out.contains(r#"<meta charset="utf-8">"#));
        assert!(out.contains(r#"<meta property="og:type" content="website">"#));
        assert!(out.contains(r#"<meta property="og:title" content="T">"#));
    }

    #[test]
    fn test_metadata_element_is_not_a_meta_tag() {
        let html = r#"<metadata property="og:title">x</metadata>"#;
        let out = replace_meta_content(html, "property", "og:title", "T");
        assert_eq!(out, html);
    }

    #[test]
    fn test_idempotent_per_rule() {
        let html = r#"<head><meta name="description" content=""></head>"#;
        let once = replace_meta_content(html, "name", "description", "About alice");
        let twice = replace_meta_content(&once, "name", "description", "About alice");
        assert_eq!(once, twice);
        // No duplicated tags, no concatenated content
        assert_eq!(twice.matches("<meta").count(), 1);
        assert_eq!(twice.matches("About alice").count(), 1);
    }

    #[test]
    fn test_replacement_content_is_escaped() {
        let html = r#"<meta property="og:title" content="">"#;
        let out = replace_meta_content(html, "property", "og:title", r#"Tom & "Jerry""#);
        assert_eq!(
            out,
            r#"<meta property="og:title" content="Tom &amp; &quot;Jerry&quot;">"#
        );
    }

    #[test]
    fn test_apply_rules_rewrites_all_seven_tags() {
        let shell = concat!(
            r#"<meta name="description" content="">"#,
            r#"<meta property="og:title" content="">"#,
            r#"<meta property="og:description" content="">"#,
            r#"<meta property="og:image" content="">"#,
            r#"<meta name="twitter:title" content="">"#,
            r#"<meta name="twitter:description" content="">"#,
            r#"<meta name="twitter:image" content="">"#,
            r#"<meta property="og:site_name" content="Praxis">"#,
        );
        let meta = PageMeta {
            title: "T".to_string(),
            description: "D".to_string(),
            image_url: "https://img/x.png".to_string(),
        };

        let out = apply_rules(shell, &preview_rules(&meta));

        assert!(out.contains(r#"<meta name="description" content="D">"#));
        assert!(out.contains(r#"<meta property="og:title" content="T">"#));
        assert!(out.contains(r#"<meta property="og:description" content="D">"#));
        assert!(out.contains(r#"<meta property="og:image" content="https://img/x.png">"#));
        assert!(out.contains(r#"<meta name="twitter:title" content="T">"#));
        assert!(out.contains(r#"<meta name="twitter:description" content="D">"#));
        assert!(out.contains(r#"<meta name="twitter:image" content="https://img/x.png">"#));
        // Bystander tag survives unchanged
        assert!(out.contains(r#"<meta property="og:site_name" content="Praxis">"#));
    }
}
