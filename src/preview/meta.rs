//! Page metadata derivation
//!
//! Computes the (title, description, image URL) triple for one request.
//! Never persisted; concept pages start from a slug-derived fallback that a
//! successful metadata fetch overwrites.

use crate::services::ConceptData;

/// Display metadata for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl PageMeta {
    /// Metadata for a user profile page
    pub fn for_user(username: &str, og_image_url: &str) -> Self {
        Self {
            title: format!("{}'s Profile", username),
            description: format!("View {}'s profile", username),
            image_url: format!(
                "{}/users/{}.png",
                og_image_url.trim_end_matches('/'),
                username
            ),
        }
    }

    /// Slug-derived fallback metadata for a concept page
    pub fn for_concept(slug: &str, og_image_url: &str) -> Self {
        let title = slug_to_title(slug);
        Self {
            description: format!("View the {} concept", title),
            image_url: format!(
                "{}/concepts/{}.png",
                og_image_url.trim_end_matches('/'),
                slug
            ),
            title,
        }
    }

    /// Overwrite the fallback title and description with fetched concept data
    pub fn apply_concept_data(&mut self, data: ConceptData) {
        self.title = data.title;
        self.description = data.description_markdown;
    }
}

/// Turn a hyphenated slug into a human-readable title.
///
/// Splits on hyphens, upper-cases each word's first letter, lower-cases the
/// rest, and joins with spaces: `network-protocols` becomes
/// `Network Protocols`.
pub fn slug_to_title(slug: &str) -> String {
    slug.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_to_title() {
        assert_eq!(slug_to_title("network-protocols"), "Network Protocols");
        assert_eq!(slug_to_title("rust"), "Rust");
        assert_eq!(slug_to_title("HTTP-basics"), "Http Basics");
    }

    #[test]
    fn test_slug_to_title_single_letter_words() {
        assert_eq!(slug_to_title("a-b-c"), "A B C");
    }

    #[test]
    fn test_user_meta() {
        let meta = PageMeta::for_user("alice", "https://og.example.com");
        assert_eq!(meta.title, "alice's Profile");
        assert!(meta.description.contains("alice"));
        assert!(meta.image_url.contains("alice"));
    }

    #[test]
    fn test_concept_fallback_meta() {
        let meta = PageMeta::for_concept("network-protocols", "https://og.example.com/");
        assert_eq!(meta.title, "Network Protocols");
        assert_eq!(meta.description, "View the Network Protocols concept");
        assert_eq!(
            meta.image_url,
            "https://og.example.com/concepts/network-protocols.png"
        );
    }

    #[test]
    fn test_concept_data_overrides_fallback() {
        let mut meta = PageMeta::for_concept("network-protocols", "https://og.example.com");
        meta.apply_concept_data(ConceptData {
            title: "Custom Title".to_string(),
            description_markdown: "Custom desc".to_string(),
        });
        assert_eq!(meta.title, "Custom Title");
        assert_eq!(meta.description, "Custom desc");
        // The image URL is not part of the fetched payload
        assert!(meta.image_url.contains("network-protocols"));
    }
}
