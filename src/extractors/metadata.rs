use regex::Regex;
use std::sync::LazyLock;

use crate::{Result, ScraperError};

/// Placeholder used when a page has no description meta tag
pub const NO_DESCRIPTION: &str = "No description found";

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta name="title" content="([^"]*|[^"]*[^&]quot;[^"]*)">"#).unwrap()
});

static DESCRIPTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta name="description" content="([^"]*|[^"]*[^&]quot;[^"]*)">"#).unwrap()
});

/// Title and description scraped from a watch page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Extract title and description meta tags from raw page markup
///
/// A missing or empty title means the page is not a video page, which is reported as
/// [`ScraperError::TargetNotFound`] for `video_id`.
pub fn extract_metadata(html: &str, video_id: &str) -> Result<PageMetadata> {
    let title = capture(&TITLE_REGEX, html)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ScraperError::TargetNotFound(video_id.to_string()))?;

    let description = capture(&DESCRIPTION_REGEX, html).unwrap_or_else(|| {
        tracing::debug!("No description meta tag for {}", video_id);
        NO_DESCRIPTION.to_string()
    });

    Ok(PageMetadata { title, description })
}

fn capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_title_and_description() {
        let html = r#"<head><meta name="title" content="Rust in 100 Seconds"><meta name="description" content="A quick tour."></head>"#;
        let meta = extract_metadata(html, "5C_HPTJg5ek").unwrap();
        assert_eq!(meta.title, "Rust in 100 Seconds");
        assert_eq!(meta.description, "A quick tour.");
    }

    #[test]
    fn test_missing_description_uses_placeholder() {
        let html = r#"<meta name="title" content="Only a title">"#;
        let meta = extract_metadata(html, "abc").unwrap();
        assert_eq!(meta.description, "No description found");
    }

    #[test]
    fn test_title_with_escaped_quotes() {
        let html = r#"<meta name="title" content="The &quot;best&quot; talk">"#;
        let meta = extract_metadata(html, "abc").unwrap();
        assert_eq!(meta.title, "The &quot;best&quot; talk");
    }

    #[test]
    fn test_missing_title_is_target_not_found() {
        let html = r#"<meta name="description" content="orphan">"#;
        match extract_metadata(html, "missing-id") {
            Err(ScraperError::TargetNotFound(id)) => assert_eq!(id, "missing-id"),
            other => panic!("expected TargetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_title_is_target_not_found() {
        let html = r#"<meta name="title" content="">"#;
        assert!(matches!(
            extract_metadata(html, "x"),
            Err(ScraperError::TargetNotFound(_))
        ));
    }
}
