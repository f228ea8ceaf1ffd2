use regex::Regex;
use std::sync::LazyLock;

use super::{Diagnostic, SubtitleLine};

const DOCUMENT_PROLOG: &str = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>"#;
const DOCUMENT_EPILOG: &str = "</transcript>";
const LINE_DELIMITER: &str = "</text>";

static START_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"start="([\d.]+)""#).unwrap());
static DUR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"dur="([\d.]+)""#).unwrap());
static OPEN_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<text[^>]*>").unwrap());
static AMP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)&amp;").unwrap());
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").unwrap());

/// Parsed caption document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCaptions {
    /// Lines in document order
    pub lines: Vec<SubtitleLine>,

    /// Fragments that were skipped
    pub skipped: Vec<Diagnostic>,
}

/// Parse a timed-text document into subtitle lines
///
/// Fragments without a `start` or `dur` attribute are skipped and reported; the parse itself
/// never fails.
pub fn parse_captions(document: &str) -> ParsedCaptions {
    let body = document
        .replacen(DOCUMENT_PROLOG, "", 1)
        .replacen(DOCUMENT_EPILOG, "", 1);

    let mut parsed = ParsedCaptions::default();

    for (index, fragment) in body
        .split(LINE_DELIMITER)
        .filter(|fragment| !fragment.trim().is_empty())
        .enumerate()
    {
        let start = attribute(&START_REGEX, fragment);
        let duration = attribute(&DUR_REGEX, fragment);

        match (start, duration) {
            (Some(start), Some(duration)) => parsed.lines.push(SubtitleLine {
                start,
                duration,
                text: clean_text(fragment),
            }),
            (start, _) => {
                let reason = if start.is_none() {
                    "missing start attribute"
                } else {
                    "missing dur attribute"
                };
                tracing::debug!("Skipping caption line {}: {}", index, reason);
                parsed.skipped.push(Diagnostic::MalformedLine {
                    index,
                    reason: reason.to_string(),
                });
            }
        }
    }

    parsed
}

fn attribute(re: &Regex, fragment: &str) -> Option<String> {
    re.captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Reduce a caption fragment to its plain text
///
/// `&amp;` is unescaped before the first tag strip, and tags are stripped a second time after
/// entity decoding.
pub fn clean_text(fragment: &str) -> String {
    let text = OPEN_TAG_REGEX.replace(fragment, "");
    let text = AMP_REGEX.replace_all(&text, "&");
    let text = strip_tags(&text);
    let text = html_escape::decode_html_entities(&text);
    strip_tags(&text)
}

fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}
