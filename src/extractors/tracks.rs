use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use super::Diagnostic;

/// Literal marker that tells whether the page lists any caption tracks
const CAPTION_MARKER: &str = "captionTracks";

static TRACK_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""captionTracks":(\[.*?\])"#).unwrap());

/// Caption track descriptor as embedded in the watch page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptionTrack {
    /// Address of the timed-text document
    #[serde(rename = "baseUrl", default)]
    pub base_url: Option<String>,

    /// Variant identifier: `.xx` for manual tracks, `a.xx` for auto-generated ones
    #[serde(rename = "vssId", default)]
    pub track_id: String,
}

/// Result of looking up a caption track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackLookup {
    /// A track with a usable base URL, and the rule that picked it
    Found {
        base_url: String,
        track_id: String,
        rule: &'static str,
    },
    /// No track could be used; the diagnostic says why
    Missing(Diagnostic),
}

type MatchRule = fn(&str, &str) -> bool;

/// Track selection rules, tried in order; the first rule that matches any track wins
pub const MATCH_RULES: &[(&str, MatchRule)] = &[
    ("manual", |id, lang| id.strip_prefix('.') == Some(lang)),
    ("auto-generated", |id, lang| id.strip_prefix("a.") == Some(lang)),
    ("loose", |id, lang| id.contains(&format!(".{}", lang))),
];

/// Locate the caption track for `language` in raw page markup
pub fn locate_track(html: &str, language: &str) -> TrackLookup {
    if !html.contains(CAPTION_MARKER) {
        return TrackLookup::Missing(Diagnostic::NoCaptionMarker);
    }

    let tracks = match parse_track_list(html) {
        Ok(tracks) => tracks,
        Err(diagnostic) => return TrackLookup::Missing(diagnostic),
    };
    tracing::debug!("Found {} caption tracks", tracks.len());

    let Some((rule, track)) = select_track(&tracks, language) else {
        return TrackLookup::Missing(Diagnostic::NoTrackForLanguage {
            language: language.to_string(),
            available: tracks.iter().map(|t| t.track_id.clone()).collect(),
        });
    };

    match track.base_url.as_deref().filter(|url| !url.is_empty()) {
        Some(base_url) => TrackLookup::Found {
            base_url: base_url.to_string(),
            track_id: track.track_id.clone(),
            rule,
        },
        None => TrackLookup::Missing(Diagnostic::TrackMissingBaseUrl {
            track_id: track.track_id.clone(),
        }),
    }
}

/// Pull the track array out of the page and deserialize it
pub fn parse_track_list(html: &str) -> std::result::Result<Vec<CaptionTrack>, Diagnostic> {
    let json = TRACK_LIST_REGEX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or(Diagnostic::TrackListNotFound)?;

    serde_json::from_str(json.as_str()).map_err(|e| Diagnostic::MalformedTrackList {
        reason: e.to_string(),
    })
}

/// Apply [`MATCH_RULES`] in order and return the first hit with the rule's name
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    language: &str,
) -> Option<(&'static str, &'a CaptionTrack)> {
    MATCH_RULES.iter().find_map(|(name, rule)| {
        tracks
            .iter()
            .find(|track| rule(&track.track_id, language))
            .map(|track| (*name, track))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, url: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: url.map(str::to_string),
            track_id: id.to_string(),
        }
    }

    fn page_with_tracks(tracks: &str) -> String {
        format!(
            r#"<script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":{},"audioTracks":[]}}}}}};</script>"#,
            tracks
        )
    }

    #[test]
    fn test_rule_order_prefers_manual_track() {
        let tracks = vec![
            track("a.en", Some("auto")),
            track("en-US", Some("regional")),
            track(".en", Some("manual")),
        ];
        let (rule, selected) = select_track(&tracks, "en").unwrap();
        assert_eq!(rule, "manual");
        assert_eq!(selected.track_id, ".en");
    }

    #[test]
    fn test_auto_generated_beats_loose_match() {
        let tracks = vec![track(".en-GB", Some("loose")), track("a.en", Some("auto"))];
        let (rule, selected) = select_track(&tracks, "en").unwrap();
        assert_eq!(rule, "auto-generated");
        assert_eq!(selected.track_id, "a.en");
    }

    #[test]
    fn test_loose_match_fallback() {
        let tracks = vec![track(".fr", Some("fr")), track(".en-GB", Some("gb"))];
        let (rule, selected) = select_track(&tracks, "en").unwrap();
        assert_eq!(rule, "loose");
        assert_eq!(selected.track_id, ".en-GB");
    }

    #[test]
    fn test_each_rule_in_isolation() {
        let (_, manual) = MATCH_RULES[0];
        let (_, auto) = MATCH_RULES[1];
        let (_, loose) = MATCH_RULES[2];

        assert!(manual(".en", "en"));
        assert!(!manual("a.en", "en"));
        assert!(auto("a.en", "en"));
        assert!(!auto(".en", "en"));
        assert!(loose("a.en-US", "en"));
        assert!(!loose("en-US", "en"));
    }

    #[test]
    fn test_locate_track_from_page() {
        let html = page_with_tracks(
            r#"[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","vssId":".en","languageCode":"en"}]"#,
        );
        assert_eq!(
            locate_track(&html, "en"),
            TrackLookup::Found {
                base_url: "https://www.youtube.com/api/timedtext?v=abc&lang=en".to_string(),
                track_id: ".en".to_string(),
                rule: "manual",
            }
        );
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(
            locate_track("<html></html>", "en"),
            TrackLookup::Missing(Diagnostic::NoCaptionMarker)
        );
    }

    #[test]
    fn test_marker_without_array() {
        let html = r#"{"captionTracks": null}"#;
        assert_eq!(
            locate_track(html, "en"),
            TrackLookup::Missing(Diagnostic::TrackListNotFound)
        );
    }

    #[test]
    fn test_malformed_track_list() {
        let html = r#""captionTracks":[{"baseUrl":}]"#;
        assert!(matches!(
            locate_track(html, "en"),
            TrackLookup::Missing(Diagnostic::MalformedTrackList { .. })
        ));
    }

    #[test]
    fn test_no_track_for_language() {
        let html = page_with_tracks(r#"[{"baseUrl":"https://x","vssId":".fr"}]"#);
        assert_eq!(
            locate_track(&html, "en"),
            TrackLookup::Missing(Diagnostic::NoTrackForLanguage {
                language: "en".to_string(),
                available: vec![".fr".to_string()],
            })
        );
    }

    #[test]
    fn test_selected_track_without_base_url() {
        let html = page_with_tracks(r#"[{"baseUrl":"","vssId":".en"},{"baseUrl":"https://x","vssId":"a.en"}]"#);
        assert_eq!(
            locate_track(&html, "en"),
            TrackLookup::Missing(Diagnostic::TrackMissingBaseUrl {
                track_id: ".en".to_string(),
            })
        );
    }
}
