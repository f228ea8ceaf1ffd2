use serde::{Deserialize, Serialize};

pub mod captions;
pub mod metadata;
pub mod tracks;

pub use captions::{parse_captions, ParsedCaptions};
pub use metadata::{extract_metadata, PageMetadata, NO_DESCRIPTION};
pub use tracks::{locate_track, CaptionTrack, TrackLookup, MATCH_RULES};

/// Title, description and subtitles of a single video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    /// Title taken from the page's `title` meta tag, never empty
    pub title: String,

    /// Description meta tag, or [`NO_DESCRIPTION`] when the page has none
    pub description: String,

    /// Caption lines in playback order, empty when no track was found
    pub subtitles: Vec<SubtitleLine>,
}

/// One timed caption line
///
/// `start` and `duration` keep the exact decimal text of the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleLine {
    /// Start offset in seconds
    pub start: String,

    /// Display duration in seconds
    #[serde(rename = "dur")]
    pub duration: String,

    /// Plain text with markup removed and entities decoded
    pub text: String,
}

/// A non-fatal degradation observed while scraping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The page carries no `captionTracks` marker at all
    NoCaptionMarker,

    /// The marker is present but no track array follows it
    TrackListNotFound,

    /// The track array could not be deserialized
    MalformedTrackList { reason: String },

    /// None of the match rules selected a track
    NoTrackForLanguage { language: String, available: Vec<String> },

    /// The selected track has no usable `baseUrl`
    TrackMissingBaseUrl { track_id: String },

    /// A caption fragment lacked `start` or `dur` and was skipped
    MalformedLine { index: usize, reason: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::NoCaptionMarker => write!(f, "no captions available on the page"),
            Diagnostic::TrackListNotFound => write!(f, "caption track list not found"),
            Diagnostic::MalformedTrackList { reason } => {
                write!(f, "caption track list could not be parsed: {}", reason)
            }
            Diagnostic::NoTrackForLanguage { language, available } => write!(
                f,
                "no caption track for language '{}' (available: {})",
                language,
                available.join(", ")
            ),
            Diagnostic::TrackMissingBaseUrl { track_id } => {
                write!(f, "caption track '{}' has no base URL", track_id)
            }
            Diagnostic::MalformedLine { index, reason } => {
                write!(f, "skipped caption line {}: {}", index, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_line_serializes_dur() {
        let line = SubtitleLine {
            start: "0.5".to_string(),
            duration: "2.3".to_string(),
            text: "Hello".to_string(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json, serde_json::json!({"start": "0.5", "dur": "2.3", "text": "Hello"}));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::NoTrackForLanguage {
            language: "de".to_string(),
            available: vec![".en".to_string(), "a.fr".to_string()],
        };
        assert_eq!(diag.to_string(), "no caption track for language 'de' (available: .en, a.fr)");
    }
}
