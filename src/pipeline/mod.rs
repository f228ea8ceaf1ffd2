use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::extractors::{
    extract_metadata, locate_track, parse_captions, Diagnostic, SubtitleLine, TrackLookup,
    VideoDetails,
};
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::Result;

/// Language used when the caller does not ask for one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Watch page address prefix; the video identifier is appended verbatim
pub const DEFAULT_PAGE_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// A pipeline result together with the non-fatal problems met on the way
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    /// True when every step succeeded without degrading
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Scrapes video details and subtitles from watch pages
pub struct SubtitlePipeline {
    fetcher: Arc<dyn DocumentFetcher>,
    page_url_base: String,
}

impl SubtitlePipeline {
    /// Create a pipeline over the given transport
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self {
            fetcher,
            page_url_base: DEFAULT_PAGE_URL_BASE.to_string(),
        }
    }

    /// Create a pipeline with an HTTP transport configured from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::with_user_agent(&config.scraper.user_agent)?;
        Ok(Self::new(Arc::new(fetcher)).with_page_url_base(&config.scraper.page_url_base))
    }

    pub fn with_page_url_base(mut self, base: &str) -> Self {
        self.page_url_base = base.to_string();
        self
    }

    /// Watch page address for a video
    pub fn page_url(&self, video_id: &str) -> String {
        format!("{}{}", self.page_url_base, video_id)
    }

    /// Fetch title, description and subtitles of a video
    ///
    /// Fails with [`crate::ScraperError::TargetNotFound`] when the page has no title, or with a
    /// transport error. Missing captions only produce diagnostics and an empty subtitle list.
    pub async fn fetch_video_details(
        &self,
        video_id: &str,
        language: Option<&str>,
        proxy: Option<&str>,
    ) -> Result<Outcome<VideoDetails>> {
        let language = language.unwrap_or(DEFAULT_LANGUAGE);
        tracing::info!("Fetching video details for {} ({})", video_id, language);

        let html = self.fetch_page(video_id, proxy).await?;
        let metadata = extract_metadata(&html, video_id)?;

        let mut diagnostics = Vec::new();
        let subtitles = self.subtitles_from_page(&html, language, &mut diagnostics).await?;

        Ok(Outcome {
            value: VideoDetails {
                title: metadata.title,
                description: metadata.description,
                subtitles,
            },
            diagnostics,
        })
    }

    /// Fetch only the subtitles of a video; the page is not required to carry a title
    pub async fn fetch_subtitles_only(
        &self,
        video_id: &str,
        language: Option<&str>,
        proxy: Option<&str>,
    ) -> Result<Outcome<Vec<SubtitleLine>>> {
        let language = language.unwrap_or(DEFAULT_LANGUAGE);
        tracing::info!("Fetching subtitles for {} ({})", video_id, language);

        let html = self.fetch_page(video_id, proxy).await?;

        let mut diagnostics = Vec::new();
        let subtitles = self.subtitles_from_page(&html, language, &mut diagnostics).await?;

        Ok(Outcome {
            value: subtitles,
            diagnostics,
        })
    }

    async fn fetch_page(&self, video_id: &str, proxy: Option<&str>) -> Result<String> {
        let url = self.page_url(video_id);
        match proxy {
            Some(proxy) => self.fetcher.fetch_via_proxy(&url, proxy).await,
            None => self.fetcher.fetch(&url).await,
        }
    }

    /// Shared by both entry points so their subtitle output stays identical
    async fn subtitles_from_page(
        &self,
        html: &str,
        language: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<SubtitleLine>> {
        let (base_url, track_id, rule) = match locate_track(html, language) {
            TrackLookup::Found {
                base_url,
                track_id,
                rule,
            } => (base_url, track_id, rule),
            TrackLookup::Missing(diagnostic) => {
                tracing::warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
                return Ok(Vec::new());
            }
        };

        tracing::info!("Using caption track {} ({} match)", track_id, rule);

        // Caption documents are always fetched directly, even when the page went through a proxy
        let document = self.fetcher.fetch(&base_url).await?;
        let parsed = parse_captions(&document);

        for skipped in &parsed.skipped {
            tracing::warn!("{}", skipped);
        }
        diagnostics.extend(parsed.skipped);

        tracing::info!("Parsed {} subtitle lines", parsed.lines.len());
        Ok(parsed.lines)
    }
}
