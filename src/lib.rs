//! yt-subtitle-scraper - pull titles, descriptions and timed captions out of YouTube watch pages
//!
//! The library scrapes the data embedded in a video's watch page, picks a caption track for the
//! requested language, fetches the timed-text document behind it and turns it into ordered
//! subtitle lines. No official API or credentials are involved.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{Diagnostic, SubtitleLine, VideoDetails};
pub use fetch::{DocumentFetcher, HttpFetcher};
pub use pipeline::{Outcome, SubtitlePipeline, DEFAULT_LANGUAGE};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Fatal errors of the scraping pipeline
#[derive(thiserror::Error, Debug)]
pub enum ScraperError {
    #[error("Video not found: no title metadata on the page for ID {0}")]
    TargetNotFound(String),

    #[error("Failed to fetch {url}{}: {reason}", via(.proxy.as_deref()))]
    Transport {
        url: String,
        proxy: Option<String>,
        reason: String,
    },

    #[error("Failed to fetch {url}{}: HTTP {status}", via(.proxy.as_deref()))]
    HttpStatus {
        url: String,
        proxy: Option<String>,
        status: u16,
    },

    #[error("Invalid proxy address {proxy}: {reason}")]
    InvalidProxy { proxy: String, reason: String },
}

fn via(proxy: Option<&str>) -> String {
    proxy
        .map(|p| format!(" via proxy {}", p))
        .unwrap_or_default()
}
