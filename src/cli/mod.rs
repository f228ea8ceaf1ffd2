use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "subscrape",
    about = "Scrape titles, descriptions and timed subtitles from YouTube videos",
    version,
    long_about = "Reads the data embedded in a YouTube watch page, picks a caption track for the requested language and prints its timed lines. No API key or login is needed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors and skip the warning summary
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch title, description and subtitles of a video
    Details(FetchArgs),

    /// Fetch only the subtitles of a video
    Subtitles(FetchArgs),

    /// Serve the scraper over HTTP
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(short, long, value_name = "ADDR", env = "SUBSCRAPE_BIND")]
        bind: Option<String>,
    },

    /// Show or initialize the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },

    /// List commonly available caption languages
    Languages,
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Video identifier, as found after `v=` in a watch URL
    #[arg(value_name = "VIDEO_ID")]
    pub video_id: String,

    /// Caption language code (defaults to the configured language, usually "en")
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Proxy used for the watch page request
    #[arg(long, value_name = "URL", env = "SUBSCRAPE_PROXY")]
    pub proxy: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file or directory (prints to console if not specified)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text with timestamps
    Text,
    /// JSON
    Json,
    /// SRT subtitle format
    Srt,
    /// WebVTT format
    Vtt,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Vtt => write!(f, "vtt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subtitles_command() {
        let cli = Cli::try_parse_from([
            "subscrape", "subtitles", "dQw4w9WgXcQ", "-l", "de", "--format", "srt",
        ])
        .unwrap();

        match cli.command {
            Commands::Subtitles(args) => {
                assert_eq!(args.video_id, "dQw4w9WgXcQ");
                assert_eq!(args.language.as_deref(), Some("de"));
                assert_eq!(args.format, OutputFormat::Srt);
                assert!(args.output.is_none());
            }
            _ => panic!("expected subtitles command"),
        }
    }

    #[test]
    fn test_video_id_is_required() {
        assert!(Cli::try_parse_from(["subscrape", "details"]).is_err());
    }
}
