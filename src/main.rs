use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_subtitle_scraper::cli::{Cli, Commands, FetchArgs};
use yt_subtitle_scraper::config::Config;
use yt_subtitle_scraper::server::{self, AppState};
use yt_subtitle_scraper::{output, utils, Diagnostic, SubtitlePipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_subtitle_scraper=debug,subscrape=debug,tower_http=debug"
    } else if cli.quiet {
        "yt_subtitle_scraper=error,subscrape=error"
    } else {
        "yt_subtitle_scraper=info,subscrape=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().await?;

    match cli.command {
        Commands::Details(args) => {
            let pipeline = SubtitlePipeline::from_config(&config)?;
            let (language, proxy) = resolve(&args, &config)?;

            let outcome = pipeline
                .fetch_video_details(&args.video_id, Some(language.as_str()), proxy.as_deref())
                .await?;

            report(&outcome.diagnostics, cli.quiet);
            let content = output::render_details(&outcome.value, args.format)?;
            let path = output::resolve_output_path(
                args.output.as_deref(),
                &outcome.value.title,
                &language,
                args.format,
            );
            output::emit(&content, path.as_deref())?;
        }
        Commands::Subtitles(args) => {
            let pipeline = SubtitlePipeline::from_config(&config)?;
            let (language, proxy) = resolve(&args, &config)?;

            let outcome = pipeline
                .fetch_subtitles_only(&args.video_id, Some(language.as_str()), proxy.as_deref())
                .await?;

            report(&outcome.diagnostics, cli.quiet);
            let content = output::render_subtitles(&outcome.value, args.format)?;
            let path = output::resolve_output_path(
                args.output.as_deref(),
                &args.video_id,
                &language,
                args.format,
            );
            output::emit(&content, path.as_deref())?;
        }
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let state = Arc::new(AppState {
                pipeline: SubtitlePipeline::from_config(&config)?,
                default_language: config.scraper.default_language.clone(),
            });
            server::serve(state, &addr).await?;
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else if Config::config_path()?.exists() {
                println!("Config file already exists: {}", Config::config_path()?.display());
            } else {
                let path = config.save().await?;
                println!("Default configuration written to: {}", path.display());
            }
        }
        Commands::Languages => {
            println!("Common caption languages (any code accepted):");
            for (code, name) in utils::COMMON_LANGUAGES {
                println!("  {:<8} {}", code, name);
            }
        }
    }

    Ok(())
}

fn report(diagnostics: &[Diagnostic], quiet: bool) {
    if quiet {
        return;
    }
    if let Some(summary) = output::format_diagnostics(diagnostics) {
        eprintln!("{}", summary);
    }
}

/// Language and proxy for a fetch, CLI flags taking precedence over the config file
fn resolve(args: &FetchArgs, config: &Config) -> Result<(String, Option<String>)> {
    let language = args
        .language
        .clone()
        .unwrap_or_else(|| config.scraper.default_language.clone());

    let proxy = args.proxy.clone().or_else(|| config.scraper.proxy.clone());
    if let Some(proxy) = &proxy {
        utils::validate_proxy_url(proxy)?;
    }

    Ok((language, proxy))
}
