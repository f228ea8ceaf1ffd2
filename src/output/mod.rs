use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::extractors::{Diagnostic, SubtitleLine, VideoDetails};
use crate::utils::output_file_name;

pub mod formatters;

pub use formatters::*;

/// Render video details; SRT and WebVTT carry only the subtitles
pub fn render_details(details: &VideoDetails, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_details_as_text(details)),
        OutputFormat::Json => format_as_json(details),
        OutputFormat::Srt => format_as_srt(&details.subtitles),
        OutputFormat::Vtt => format_as_vtt(&details.subtitles),
    }
}

/// Render a subtitle list
pub fn render_subtitles(lines: &[SubtitleLine], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_lines_as_text(lines)),
        OutputFormat::Json => format_as_json(&lines),
        OutputFormat::Srt => format_as_srt(lines),
        OutputFormat::Vtt => format_as_vtt(lines),
    }
}

/// Write rendered output to `path`, or print it when no path is given
pub fn emit(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs_err::write(path, content)?;
            tracing::info!("Output saved to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Resolve the `-o` argument: a directory gets a generated file name inside it
pub fn resolve_output_path(
    path: Option<&Path>,
    stem: &str,
    language: &str,
    format: OutputFormat,
) -> Option<PathBuf> {
    let path = path?;
    if path.is_dir() {
        Some(path.join(output_file_name(stem, language, format.extension())))
    } else {
        Some(path.to_path_buf())
    }
}

/// Human-readable summary of non-fatal problems, `None` when there are none
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }

    let mut summary = format!("⚠️  {} warning(s) while scraping:", diagnostics.len());
    for diagnostic in diagnostics {
        summary.push_str(&format!("\n   • {}", diagnostic));
    }
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.srt");
        emit("1\n00:00:00,000 --> 00:00:01,000\nhi\n", Some(&path)).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "1\n00:00:00,000 --> 00:00:01,000\nhi\n"
        );
    }

    #[test]
    fn test_render_details_srt_ignores_metadata() {
        let details = VideoDetails {
            title: "Title".to_string(),
            description: "Desc".to_string(),
            subtitles: vec![],
        };
        assert_eq!(render_details(&details, OutputFormat::Srt).unwrap(), "");
        assert!(render_details(&details, OutputFormat::Json)
            .unwrap()
            .contains("\"title\": \"Title\""));
    }

    #[test]
    fn test_directory_output_gets_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_output_path(Some(dir.path()), "My Video", "de", OutputFormat::Vtt).unwrap();
        assert_eq!(path, dir.path().join("My_Video_de.vtt"));

        let file = dir.path().join("explicit.txt");
        let path = resolve_output_path(Some(&file), "My Video", "de", OutputFormat::Srt).unwrap();
        assert_eq!(path, file);

        assert!(resolve_output_path(None, "My Video", "de", OutputFormat::Text).is_none());
    }

    #[test]
    fn test_diagnostics_summary() {
        assert!(format_diagnostics(&[]).is_none());

        let summary = format_diagnostics(&[
            Diagnostic::NoCaptionMarker,
            Diagnostic::MalformedLine {
                index: 3,
                reason: "missing start attribute".to_string(),
            },
        ])
        .unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("2 warning(s)"));
        assert!(lines[1].contains(&Diagnostic::NoCaptionMarker.to_string()));
        assert!(lines[2].contains("missing start attribute"));
    }
}
