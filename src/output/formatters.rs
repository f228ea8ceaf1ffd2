use anyhow::Result;
use std::fmt::Write;

use crate::extractors::{SubtitleLine, VideoDetails};
use crate::utils::{format_offset, format_timestamp, parse_seconds};

/// Subtitles as `[mm:ss] text` lines
pub fn format_lines_as_text(lines: &[SubtitleLine]) -> String {
    lines
        .iter()
        .map(|line| format!("[{}] {}", format_offset(parse_seconds(&line.start)), line.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Title and description followed by the subtitle lines
pub fn format_details_as_text(details: &VideoDetails) -> String {
    let mut output = format!("{}\n\n{}\n", details.title, details.description);
    if details.subtitles.is_empty() {
        output.push_str("\n(no subtitles)");
    } else {
        output.push('\n');
        output.push_str(&format_lines_as_text(&details.subtitles));
    }
    output
}

pub fn format_as_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn format_as_srt(lines: &[SubtitleLine]) -> Result<String> {
    let mut output = String::new();

    for (index, line) in lines.iter().enumerate() {
        let (start, end) = bounds(line);
        writeln!(output, "{}", index + 1)?;
        writeln!(output, "{} --> {}", format_timestamp(start, ','), format_timestamp(end, ','))?;
        writeln!(output, "{}\n", line.text)?;
    }

    Ok(output)
}

pub fn format_as_vtt(lines: &[SubtitleLine]) -> Result<String> {
    let mut output = String::from("WEBVTT\n\n");

    for line in lines {
        let (start, end) = bounds(line);
        writeln!(output, "{} --> {}", format_timestamp(start, '.'), format_timestamp(end, '.'))?;
        writeln!(output, "{}\n", line.text)?;
    }

    Ok(output)
}

fn bounds(line: &SubtitleLine) -> (f64, f64) {
    let start = parse_seconds(&line.start);
    (start, start + parse_seconds(&line.duration))
}
