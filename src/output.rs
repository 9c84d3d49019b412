//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::format::OutputFormat;
use crate::ops::LogEntry;
use crate::pipeline::PipelineResult;
use std::path::Path;

/// Lines for `info`: dimensions, format, canonical labels.
pub fn format_info(path: &Path, width: u32, height: u32, format: OutputFormat) -> Vec<String> {
    vec![
        format!("{}", path.display()),
        format!("    Dimensions: {width}x{height}"),
        format!("    Format: {format} ({})", format.mime_type()),
    ]
}

/// Lines for `apply`: the replayed history and what was written.
///
/// When the encoder substituted a format (WEBP fallback), the requested and
/// written formats differ, and the summary says so.
pub fn format_apply(
    output: &Path,
    history: &[LogEntry],
    requested: OutputFormat,
    result: &PipelineResult,
) -> Vec<String> {
    let mut lines = Vec::new();
    if history.is_empty() {
        lines.push("No operations; re-encoding the original".to_string());
    } else {
        lines.push(format!("Applied {} operation(s)", history.len()));
        for (pos, entry) in history.iter().enumerate() {
            lines.push(format!("    {:0>3} {}", pos + 1, entry.op));
        }
    }
    lines.push(format!(
        "{} ({}x{}, {})",
        output.display(),
        result.width,
        result.height,
        result.format
    ));
    if result.format != requested {
        lines.push(format!(
            "    Note: {requested} encoding unavailable, wrote {} instead",
            result.format
        ));
    }
    lines
}

/// One line per processed thumbnail source.
pub fn format_thumb_line(source: &Path, status: &str) -> String {
    format!("    {}: {status}", source.display())
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::EditOp;
    use std::time::SystemTime;

    fn entry(op: EditOp) -> LogEntry {
        LogEntry {
            op,
            recorded_at: SystemTime::now(),
        }
    }

    fn result(width: u32, height: u32, format: OutputFormat) -> PipelineResult {
        PipelineResult {
            bytes: Vec::new(),
            width,
            height,
            format,
        }
    }

    #[test]
    fn info_lists_dimensions_and_mime() {
        let lines = format_info(Path::new("photo.jpg"), 400, 300, OutputFormat::Jpeg);
        assert_eq!(lines[0], "photo.jpg");
        assert_eq!(lines[1], "    Dimensions: 400x300");
        assert_eq!(lines[2], "    Format: jpeg (image/jpeg)");
    }

    #[test]
    fn apply_lists_history_in_order() {
        let history = vec![
            entry(EditOp::RotateRight),
            entry(EditOp::Resize {
                width: Some(150),
                height: None,
            }),
        ];
        let lines = format_apply(
            Path::new("out.png"),
            &history,
            OutputFormat::Png,
            &result(150, 200, OutputFormat::Png),
        );
        assert_eq!(lines[0], "Applied 2 operation(s)");
        assert_eq!(lines[1], "    001 rotate-right");
        assert_eq!(lines[2], "    002 resize=150x");
        assert_eq!(lines[3], "out.png (150x200, png)");
    }

    #[test]
    fn apply_with_empty_history_says_so() {
        let lines = format_apply(
            Path::new("out.png"),
            &[],
            OutputFormat::Png,
            &result(40, 30, OutputFormat::Png),
        );
        assert_eq!(lines[0], "No operations; re-encoding the original");
    }

    #[test]
    fn apply_flags_format_substitution() {
        let lines = format_apply(
            Path::new("out.webp"),
            &[],
            OutputFormat::Webp,
            &result(40, 30, OutputFormat::Png),
        );
        assert!(lines.last().unwrap().contains("wrote png instead"));
    }

    #[test]
    fn thumb_line_shape() {
        assert_eq!(
            format_thumb_line(Path::new("a/b.jpg"), "generated"),
            "    a/b.jpg: generated"
        );
    }
}
