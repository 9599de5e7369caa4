use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;
use stylescope_lib::{
    AnalysisKind, AnalysisResult, CliErrorOutput, ErrorResponse, RequestError, ScanError,
};

use crate::cli::OutputFormat;

/// Exit code when the analyzer itself failed.
pub const EXIT_ANALYSIS_FAILED: u8 = 1;
/// Exit code for invalid input or configuration.
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Anything the CLI prints: a result or an error body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Analysis(AnalysisResult),
    Error(CliErrorOutput),
}

/// Write output in the requested format.
pub fn write_output(
    body: &Report,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an analyzer failure; exit code 1.
pub fn render_analysis_failure(
    kind: AnalysisKind,
    err: ScanError,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let body = CliErrorOutput {
        response: ErrorResponse::analysis_failed(kind, &err),
        diagnostic: Some(err.to_payload()),
    };
    render_error(body, format, output);
    ExitCode::from(EXIT_ANALYSIS_FAILED)
}

/// Render a rejected request; exit code 2.
pub fn render_invalid_request(
    err: RequestError,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let body = CliErrorOutput {
        response: ErrorResponse::from(err),
        diagnostic: None,
    };
    render_error(body, format, output);
    ExitCode::from(EXIT_INVALID_INPUT)
}

/// Render a config or input error raised before analysis; exit code 2.
pub fn render_fatal(err: ScanError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let payload = err.to_payload();
    let body = CliErrorOutput {
        response: ErrorResponse::new(payload.message.clone()),
        diagnostic: Some(payload),
    };
    render_error(body, format, output);
    ExitCode::from(EXIT_INVALID_INPUT)
}

fn render_error(body: CliErrorOutput, format: OutputFormat, output: Option<PathBuf>) {
    let report = Report::Error(body);
    match format {
        OutputFormat::Json => {
            let content = serde_json::to_string(&report)
                .unwrap_or_else(|_| "{\"error\":\"unknown\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&report, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    }
}

fn write_json_output(body: &Report, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_pretty_output(body: &Report, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"error\":\"unknown\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &Report, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        Report::Analysis(result) => {
            let header = color("[TYPOGRAPHY]", "36", colorize);
            writeln!(buf, "{} {} style(s)", header, result.typography.len()).ok();
            for style in &result.typography {
                writeln!(
                    buf,
                    "- {:8} {} {} / {} (line-height {}, spacing {}, transform {})",
                    style.element,
                    style.font_family,
                    style.font_weight,
                    style.font_size,
                    style.line_height,
                    style.letter_spacing,
                    style.text_transform
                )
                .ok();
                writeln!(
                    buf,
                    "  color {} on {}",
                    style.color, style.background_color
                )
                .ok();
            }

            let header = color("[COLORS]", "35", colorize);
            writeln!(buf, "{} {} color(s)", header, result.colors.len()).ok();
            for value in &result.colors {
                writeln!(buf, "- {}", value).ok();
            }
        }
        Report::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            writeln!(buf, "{} {}", header, out.response.error).ok();
            if let Some(details) = &out.response.details {
                writeln!(buf, "Details: {}", details).ok();
            }
            if let Some(remediation) = out
                .diagnostic
                .as_ref()
                .and_then(|d| d.remediation.as_deref())
            {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
