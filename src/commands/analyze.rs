use std::path::PathBuf;
use std::process::ExitCode;

use stylescope_lib::analysis::pdf::analyze_pdf_bytes;
use stylescope_lib::request::preview;
use stylescope_lib::{
    read_input, AnalysisKind, AnalysisRequest, Analyzer, ImageAnalyzer, ScanError,
};
use tracing::{debug, info};

use crate::cli::{InputType, OutputFormat};
use crate::formatting::{
    render_analysis_failure, render_fatal, render_invalid_request, write_output, Report,
};
use crate::settings::{apply_overrides, format_effective_config, load_config, validate, Overrides};

/// Run one analysis and print the result.
pub async fn run_analyze(
    config_path: Option<PathBuf>,
    overrides: Overrides,
    input_type: InputType,
    input: String,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => apply_overrides(cfg, overrides),
        Err(err) => return render_fatal(err, format, output),
    };
    if let Err(err) = validate(&config, config_path.as_deref()) {
        return render_fatal(err, format, output);
    }
    debug!("{}", format_effective_config(&config, config_path.as_deref()));

    let kind = AnalysisKind::from(input_type);
    info!("Analyzing: {} - {}...", kind, preview(&input, 50));

    let outcome = match kind {
        AnalysisKind::Website => {
            let request = match AnalysisRequest::parse(Some(kind.as_str()), Some(&input)) {
                Ok(request) => request,
                Err(err) => return render_invalid_request(err, format, output),
            };
            Analyzer::from_config(&config).run(request).await
        }
        AnalysisKind::Image | AnalysisKind::Pdf => {
            let bytes = match read_input(&input) {
                Ok(bytes) => bytes,
                Err(err) => return render_fatal(ScanError::from(err), format, output),
            };
            debug!(bytes = bytes.len(), "input loaded");
            if kind == AnalysisKind::Image {
                ImageAnalyzer::new(&config.image).analyze_bytes(bytes).await
            } else {
                analyze_pdf_bytes(bytes).await
            }
        }
    };

    let result = match outcome {
        Ok(result) => result,
        Err(err) => return render_analysis_failure(kind, err, format, output),
    };

    if let Err(err) = write_output(&Report::Analysis(result), format, output.clone()) {
        return render_fatal(ScanError::Io(std::io::Error::other(err.to_string())), format, output);
    }
    ExitCode::SUCCESS
}
