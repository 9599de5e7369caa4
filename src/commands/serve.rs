use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use stylescope_lib::{router, serve, shutdown_signal, AnalysisBackend, Analyzer, ScanError};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::formatting::{EXIT_ANALYSIS_FAILED, EXIT_INVALID_INPUT};
use crate::settings::{apply_overrides, format_effective_config, load_config, validate, Overrides};

/// Run the HTTP service until Ctrl-C or SIGTERM.
pub async fn run_serve(config_path: Option<PathBuf>, overrides: Overrides) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => apply_overrides(cfg, overrides),
        Err(err) => return fatal(err),
    };
    if let Err(err) = validate(&config, config_path.as_deref()) {
        return fatal(err);
    }
    debug!("{}", format_effective_config(&config, config_path.as_deref()));

    let listener = match TcpListener::bind(&config.server.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            return fatal(ScanError::Config(format!(
                "cannot bind {}: {}",
                config.server.bind, err
            )))
        }
    };

    let backend: Arc<dyn AnalysisBackend> = Arc::new(Analyzer::from_config(&config));
    let app = router(backend, config.server.max_body_bytes);

    let token = CancellationToken::new();
    tokio::spawn(shutdown_signal(token.clone()));

    match serve(listener, app, token).await {
        Ok(()) => {
            info!("server stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("server error: {}", err);
            ExitCode::from(EXIT_ANALYSIS_FAILED)
        }
    }
}

fn fatal(err: ScanError) -> ExitCode {
    let payload = err.to_payload();
    error!(
        category = ?payload.category,
        remediation = payload.remediation.as_deref().unwrap_or(""),
        "{}",
        payload.message
    );
    ExitCode::from(EXIT_INVALID_INPUT)
}
