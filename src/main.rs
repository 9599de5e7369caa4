mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_analyze, run_serve};
use settings::Overrides;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();

    // Logs go to stderr; stdout carries analysis JSON.
    let default_level = match (&args.command, args.verbose) {
        (_, true) => "debug",
        (Commands::Serve { .. }, false) => "info",
        (Commands::Analyze { .. }, false) => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Serve {
            bind,
            nav_timeout,
            viewport,
            browser_mode,
            chromium,
        } => {
            run_serve(
                args.config,
                Overrides {
                    bind,
                    nav_timeout,
                    viewport,
                    browser_mode: browser_mode.map(Into::into),
                    chromium,
                },
            )
            .await
        }
        Commands::Analyze {
            kind,
            input,
            nav_timeout,
            viewport,
            browser_mode,
            chromium,
            format,
            output,
        } => {
            run_analyze(
                args.config,
                Overrides {
                    bind: None,
                    nav_timeout,
                    viewport,
                    browser_mode: browser_mode.map(Into::into),
                    chromium,
                },
                kind,
                input,
                format,
                output,
            )
            .await
        }
    }
}
